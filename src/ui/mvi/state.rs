//! Marker for reducible state.

/// Reducible state: cloneable, comparable (callers diff before/after to find
/// side effects) and defaultable so it can be taken out with `mem::take`.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
