//! Marker for reducer inputs.

/// Something that asks a reducer for a transition: a navigation request,
/// a snapshot refresh, a precondition change.
pub trait Intent: Send + 'static {}
