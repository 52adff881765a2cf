//! Model-View-Intent primitives shared by the interaction state machines.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ host renders
//!    ↑                                 │
//!    └──────── pointer / timer ────────┘
//! ```
//!
//! Reducers own the transitions. Side effects (timers, handler dispatch,
//! sheet presentation) happen in the controller that calls `reduce`, by
//! comparing the state before and after.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;

/// Run `$intent` through `$reducer` against `$self.$field` and store the
/// result in place.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

pub(crate) use dispatch_mvi;
