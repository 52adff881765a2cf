//! Reducer trait.

use super::intent::Intent;
use super::state::UiState;

/// The only place a reducible state changes.
///
/// `reduce` consumes the old state and returns the next one. Because the
/// whole value is replaced, a transition can never be observed half-applied.
pub trait Reducer {
    type State: UiState;

    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
