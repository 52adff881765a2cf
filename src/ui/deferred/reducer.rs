use crate::ui::mvi::{Intent, Reducer};

use super::intent::DeferredIntent;
use super::state::{PendingIntent, Precondition, Preconditions, QueueState};

#[derive(Clone, Debug)]
pub enum QueueIntent {
    Record {
        intent: DeferredIntent,
        preconditions: Preconditions,
    },
    /// Precondition state changed outside the queue.
    Evaluate(Preconditions),
    /// User backed out of acquiring this precondition.
    Cancel(Precondition),
    /// Hand the pending intent out if it is ready and not yet dispatched.
    Drain,
    Clear,
}

impl Intent for QueueIntent {}

pub struct QueueReducer;

impl Reducer for QueueReducer {
    type State = QueueState;
    type Intent = QueueIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            QueueIntent::Record {
                intent,
                preconditions,
            } => {
                state.last_ticket += 1;
                state.pending = Some(PendingIntent {
                    ticket: state.last_ticket,
                    intent,
                });
                state.awaiting = preconditions.first_missing();
                state
            }

            QueueIntent::Evaluate(preconditions) => {
                state.awaiting = state
                    .pending
                    .as_ref()
                    .and_then(|_| preconditions.first_missing());
                state
            }

            QueueIntent::Cancel(step) => {
                if state.awaiting == Some(step) {
                    state.pending = None;
                    state.awaiting = None;
                }
                state
            }

            QueueIntent::Drain => {
                if !state.is_ready() {
                    return state;
                }
                let already = state
                    .pending
                    .as_ref()
                    .is_some_and(|pending| state.last_dispatched == Some(pending.ticket));
                if let Some(pending) = state.pending.take() {
                    if !already {
                        state.last_dispatched = Some(pending.ticket);
                    }
                }
                state
            }

            QueueIntent::Clear => QueueState {
                pending: None,
                awaiting: None,
                ..state
            },
        }
    }
}
