//! Single-slot deferred intent queue.
//!
//! The reducer decides what the queue holds; this wrapper turns the
//! before/after difference into effects the shell acts on: which
//! acquisition sheet to show, which one just got satisfied, and which
//! intent to dispatch.

use serde::Serialize;
use tracing::{debug, info};

use crate::ui::mvi::{dispatch_mvi, Reducer};

use super::intent::{DeferredIntent, IntentKind};
use super::reducer::{QueueIntent, QueueReducer};
use super::state::{Precondition, Preconditions, QueueState};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "queue", rename_all = "snake_case")]
pub enum QueueEffect {
    /// Start acquiring this precondition (present its sheet).
    Acquire { precondition: Precondition },
    /// The precondition being acquired now holds.
    Satisfied { precondition: Precondition },
    /// Preconditions hold: run the matching handler.
    Dispatch { intent: DeferredIntent },
    /// The user cancelled acquisition; the intent is gone.
    Discarded { kind: IntentKind },
}

#[derive(Default)]
pub struct IntentQueue {
    state: QueueState,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &QueueState {
        &self.state
    }

    pub fn pending(&self) -> Option<&DeferredIntent> {
        self.state.pending.as_ref().map(|pending| &pending.intent)
    }

    pub fn awaiting(&self) -> Option<Precondition> {
        self.state.awaiting
    }

    /// Store `intent`, replacing any earlier one, and begin acquisition.
    pub fn record(&mut self, intent: DeferredIntent, preconditions: Preconditions) -> Vec<QueueEffect> {
        if let Some(previous) = self.pending() {
            debug!(replaced = ?previous.kind(), with = ?intent.kind(), "replacing pending intent");
        }
        let awaiting_before = self.state.awaiting;
        dispatch_mvi!(
            self,
            state,
            QueueReducer,
            QueueIntent::Record {
                intent,
                preconditions,
            }
        );
        self.settle(awaiting_before, preconditions)
    }

    /// Re-check after the session or location changed.
    pub fn preconditions_changed(&mut self, preconditions: Preconditions) -> Vec<QueueEffect> {
        if self.state.is_empty() {
            return Vec::new();
        }
        let awaiting_before = self.state.awaiting;
        dispatch_mvi!(self, state, QueueReducer, QueueIntent::Evaluate(preconditions));
        self.settle(awaiting_before, preconditions)
    }

    /// The user dismissed the acquisition step for `step`. Expected path,
    /// not an error: the intent is dropped silently.
    pub fn cancel(&mut self, step: Precondition) -> Vec<QueueEffect> {
        let Some(kind) = self.pending().map(DeferredIntent::kind) else {
            return Vec::new();
        };
        dispatch_mvi!(self, state, QueueReducer, QueueIntent::Cancel(step));
        if self.state.is_empty() {
            debug!(?kind, ?step, "intent discarded by user");
            vec![QueueEffect::Discarded { kind }]
        } else {
            Vec::new()
        }
    }

    pub fn clear(&mut self) {
        dispatch_mvi!(self, state, QueueReducer, QueueIntent::Clear);
    }

    fn settle(
        &mut self,
        awaiting_before: Option<Precondition>,
        preconditions: Preconditions,
    ) -> Vec<QueueEffect> {
        let mut effects = Vec::new();
        let awaiting_after = self.state.awaiting;

        if awaiting_before != awaiting_after {
            if let Some(before) = awaiting_before.filter(|p| preconditions.holds(*p)) {
                effects.push(QueueEffect::Satisfied {
                    precondition: before,
                });
            }
            if let Some(after) = awaiting_after {
                debug!(precondition = ?after, "acquiring precondition");
                effects.push(QueueEffect::Acquire {
                    precondition: after,
                });
            }
        }

        if self.state.is_ready() {
            let before = self.state.clone();
            dispatch_mvi!(self, state, QueueReducer, QueueIntent::Drain);
            let drained = before
                .pending
                .filter(|pending| {
                    before.last_dispatched != Some(pending.ticket)
                        && self.state.last_dispatched == Some(pending.ticket)
                });
            if let Some(pending) = drained {
                info!(kind = ?pending.intent.kind(), "dispatching deferred intent");
                effects.push(QueueEffect::Dispatch {
                    intent: pending.intent,
                });
            }
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ItemId, UserId};

    fn session_only() -> Preconditions {
        Preconditions {
            session: true,
            location: false,
        }
    }

    #[test]
    fn satisfied_at_record_time_dispatches_immediately() {
        let mut queue = IntentQueue::new();
        let intent = DeferredIntent::ToggleFavorite {
            item: ItemId::new("1"),
        };
        let effects = queue.record(intent.clone(), Preconditions::all());
        assert_eq!(effects, vec![QueueEffect::Dispatch { intent }]);
        assert!(queue.state().is_empty());
    }

    #[test]
    fn acquisition_runs_session_then_location() {
        let mut queue = IntentQueue::new();
        let effects = queue.record(DeferredIntent::CreateListing, Preconditions::default());
        assert_eq!(
            effects,
            vec![QueueEffect::Acquire {
                precondition: Precondition::Session
            }]
        );

        let effects = queue.preconditions_changed(session_only());
        assert_eq!(
            effects,
            vec![
                QueueEffect::Satisfied {
                    precondition: Precondition::Session
                },
                QueueEffect::Acquire {
                    precondition: Precondition::Location
                },
            ]
        );

        let effects = queue.preconditions_changed(Preconditions::all());
        assert_eq!(
            effects,
            vec![
                QueueEffect::Satisfied {
                    precondition: Precondition::Location
                },
                QueueEffect::Dispatch {
                    intent: DeferredIntent::CreateListing
                },
            ]
        );
    }

    #[test]
    fn repeated_satisfaction_dispatches_once() {
        let mut queue = IntentQueue::new();
        queue.record(DeferredIntent::CreateListing, Preconditions::default());
        let first = queue.preconditions_changed(Preconditions::all());
        let second = queue.preconditions_changed(Preconditions::all());
        let dispatches = first
            .iter()
            .chain(second.iter())
            .filter(|e| matches!(e, QueueEffect::Dispatch { .. }))
            .count();
        assert_eq!(dispatches, 1);
    }

    #[test]
    fn re_recording_while_awaiting_same_step_does_not_reacquire() {
        let mut queue = IntentQueue::new();
        queue.record(
            DeferredIntent::StartChat {
                seller: UserId::new("s"),
                item: None,
            },
            Preconditions::default(),
        );
        let effects = queue.record(DeferredIntent::CreateListing, Preconditions::default());
        assert!(effects.is_empty());
        assert_eq!(queue.pending(), Some(&DeferredIntent::CreateListing));
    }

    #[test]
    fn cancel_discards_silently() {
        let mut queue = IntentQueue::new();
        queue.record(DeferredIntent::CreateListing, session_only());
        let effects = queue.cancel(Precondition::Location);
        assert_eq!(
            effects,
            vec![QueueEffect::Discarded {
                kind: IntentKind::CreateListing
            }]
        );
        assert!(queue.preconditions_changed(Preconditions::all()).is_empty());
    }

    #[test]
    fn losing_session_mid_flow_goes_back_to_session_step() {
        let mut queue = IntentQueue::new();
        queue.record(DeferredIntent::CreateListing, session_only());
        let effects = queue.preconditions_changed(Preconditions::default());
        assert_eq!(
            effects,
            vec![QueueEffect::Acquire {
                precondition: Precondition::Session
            }]
        );
    }
}
