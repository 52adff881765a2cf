use serde::{Deserialize, Serialize};

use crate::ui::mvi::UiState;

use super::intent::DeferredIntent;

/// Gates a privileged action waits on, in the order they are acquired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precondition {
    Session,
    Location,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preconditions {
    pub session: bool,
    pub location: bool,
}

impl Preconditions {
    pub fn all() -> Self {
        Self {
            session: true,
            location: true,
        }
    }

    /// Session is always resolved before location is even looked at.
    pub fn first_missing(&self) -> Option<Precondition> {
        if !self.session {
            Some(Precondition::Session)
        } else if !self.location {
            Some(Precondition::Location)
        } else {
            None
        }
    }

    pub fn holds(&self, precondition: Precondition) -> bool {
        match precondition {
            Precondition::Session => self.session,
            Precondition::Location => self.location,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PendingIntent {
    pub ticket: u64,
    pub intent: DeferredIntent,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueueState {
    /// At most one live intent; recording replaces it.
    pub pending: Option<PendingIntent>,
    /// Precondition currently being acquired for `pending`.
    pub awaiting: Option<Precondition>,
    /// Ticket of the last intent handed out, guarding double dispatch.
    pub last_dispatched: Option<u64>,
    pub(super) last_ticket: u64,
}

impl UiState for QueueState {}

impl QueueState {
    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }

    pub fn is_ready(&self) -> bool {
        self.pending.is_some() && self.awaiting.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_is_checked_before_location() {
        let none = Preconditions::default();
        assert_eq!(none.first_missing(), Some(Precondition::Session));
        let session_only = Preconditions {
            session: true,
            location: false,
        };
        assert_eq!(session_only.first_missing(), Some(Precondition::Location));
        assert_eq!(Preconditions::all().first_missing(), None);
    }

    #[test]
    fn location_alone_does_not_skip_session() {
        let location_only = Preconditions {
            session: false,
            location: true,
        };
        assert_eq!(location_only.first_missing(), Some(Precondition::Session));
    }
}
