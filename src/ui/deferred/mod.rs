//! Deferred privileged actions and their precondition gates.

mod intent;
mod queue;
mod reducer;
mod state;

pub use intent::{DeferredIntent, IntentHandler, IntentKind};
pub use queue::{IntentQueue, QueueEffect};
pub use reducer::{QueueIntent, QueueReducer};
pub use state::{PendingIntent, Precondition, Preconditions, QueueState};
