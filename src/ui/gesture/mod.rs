//! Raw pointer input to tap / swipe / scroll / long press / multitouch.

mod classifier;
mod pointer;
mod state;

pub use classifier::{GestureClassifier, GestureUpdate};
pub use pointer::{PointerEvent, PointerId, PointerSample, TargetKind, TargetRef};
pub use state::{Direction, GestureAction, GestureHandler, GestureKind, GestureState};
