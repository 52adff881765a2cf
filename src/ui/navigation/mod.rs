//! Per-section navigation stacks and the swipe-back gesture.

mod frame;
mod intent;
mod navigator;
mod reducer;
mod state;
mod swipe_back;

pub use frame::{Frame, FrameActivity, FrameId, FrameStatus, Reconciled, ScreenContent};
pub use intent::NavIntent;
pub use navigator::{NavEffect, Navigator};
pub use reducer::NavReducer;
pub use state::{NavState, SectionKey};
pub use swipe_back::{DragSession, FrameTransform, SwipeBackController, SwipeRelease};
