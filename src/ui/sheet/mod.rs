//! Transient swipe-dismissible sheet, independent of the navigation stack.

mod controller;
mod state;

pub use controller::ModalOverlayController;
pub use state::{DismissReason, DragOrigin, SheetEffect, SheetState};
