use serde::{Deserialize, Serialize};

/// Single-slot sheet. Not a stack: showing replaces whatever was there.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SheetState<C> {
    pub content: Option<C>,
    pub visible: bool,
    /// Exit animation running; content clears when it ends.
    pub closing: bool,
}

impl<C> Default for SheetState<C> {
    fn default() -> Self {
        Self {
            content: None,
            visible: false,
            closing: false,
        }
    }
}

impl<C> SheetState<C> {
    /// Has content and is not on its way out.
    pub fn is_open(&self) -> bool {
        self.content.is_some() && !self.closing
    }
}

/// Where a drag on the sheet started.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "region", rename_all = "snake_case")]
pub enum DragOrigin {
    Handle,
    /// Inside the sheet body, whose scroll region sits at `scroll_top`.
    Body { scroll_top: f64 },
}

impl DragOrigin {
    pub fn allows_dismiss(self) -> bool {
        match self {
            Self::Handle => true,
            Self::Body { scroll_top } => scroll_top <= 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissReason {
    /// Swiped away or closed by the user.
    User,
    /// Closed by the app, e.g. after the sheet's purpose was fulfilled.
    Programmatic,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "sheet", rename_all = "snake_case")]
pub enum SheetEffect<C> {
    /// Visible flag flipped on; enter transition starts now.
    Shown { content: C },
    /// Exit animation started.
    Hiding { content: C, reason: DismissReason },
    /// Exit animation finished and the slot is empty again.
    Cleared { reason: DismissReason },
}
