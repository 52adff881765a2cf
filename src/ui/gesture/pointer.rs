use serde::{Deserialize, Serialize};

use crate::ui::timer::Millis;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointerId(pub u32);

/// What sits under the pointer, as far as classification cares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    #[default]
    Plain,
    /// Buttons, links, inputs, scrollable containers.
    Interactive,
    /// Embedded media that owns its own gestures.
    GestureBlocking,
    /// Grab handle of the open sheet.
    SheetHandle,
    /// Anywhere else inside the open sheet.
    SheetBody,
}

impl TargetKind {
    /// Excluded targets keep native click semantics.
    pub fn is_excluded(self) -> bool {
        matches!(self, Self::Interactive | Self::GestureBlocking)
    }
}

/// Reference to the element an event landed on.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetRef {
    pub id: String,
    #[serde(default)]
    pub kind: TargetKind,
}

impl TargetRef {
    pub fn plain(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: TargetKind::Plain,
        }
    }

    pub fn new(id: impl Into<String>, kind: TargetKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub timestamp: Millis,
    pub pointer_id: PointerId,
    pub target: TargetRef,
}

impl PointerSample {
    pub fn new(pointer_id: u32, x: f64, y: f64, timestamp: Millis, target: TargetRef) -> Self {
        Self {
            x,
            y,
            timestamp,
            pointer_id: PointerId(pointer_id),
            target,
        }
    }
}

/// Raw host input, one per pointer transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PointerEvent {
    Down(PointerSample),
    Move(PointerSample),
    Up(PointerSample),
    /// Cancel or leave without a matching up.
    Cancel(PointerSample),
}

impl PointerEvent {
    pub fn sample(&self) -> &PointerSample {
        match self {
            Self::Down(s) | Self::Move(s) | Self::Up(s) | Self::Cancel(s) => s,
        }
    }

    pub fn timestamp(&self) -> Millis {
        self.sample().timestamp
    }

    /// Same event re-stamped onto another clock.
    pub fn stamped(mut self, timestamp: Millis) -> Self {
        match &mut self {
            Self::Down(s) | Self::Move(s) | Self::Up(s) | Self::Cancel(s) => {
                s.timestamp = timestamp;
            }
        }
        self
    }
}
