use serde::{Deserialize, Serialize};

use crate::content::{Screen, Sheet};
use crate::data::{ItemId, Snapshot};
use crate::ui::deferred::DeferredIntent;
use crate::ui::gesture::PointerEvent;
use crate::ui::navigation::SectionKey;
use crate::ui::timer::Millis;

/// Everything a host can feed into the [`Shell`](crate::ui::shell::Shell).
///
/// One JSON object per event in trace files and on the `listen` stdin
/// stream, tagged by `event`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    Pointer { pointer: PointerEvent },
    /// The host's shared data changed.
    Snapshot { snapshot: Snapshot },
    RecordIntent { intent: DeferredIntent },
    Push { screen: Screen },
    Pop,
    SelectSection { section: SectionKey },
    ShowSheet { sheet: Sheet },
    /// User closed the sheet by other means than a drag (close button, backdrop).
    DismissSheet,
    /// Scroll offset of the sheet body, needed to gate body drags.
    SheetScroll { scroll_top: f64 },
    /// URL carried the deep-link parameter.
    DeepLink { item: ItemId },
    /// The lookup for the pending deep link came back empty.
    DeepLinkFailed,
}

impl HostEvent {
    /// Pointer events carry their own clock; everything else happens "now".
    pub fn timestamp(&self) -> Option<Millis> {
        match self {
            Self::Pointer { pointer } => Some(pointer.timestamp()),
            _ => None,
        }
    }

    /// Move pointer events onto another clock. Other events are unchanged.
    pub fn stamped(self, at: Millis) -> Self {
        match self {
            Self::Pointer { pointer } => Self::Pointer {
                pointer: pointer.stamped(at),
            },
            other => other,
        }
    }
}
