use std::fmt::Debug;

use serde::Serialize;

/// Identity of a pushed frame. Monotonic; never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FrameId(pub u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameStatus {
    #[default]
    Live,
    /// The data this frame is about has disappeared. The frame stays in
    /// place and renders a not-found state until the data comes back.
    Missing,
}

/// Outcome of re-resolving a frame's references against fresh data.
#[derive(Clone, Debug, PartialEq)]
pub enum Reconciled<C> {
    Unchanged,
    Updated(C),
    Missing,
}

/// Descriptor of what a frame shows.
///
/// The stack never renders anything itself. It keeps descriptors and asks
/// them to re-resolve whenever the shared snapshot changes, so a frame pushed
/// earlier never holds stale data.
pub trait ScreenContent: Clone + PartialEq + Debug + Send + 'static {
    type Snapshot: Send + Sync + 'static;

    fn reconcile(&self, snapshot: &Self::Snapshot) -> Reconciled<Self>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame<C> {
    pub id: FrameId,
    pub content: C,
    pub status: FrameStatus,
    /// Set by the entry tick that follows a push.
    pub entered: bool,
    /// Pushed to satisfy a deep link.
    pub from_deep_link: bool,
}

impl<C: ScreenContent> Frame<C> {
    pub fn new(id: FrameId, content: C, from_deep_link: bool) -> Self {
        Self {
            id,
            content,
            status: FrameStatus::Live,
            entered: false,
            from_deep_link,
        }
    }

    pub(super) fn reconciled(self, snapshot: &C::Snapshot) -> Self {
        match self.content.reconcile(snapshot) {
            Reconciled::Unchanged => Self {
                status: FrameStatus::Live,
                ..self
            },
            Reconciled::Updated(content) => Self {
                content,
                status: FrameStatus::Live,
                ..self
            },
            Reconciled::Missing => Self {
                status: FrameStatus::Missing,
                ..self
            },
        }
    }
}

/// How much of the frame the host should keep alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameActivity {
    /// Top of the stack: interactive and animated.
    Active,
    /// Directly beneath the top: animated for swipe-back parallax only.
    Underlay,
    /// Deeper frames: no motion, may be suspended.
    Inert,
}
