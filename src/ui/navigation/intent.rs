use std::sync::Arc;

use crate::ui::mvi::Intent;

use super::frame::{FrameId, ScreenContent};
use super::state::SectionKey;

pub enum NavIntent<C: ScreenContent> {
    /// Append a frame with a fresh id to the active section.
    Push { content: C, from_deep_link: bool },
    /// Remove the active top frame. No-op on an empty stack.
    Pop,
    /// Switch sections; re-selecting the active one collapses it to root.
    SelectSection(SectionKey),
    /// Re-resolve every frame in every section against a new snapshot.
    Refresh(Arc<C::Snapshot>),
    /// The entry tick for a pushed frame elapsed.
    MarkEntered(FrameId),
}

impl<C: ScreenContent> Intent for NavIntent<C> {}
