use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ui::mvi::UiState;

use super::frame::{Frame, FrameActivity, FrameId, ScreenContent};

/// Key of a tab section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionKey(pub String);

impl SectionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-section frame stacks plus the active section.
#[derive(Clone, Debug, PartialEq)]
pub struct NavState<C> {
    pub(super) sections: BTreeMap<SectionKey, Vec<Frame<C>>>,
    pub(super) active: SectionKey,
    pub(super) last_id: u64,
}

impl<C> Default for NavState<C> {
    fn default() -> Self {
        Self {
            sections: BTreeMap::new(),
            active: SectionKey::default(),
            last_id: 0,
        }
    }
}

impl<C: ScreenContent> UiState for NavState<C> {}

impl<C: ScreenContent> NavState<C> {
    pub fn new(sections: impl IntoIterator<Item = SectionKey>, active: SectionKey) -> Self {
        let mut map: BTreeMap<SectionKey, Vec<Frame<C>>> =
            sections.into_iter().map(|key| (key, Vec::new())).collect();
        map.entry(active.clone()).or_default();
        Self {
            sections: map,
            active,
            last_id: 0,
        }
    }

    pub fn active_section(&self) -> &SectionKey {
        &self.active
    }

    pub fn has_section(&self, key: &SectionKey) -> bool {
        self.sections.contains_key(key)
    }

    pub fn sections(&self) -> impl Iterator<Item = &SectionKey> {
        self.sections.keys()
    }

    pub fn stack(&self, key: &SectionKey) -> &[Frame<C>] {
        self.sections.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn active_stack(&self) -> &[Frame<C>] {
        self.stack(&self.active)
    }

    /// Depth of the active section's stack.
    pub fn depth(&self) -> usize {
        self.active_stack().len()
    }

    pub fn top(&self) -> Option<&Frame<C>> {
        self.active_stack().last()
    }

    pub fn frame(&self, id: FrameId) -> Option<&Frame<C>> {
        self.frames().find(|frame| frame.id == id)
    }

    /// Every frame in every section.
    pub fn frames(&self) -> impl Iterator<Item = &Frame<C>> {
        self.sections.values().flatten()
    }

    /// Activity of every frame in a section, bottom first.
    pub fn activity(&self, key: &SectionKey) -> Vec<(FrameId, FrameActivity)> {
        let stack = self.stack(key);
        let len = stack.len();
        stack
            .iter()
            .enumerate()
            .map(|(index, frame)| {
                let activity = match len - index {
                    1 => FrameActivity::Active,
                    2 => FrameActivity::Underlay,
                    _ => FrameActivity::Inert,
                };
                (frame.id, activity)
            })
            .collect()
    }
}
