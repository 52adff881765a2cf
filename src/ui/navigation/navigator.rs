//! Per-section navigation driven through [`NavReducer`], plus the swipe-back
//! gesture and the timers that belong to the stack.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::ui::mvi::{dispatch_mvi, Reducer};
use crate::ui::timer::{Millis, TimerQueue};

use super::frame::{FrameId, ScreenContent};
use super::intent::NavIntent;
use super::reducer::NavReducer;
use super::state::{NavState, SectionKey};
use super::swipe_back::{SwipeBackController, SwipeBackEffect, SwipeRelease};

/// Observable consequence of a navigation call.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "nav", rename_all = "snake_case")]
pub enum NavEffect {
    Pushed { section: SectionKey, frame: FrameId },
    Popped { section: SectionKey, frame: FrameId },
    Collapsed { section: SectionKey, removed: usize },
    SectionChanged { from: SectionKey, to: SectionKey },
    /// Entry tick elapsed; the host may start the entry animation.
    Entered { frame: FrameId },
    /// The deep-link query parameter should be stripped from the URL.
    DeepLinkCleared { param: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct EntryTick {
    frame: FrameId,
}

pub struct Navigator<C: ScreenContent> {
    state: NavState<C>,
    swipe: SwipeBackController,
    timers: TimerQueue<EntryTick>,
    entry_tick_ms: Millis,
    deep_link_param: String,
    deep_link: Option<String>,
}

impl<C: ScreenContent> Navigator<C> {
    pub fn new(config: &Config) -> Self {
        let nav = &config.navigation;
        let sections = nav.sections.iter().map(SectionKey::new);
        Self {
            state: NavState::new(sections, SectionKey::new(nav.default_section.clone())),
            swipe: SwipeBackController::new(config.swipe_back.clone()),
            timers: TimerQueue::new(),
            entry_tick_ms: nav.entry_tick_ms,
            deep_link_param: nav.deep_link_param.clone(),
            deep_link: None,
        }
    }

    pub fn state(&self) -> &NavState<C> {
        &self.state
    }

    pub fn swipe(&self) -> &SwipeBackController {
        &self.swipe
    }

    /// Value of the deep-link query parameter, if it is still in the URL.
    pub fn deep_link(&self) -> Option<&str> {
        self.deep_link.as_deref()
    }

    pub fn push(&mut self, content: C, now: Millis) -> NavEffect {
        self.push_frame(content, false, now)
    }

    /// The URL carries a deep link; hold it until its lookup settles.
    pub fn hold_deep_link(&mut self, value: impl Into<String>) {
        self.deep_link = Some(value.into());
    }

    /// Push the frame a held deep link resolved to. The parameter is stripped
    /// once that frame is popped or collapsed away.
    pub fn push_deep_link(&mut self, content: C, now: Millis) -> NavEffect {
        self.push_frame(content, true, now)
    }

    /// Strip the deep-link parameter without touching the stack.
    pub fn clear_deep_link(&mut self) -> Option<NavEffect> {
        self.deep_link.take().map(|_| NavEffect::DeepLinkCleared {
            param: self.deep_link_param.clone(),
        })
    }

    pub fn pop(&mut self) -> Vec<NavEffect> {
        let Some((top, linked)) = self
            .state
            .top()
            .map(|frame| (frame.id, frame.from_deep_link))
        else {
            debug!(section = %self.state.active_section(), "pop on empty stack");
            return Vec::new();
        };
        // The frame being torn down owns any drag in flight.
        self.swipe.cancel();
        dispatch_mvi!(self, state, NavReducer<C>, NavIntent::Pop);
        self.timers.cancel_where(|tick| tick.frame == top);

        let section = self.state.active_section().clone();
        debug!(%section, frame = top.0, depth = self.state.depth(), "frame popped");
        let mut effects = vec![NavEffect::Popped {
            section,
            frame: top,
        }];
        if linked {
            effects.extend(self.release_deep_link());
        }
        effects
    }

    pub fn select_section(&mut self, key: SectionKey) -> Vec<NavEffect> {
        if !self.state.has_section(&key) {
            warn!(section = %key, "unknown section");
            return Vec::new();
        }
        self.swipe.cancel();

        let from = self.state.active_section().clone();
        if key != from {
            dispatch_mvi!(self, state, NavReducer<C>, NavIntent::SelectSection(key.clone()));
            debug!(%from, to = %key, "section changed");
            return vec![NavEffect::SectionChanged { from, to: key }];
        }

        let removed: Vec<FrameId> = self.state.active_stack().iter().map(|f| f.id).collect();
        if removed.is_empty() {
            return Vec::new();
        }
        let linked = self.state.active_stack().iter().any(|f| f.from_deep_link);
        dispatch_mvi!(self, state, NavReducer<C>, NavIntent::SelectSection(key.clone()));
        self.timers.cancel_where(|tick| removed.contains(&tick.frame));
        debug!(section = %key, removed = removed.len(), "stack collapsed to root");

        let mut effects = vec![NavEffect::Collapsed {
            section: key,
            removed: removed.len(),
        }];
        if linked {
            effects.extend(self.release_deep_link());
        }
        effects
    }

    /// Reconcile every frame against fresh shared data in one transition.
    pub fn refresh(&mut self, snapshot: Arc<C::Snapshot>) {
        dispatch_mvi!(self, state, NavReducer<C>, NavIntent::Refresh(snapshot));
    }

    /// Swipe-back is enabled only while the active stack has something to pop.
    pub fn begin_drag(&mut self, x: f64, timestamp: Millis) -> bool {
        let enabled = self.state.depth() > 0;
        self.swipe.begin(x, timestamp, enabled)
    }

    pub fn drag_to(&mut self, x: f64, timestamp: Millis) {
        self.swipe.update(x, timestamp);
    }

    pub fn release_drag(&mut self, x: f64, timestamp: Millis) -> SwipeRelease {
        self.swipe.release(x, timestamp)
    }

    pub fn abandon_drag(&mut self) {
        self.swipe.cancel();
    }

    pub fn on_timers(&mut self, now: Millis) -> Vec<NavEffect> {
        let mut effects = Vec::new();
        for tick in self.timers.pop_due(now) {
            dispatch_mvi!(self, state, NavReducer<C>, NavIntent::MarkEntered(tick.frame));
            effects.push(NavEffect::Entered { frame: tick.frame });
        }
        if let Some(SwipeBackEffect::Pop) = self.swipe.on_timers(now) {
            effects.extend(self.pop());
        }
        effects
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        [self.timers.next_deadline(), self.swipe.next_deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    pub fn teardown(&mut self) {
        self.timers.clear();
        self.swipe.cancel();
    }

    /// A deep-linked frame went away; strip the parameter unless another
    /// deep-linked frame is still stacked somewhere.
    fn release_deep_link(&mut self) -> Option<NavEffect> {
        if self.state.frames().any(|frame| frame.from_deep_link) {
            return None;
        }
        self.clear_deep_link()
    }

    fn push_frame(&mut self, content: C, from_deep_link: bool, now: Millis) -> NavEffect {
        self.swipe.cancel();
        dispatch_mvi!(
            self,
            state,
            NavReducer<C>,
            NavIntent::Push {
                content,
                from_deep_link,
            }
        );
        let section = self.state.active_section().clone();
        let frame = self
            .state
            .top()
            .map(|frame| frame.id)
            .unwrap_or(FrameId(0));
        self.timers.schedule(now, self.entry_tick_ms, EntryTick { frame });
        debug!(%section, frame = frame.0, depth = self.state.depth(), "frame pushed");
        NavEffect::Pushed { section, frame }
    }
}
