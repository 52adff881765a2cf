use std::fmt::Debug;

use tracing::{debug, trace};

use crate::config::SheetConfig;
use crate::ui::timer::{Millis, TimerQueue};

use super::state::{DismissReason, DragOrigin, SheetEffect, SheetState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SheetTimer {
    Reveal { generation: u64 },
    Exit { generation: u64, reason: DismissReason },
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SheetDrag {
    start_y: f64,
    offset: f64,
}

/// Transient sheet presentation with deferred reveal, timed exit and
/// swipe-to-dismiss.
pub struct ModalOverlayController<C> {
    config: SheetConfig,
    state: SheetState<C>,
    drag: Option<SheetDrag>,
    timers: TimerQueue<SheetTimer>,
    generation: u64,
}

impl<C: Clone + Debug> ModalOverlayController<C> {
    pub fn new(config: SheetConfig) -> Self {
        Self {
            config,
            state: SheetState::default(),
            drag: None,
            timers: TimerQueue::new(),
            generation: 0,
        }
    }

    pub fn state(&self) -> &SheetState<C> {
        &self.state
    }

    pub fn content(&self) -> Option<&C> {
        self.state.content.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Replace the content and reveal it a couple of frames later, so the
    /// enter transition always starts from the closed state.
    pub fn show(&mut self, content: C, now: Millis) {
        self.timers.clear();
        self.generation += 1;
        debug!(?content, "sheet show");
        self.state = SheetState {
            content: Some(content),
            visible: false,
            closing: false,
        };
        self.drag = None;
        self.timers.schedule(
            now,
            self.config.reveal_delay_ms,
            SheetTimer::Reveal {
                generation: self.generation,
            },
        );
    }

    /// Start the exit animation. No-op when empty or already closing.
    pub fn hide(&mut self, reason: DismissReason, now: Millis) -> Option<SheetEffect<C>> {
        if self.state.closing {
            return None;
        }
        let content = self.state.content.clone()?;
        self.timers.clear();
        self.state.visible = false;
        self.state.closing = true;
        self.drag = None;
        self.timers.schedule(
            now,
            self.config.exit_duration_ms,
            SheetTimer::Exit {
                generation: self.generation,
                reason,
            },
        );
        debug!(?reason, "sheet hiding");
        Some(SheetEffect::Hiding { content, reason })
    }

    pub fn on_timers(&mut self, now: Millis) -> Vec<SheetEffect<C>> {
        let mut effects = Vec::new();
        for timer in self.timers.pop_due(now) {
            match timer {
                SheetTimer::Reveal { generation }
                    if generation == self.generation && !self.state.closing =>
                {
                    self.state.visible = true;
                    if let Some(content) = self.state.content.clone() {
                        effects.push(SheetEffect::Shown { content });
                    }
                }
                SheetTimer::Exit { generation, reason } if generation == self.generation => {
                    self.state = SheetState::default();
                    debug!(?reason, "sheet cleared");
                    effects.push(SheetEffect::Cleared { reason });
                }
                stale => trace!(?stale, "dropping stale sheet timer"),
            }
        }
        effects
    }

    /// Begin a swipe-to-dismiss. Only the handle, or a body already
    /// scrolled to its top, can drag the sheet.
    pub fn begin_drag(&mut self, origin: DragOrigin, y: f64) -> bool {
        let allowed = self.state.visible && !self.state.closing && origin.allows_dismiss();
        if allowed {
            self.drag = Some(SheetDrag {
                start_y: y,
                offset: 0.0,
            });
        }
        allowed
    }

    pub fn drag_to(&mut self, y: f64) {
        if let Some(drag) = self.drag.as_mut() {
            drag.offset = (y - drag.start_y).max(0.0);
        }
    }

    /// Past the dismiss distance the sheet hides; otherwise it springs back.
    pub fn release_drag(&mut self, y: f64, now: Millis) -> Option<SheetEffect<C>> {
        self.drag_to(y);
        let drag = self.drag.take()?;
        if drag.offset > self.config.dismiss_distance_px {
            self.hide(DismissReason::User, now)
        } else {
            debug!(offset = drag.offset, "sheet sprang back");
            None
        }
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    pub fn dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_offset(&self) -> f64 {
        self.drag.map(|drag| drag.offset).unwrap_or(0.0)
    }

    /// Backdrop lightens as the sheet is dragged toward dismissal.
    pub fn backdrop_opacity(&self) -> f64 {
        if !self.state.visible {
            return 0.0;
        }
        let progress = (self.drag_offset() / self.config.dismiss_distance_px).clamp(0.0, 1.0);
        self.config.backdrop_max_opacity * (1.0 - progress)
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    /// Drop content and every pending timer.
    pub fn teardown(&mut self) {
        self.timers.clear();
        self.drag = None;
        self.state = SheetState::default();
    }
}
