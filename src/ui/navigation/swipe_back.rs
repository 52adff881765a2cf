//! Interruptible swipe-to-go-back.
//!
//! A horizontal drag on the top frame maps to `progress` in `[0, 1]`. Release
//! either settles forward and pops once, or springs back without popping.

use serde::Serialize;
use tracing::debug;

use crate::config::SwipeBackConfig;
use crate::ui::timer::{Millis, TimerQueue};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DragSession {
    pub origin_x: f64,
    pub current_x: f64,
    pub progress: f64,
    pub active: bool,
}

/// Transform the host applies to a frame while a swipe is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct FrameTransform {
    pub translate_x: f64,
    /// Darkening overlay, 0 = none.
    pub shade: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeRelease {
    /// Past the commit threshold or flung: the frame will pop once settled.
    Commit,
    SpringBack,
    /// No drag was in flight.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeBackEffect {
    Pop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Settle {
    Pop,
    Rest,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    Dragging(DragSession),
    Settling { target: Settle, progress: f64 },
}

pub struct SwipeBackController {
    config: SwipeBackConfig,
    phase: Phase,
    timers: TimerQueue<Settle>,
    last_x: f64,
    last_at: Millis,
    velocity: f64,
}

impl SwipeBackController {
    pub fn new(config: SwipeBackConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            timers: TimerQueue::new(),
            last_x: 0.0,
            last_at: 0,
            velocity: 0.0,
        }
    }

    /// Start a drag at `x`. Refused while disabled or while a previous
    /// release is still settling.
    pub fn begin(&mut self, x: f64, timestamp: Millis, enabled: bool) -> bool {
        if !enabled || self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Dragging(DragSession {
            origin_x: x,
            current_x: x,
            progress: 0.0,
            active: true,
        });
        self.last_x = x;
        self.last_at = timestamp;
        self.velocity = 0.0;
        debug!(origin_x = x, "swipe-back drag started");
        true
    }

    pub fn update(&mut self, x: f64, timestamp: Millis) {
        let Phase::Dragging(drag) = &mut self.phase else {
            return;
        };
        drag.current_x = x;
        drag.progress = progress_for(drag.origin_x, x, self.config.commit_distance_px);
        let dt = timestamp.saturating_sub(self.last_at).max(1) as f64;
        self.velocity = (x - self.last_x) / dt;
        self.last_x = x;
        self.last_at = timestamp;
    }

    pub fn release(&mut self, x: f64, timestamp: Millis) -> SwipeRelease {
        if !self.dragging() {
            return SwipeRelease::Ignored;
        }
        // Velocity is measured into the release, so a pause before lifting
        // reads as zero.
        self.update(x, timestamp);
        let progress = self.progress();
        let commit =
            progress > self.config.commit_progress || self.velocity > self.config.fling_velocity;
        let target = if commit { Settle::Pop } else { Settle::Rest };

        self.phase = Phase::Settling {
            target,
            progress: if commit { 1.0 } else { 0.0 },
        };
        self.timers.clear();
        self.timers.schedule(timestamp, self.config.settle_ms, target);
        debug!(progress, velocity = self.velocity, commit, "swipe-back released");

        if commit {
            SwipeRelease::Commit
        } else {
            SwipeRelease::SpringBack
        }
    }

    /// Abandon any drag or settle in flight. A pending pop is dropped.
    pub fn cancel(&mut self) {
        if self.phase != Phase::Idle {
            debug!("swipe-back abandoned");
        }
        self.phase = Phase::Idle;
        self.timers.clear();
        self.velocity = 0.0;
    }

    pub fn on_timers(&mut self, now: Millis) -> Option<SwipeBackEffect> {
        let mut effect = None;
        for settle in self.timers.pop_due(now) {
            self.phase = Phase::Idle;
            if settle == Settle::Pop {
                effect = Some(SwipeBackEffect::Pop);
            }
        }
        effect
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    pub fn dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    pub fn settling(&self) -> bool {
        matches!(self.phase, Phase::Settling { .. })
    }

    pub fn drag_session(&self) -> Option<DragSession> {
        match self.phase {
            Phase::Dragging(drag) => Some(drag),
            _ => None,
        }
    }

    pub fn progress(&self) -> f64 {
        match self.phase {
            Phase::Idle => 0.0,
            Phase::Dragging(drag) => drag.progress,
            Phase::Settling { progress, .. } => progress,
        }
    }

    /// The top frame follows the finger directly, never left of its origin.
    pub fn top_transform(&self) -> FrameTransform {
        let translate_x = match self.phase {
            Phase::Idle => 0.0,
            Phase::Dragging(drag) => (drag.current_x - drag.origin_x).max(0.0),
            Phase::Settling { progress, .. } => progress * self.config.commit_distance_px,
        };
        FrameTransform {
            translate_x,
            shade: 0.0,
        }
    }

    /// The frame beneath starts shifted inward and shaded, and both effects
    /// recede linearly as progress reaches 1.
    pub fn underlay_transform(&self) -> FrameTransform {
        let remaining = 1.0 - self.progress();
        FrameTransform {
            translate_x: -self.config.parallax_shift_px * remaining,
            shade: self.config.underlay_max_shade * remaining,
        }
    }
}

fn progress_for(origin_x: f64, x: f64, commit_distance: f64) -> f64 {
    ((x - origin_x) / commit_distance).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> SwipeBackController {
        SwipeBackController::new(SwipeBackConfig {
            commit_distance_px: 200.0,
            ..SwipeBackConfig::default()
        })
    }

    #[test]
    fn disabled_controller_refuses_drag() {
        let mut swipe = controller();
        assert!(!swipe.begin(10.0, 0, false));
        assert!(!swipe.dragging());
    }

    #[test]
    fn progress_is_clamped() {
        let mut swipe = controller();
        swipe.begin(0.0, 0, true);
        swipe.update(-50.0, 50);
        assert_eq!(swipe.progress(), 0.0);
        swipe.update(500.0, 500);
        assert_eq!(swipe.progress(), 1.0);
    }

    #[test]
    fn underlay_recedes_with_progress() {
        let mut swipe = controller();
        let at_rest = swipe.underlay_transform();
        swipe.begin(0.0, 0, true);
        swipe.update(100.0, 400);
        let halfway = swipe.underlay_transform();
        assert!(halfway.translate_x > at_rest.translate_x);
        assert!(halfway.shade < at_rest.shade);
        assert!((halfway.shade - at_rest.shade / 2.0).abs() < 1e-9);
    }

    #[test]
    fn cancel_drops_pending_pop() {
        let mut swipe = controller();
        swipe.begin(0.0, 0, true);
        swipe.update(150.0, 600);
        assert_eq!(swipe.release(150.0, 600), SwipeRelease::Commit);
        swipe.cancel();
        assert_eq!(swipe.on_timers(10_000), None);
        assert_eq!(swipe.progress(), 0.0);
    }

    #[test]
    fn cannot_restart_while_settling() {
        let mut swipe = controller();
        swipe.begin(0.0, 0, true);
        swipe.release(20.0, 400);
        assert!(swipe.settling());
        assert!(!swipe.begin(0.0, 410, true));
        swipe.on_timers(400 + SwipeBackConfig::default().settle_ms);
        assert!(swipe.begin(0.0, 700, true));
    }
}
