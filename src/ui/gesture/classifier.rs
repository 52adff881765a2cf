//! Pointer stream classification.
//!
//! One session runs from the first pointer down until the last pointer of that
//! session lifts or cancels. Precision beats recall: anything ambiguous ends
//! as [`GestureKind::None`] and fires nothing.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::config::GestureConfig;
use crate::ui::timer::{Millis, TimerQueue};

use super::pointer::{PointerEvent, PointerId, PointerSample, TargetKind};
use super::state::{Direction, GestureAction, GestureKind, GestureState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SessionTimer {
    TapWindow { session: u64 },
    LongPress { session: u64 },
}

impl SessionTimer {
    fn session(self) -> u64 {
        match self {
            Self::TapWindow { session } | Self::LongPress { session } => session,
        }
    }
}

#[derive(Debug)]
struct Session {
    id: u64,
    origin: PointerSample,
    /// Previous sample of the primary pointer, for instantaneous velocity.
    last: PointerSample,
    pointers: BTreeSet<PointerId>,
    state: GestureState,
    tap_candidate: bool,
    tap_window_open: bool,
    peak_velocity: f64,
    long_press_fired: bool,
    /// Started on an excluded target; the host handles it natively.
    native: bool,
}

/// Result of feeding one pointer event.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureUpdate {
    /// Live state, or the final classification once `finished` is set.
    pub state: GestureState,
    pub action: Option<GestureAction>,
    pub finished: bool,
}

impl GestureUpdate {
    fn idle() -> Self {
        Self {
            state: GestureState::neutral(),
            action: None,
            finished: false,
        }
    }
}

pub struct GestureClassifier {
    config: GestureConfig,
    session: Option<Session>,
    timers: TimerQueue<SessionTimer>,
    next_session: u64,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            session: None,
            timers: TimerQueue::new(),
            next_session: 0,
        }
    }

    /// Live state of the current session, neutral between sessions.
    pub fn state(&self) -> GestureState {
        self.session
            .as_ref()
            .map(|session| session.state)
            .unwrap_or_default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// True while the current session started on an excluded target.
    pub fn is_native(&self) -> bool {
        self.session.as_ref().is_some_and(|session| session.native)
    }

    pub fn origin(&self) -> Option<&PointerSample> {
        self.session.as_ref().map(|session| &session.origin)
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    pub fn handle(&mut self, event: &PointerEvent) -> GestureUpdate {
        match event {
            PointerEvent::Down(sample) => self.down(sample),
            PointerEvent::Move(sample) => self.moved(sample),
            PointerEvent::Up(sample) => self.up(sample),
            PointerEvent::Cancel(sample) => self.cancel(sample),
        }
    }

    /// Fire timers due at `now`. Only a long press produces an action.
    pub fn on_timers(&mut self, now: Millis) -> Vec<GestureAction> {
        let mut actions = Vec::new();
        for timer in self.timers.pop_due(now) {
            let Some(session) = self
                .session
                .as_mut()
                .filter(|session| session.id == timer.session())
            else {
                trace!(?timer, "dropping stale gesture timer");
                continue;
            };
            match timer {
                SessionTimer::TapWindow { .. } => session.tap_window_open = false,
                SessionTimer::LongPress { .. } => {
                    let eligible = session.tap_candidate
                        && !session.long_press_fired
                        && session.pointers.len() == 1
                        && session.state.kind == GestureKind::Tap;
                    if eligible {
                        session.long_press_fired = true;
                        session.tap_candidate = false;
                        session.state.kind = GestureKind::LongPress;
                        debug!(target_id = %session.origin.target.id, "long press");
                        actions.push(GestureAction::LongPress {
                            target: session.origin.target.clone(),
                        });
                    }
                }
            }
        }
        actions
    }

    /// Drop the session and every timer it started.
    pub fn reset(&mut self) {
        self.session = None;
        self.timers.clear();
    }

    fn live(&self) -> GestureUpdate {
        GestureUpdate {
            state: self.state(),
            action: None,
            finished: false,
        }
    }

    fn down(&mut self, sample: &PointerSample) -> GestureUpdate {
        if let Some(session) = self.session.as_mut() {
            if session.pointers.insert(sample.pointer_id) && !session.native {
                session.state.kind = GestureKind::Multitouch;
                session.tap_candidate = false;
                let id = session.id;
                self.timers.cancel_where(|timer| timer.session() == id);
                debug!(pointers = session.pointers.len(), "multitouch");
            }
            return self.live();
        }

        self.next_session += 1;
        let id = self.next_session;
        let native = sample.target.kind.is_excluded();
        if !native {
            self.timers
                .schedule(sample.timestamp, self.config.tap_window_ms, SessionTimer::TapWindow { session: id });
            self.timers
                .schedule(sample.timestamp, self.config.long_press_ms, SessionTimer::LongPress { session: id });
        }

        self.session = Some(Session {
            id,
            origin: sample.clone(),
            last: sample.clone(),
            pointers: BTreeSet::from([sample.pointer_id]),
            state: GestureState {
                kind: if native {
                    GestureKind::None
                } else {
                    GestureKind::Tap
                },
                ..GestureState::neutral()
            },
            tap_candidate: !native,
            tap_window_open: !native,
            peak_velocity: 0.0,
            long_press_fired: false,
            native,
        });
        self.live()
    }

    fn moved(&mut self, sample: &PointerSample) -> GestureUpdate {
        let Some(session) = self.session.as_mut() else {
            return GestureUpdate::idle();
        };
        let tracked = !session.native
            && session.state.kind != GestureKind::Multitouch
            && sample.pointer_id == session.origin.pointer_id;
        if !tracked {
            return self.live();
        }

        let was_candidate = session.tap_candidate;
        track(session, sample, &self.config);
        if was_candidate && !session.tap_candidate {
            let id = session.id;
            self.timers.cancel_where(|timer| timer.session() == id);
        }
        self.live()
    }

    fn up(&mut self, sample: &PointerSample) -> GestureUpdate {
        let remaining = match self.session.as_mut() {
            Some(session) => {
                if !session.pointers.remove(&sample.pointer_id) {
                    return self.live();
                }
                session.pointers.len()
            }
            None => return GestureUpdate::idle(),
        };
        if remaining > 0 {
            return self.live();
        }

        let Some(mut session) = self.session.take() else {
            return GestureUpdate::idle();
        };
        let id = session.id;
        self.timers.cancel_where(|timer| timer.session() == id);

        if session.native {
            return GestureUpdate {
                state: GestureState::neutral(),
                action: None,
                finished: true,
            };
        }

        if sample.pointer_id == session.origin.pointer_id
            && session.state.kind != GestureKind::Multitouch
        {
            track(&mut session, sample, &self.config);
        }

        let action = self.finalize(&mut session, sample);
        debug!(
            kind = ?session.state.kind,
            distance = session.state.distance,
            velocity = session.state.velocity,
            fired = action.is_some(),
            "gesture finished"
        );
        GestureUpdate {
            state: session.state,
            action,
            finished: true,
        }
    }

    fn cancel(&mut self, sample: &PointerSample) -> GestureUpdate {
        let owned = self
            .session
            .as_ref()
            .is_some_and(|session| session.pointers.contains(&sample.pointer_id));
        if !owned {
            return self.live();
        }
        debug!(pointer = sample.pointer_id.0, "gesture cancelled");
        self.reset();
        GestureUpdate {
            state: GestureState::neutral(),
            action: None,
            finished: true,
        }
    }

    fn finalize(&self, session: &mut Session, release: &PointerSample) -> Option<GestureAction> {
        let dx = session.last.x - session.origin.x;
        let dy = session.last.y - session.origin.y;
        let target = &session.origin.target;

        match session.state.kind {
            GestureKind::Tap => {
                let duration = release.timestamp.saturating_sub(session.origin.timestamp);
                let is_tap = session.tap_candidate
                    && session.tap_window_open
                    && duration <= self.config.tap_window_ms
                    && session.state.distance <= self.config.move_threshold_px
                    && session.peak_velocity <= self.config.tap_max_velocity
                    && release.target == *target;
                if is_tap {
                    Some(GestureAction::Tap {
                        target: target.clone(),
                    })
                } else {
                    session.state.kind = GestureKind::None;
                    None
                }
            }
            GestureKind::Swipe => {
                let direction = Direction::from_delta(dx, 0.0);
                (dx.abs() > self.config.swipe_min_distance_px).then(|| GestureAction::Swipe {
                    direction,
                    target: target.clone(),
                })
            }
            GestureKind::Scroll => {
                let direction = Direction::from_delta(0.0, dy);
                (target.kind == TargetKind::Plain
                    && dy.abs() > self.config.swipe_min_distance_px)
                    .then(|| GestureAction::Swipe {
                        direction,
                        target: target.clone(),
                    })
            }
            GestureKind::None | GestureKind::LongPress | GestureKind::Multitouch => None,
        }
    }
}

fn track(session: &mut Session, sample: &PointerSample, config: &GestureConfig) {
    let dt = sample.timestamp.saturating_sub(session.last.timestamp).max(1) as f64;
    let step = (sample.x - session.last.x).hypot(sample.y - session.last.y);
    let velocity = step / dt;
    session.peak_velocity = session.peak_velocity.max(velocity);

    let dx = sample.x - session.origin.x;
    let dy = sample.y - session.origin.y;
    let distance = dx.hypot(dy);
    session.state.velocity = velocity;
    session.state.distance = distance;
    session.state.direction = Direction::from_delta(dx, dy);

    match session.state.kind {
        GestureKind::LongPress | GestureKind::Multitouch => {}
        _ if distance > config.move_threshold_px => {
            session.tap_candidate = false;
            session.state.kind = classify_axis(dx, dy, config.axis_dominance);
        }
        _ if session.tap_candidate => session.state.kind = GestureKind::Tap,
        _ => {}
    }
    session.last = sample.clone();
}

fn classify_axis(dx: f64, dy: f64, dominance: f64) -> GestureKind {
    if dx.abs() > dominance * dy.abs() {
        GestureKind::Swipe
    } else if dy.abs() > dominance * dx.abs() {
        GestureKind::Scroll
    } else {
        GestureKind::None
    }
}
