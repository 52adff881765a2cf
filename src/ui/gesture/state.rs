use serde::Serialize;

use super::pointer::TargetRef;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    #[default]
    None,
    Tap,
    Swipe,
    Scroll,
    LongPress,
    Multitouch,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    None,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Direction of the dominant axis of `(dx, dy)`. Screen coordinates: +y is down.
    pub fn from_delta(dx: f64, dy: f64) -> Self {
        if dx == 0.0 && dy == 0.0 {
            return Self::None;
        }
        if dx.abs() >= dy.abs() {
            if dx > 0.0 {
                Self::Right
            } else {
                Self::Left
            }
        } else if dy > 0.0 {
            Self::Down
        } else {
            Self::Up
        }
    }
}

/// Live classification of one pointer session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct GestureState {
    pub kind: GestureKind,
    /// Instantaneous velocity between the last two samples, px/ms.
    pub velocity: f64,
    /// Straight-line displacement from the origin, px.
    pub distance: f64,
    pub direction: Direction,
}

impl GestureState {
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::neutral()
    }
}

/// Callback the content layer should run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "gesture", rename_all = "snake_case")]
pub enum GestureAction {
    Tap { target: TargetRef },
    Swipe { direction: Direction, target: TargetRef },
    LongPress { target: TargetRef },
}

/// Host-facing callbacks. Every method defaults to doing nothing.
pub trait GestureHandler {
    fn on_tap(&mut self, _target: &TargetRef) {}
    fn on_swipe_left(&mut self, _target: &TargetRef) {}
    fn on_swipe_right(&mut self, _target: &TargetRef) {}
    fn on_swipe_up(&mut self, _target: &TargetRef) {}
    fn on_swipe_down(&mut self, _target: &TargetRef) {}
    fn on_long_press(&mut self, _target: &TargetRef) {}
}

impl GestureAction {
    pub fn target(&self) -> &TargetRef {
        match self {
            Self::Tap { target } | Self::Swipe { target, .. } | Self::LongPress { target } => {
                target
            }
        }
    }

    /// Route this action to the matching handler method.
    pub fn dispatch(&self, handler: &mut dyn GestureHandler) {
        match self {
            Self::Tap { target } => handler.on_tap(target),
            Self::LongPress { target } => handler.on_long_press(target),
            Self::Swipe { direction, target } => match direction {
                Direction::Left => handler.on_swipe_left(target),
                Direction::Right => handler.on_swipe_right(target),
                Direction::Up => handler.on_swipe_up(target),
                Direction::Down => handler.on_swipe_down(target),
                Direction::None => {}
            },
        }
    }
}
