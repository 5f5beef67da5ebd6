//! Joystick axis/hat debouncing.
//!
//! Analog axes and digital hats both collapse onto two three-state registers
//! (X and Y). Only transitions reach the event queue.

use crate::keys::{EventQueue, InputEvent, KeyCode};

/// Distance from rest an analog axis must reach before it counts as pushed.
pub const COMMIT_RANGE: i16 = 3276;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Axis {
    X,
    Y,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum AxisState {
    LeftOrUp,
    #[default]
    Centered,
    RightOrDown,
}

impl AxisState {
    /// Quantizes a raw axis reading against [`COMMIT_RANGE`].
    #[inline]
    pub const fn quantize(value: i16) -> Self {
        if value >= COMMIT_RANGE {
            Self::RightOrDown
        } else if value <= -COMMIT_RANGE {
            Self::LeftOrUp
        } else {
            Self::Centered
        }
    }
}

impl Axis {
    /// Pseudo-key held while this axis rests in `state`.
    #[inline]
    pub const fn key(self, state: AxisState) -> Option<KeyCode> {
        match (self, state) {
            (_, AxisState::Centered) => None,
            (Self::X, AxisState::LeftOrUp) => Some(KeyCode::JOY_LEFT),
            (Self::X, AxisState::RightOrDown) => Some(KeyCode::JOY_RIGHT),
            (Self::Y, AxisState::LeftOrUp) => Some(KeyCode::JOY_UP),
            (Self::Y, AxisState::RightOrDown) => Some(KeyCode::JOY_DOWN),
        }
    }

    /// Logical axis for a host axis index; only the first two are used.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HatPosition {
    Centered,
    Up,
    RightUp,
    Right,
    RightDown,
    Down,
    LeftDown,
    Left,
    LeftUp,
}

impl HatPosition {
    /// Axis updates for this hat position, X before Y.
    pub const fn updates(self) -> &'static [(Axis, AxisState)] {
        use AxisState::*;
        match self {
            Self::Centered => &[(Axis::X, Centered), (Axis::Y, Centered)],
            Self::Up => &[(Axis::Y, LeftOrUp)],
            Self::RightUp => &[(Axis::X, RightOrDown), (Axis::Y, LeftOrUp)],
            Self::Right => &[(Axis::X, RightOrDown)],
            Self::RightDown => &[(Axis::X, RightOrDown), (Axis::Y, RightOrDown)],
            Self::Down => &[(Axis::Y, RightOrDown)],
            Self::LeftDown => &[(Axis::X, LeftOrUp), (Axis::Y, RightOrDown)],
            Self::Left => &[(Axis::X, LeftOrUp)],
            Self::LeftUp => &[(Axis::X, LeftOrUp), (Axis::Y, LeftOrUp)],
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AxisDebouncer {
    x: AxisState,
    y: AxisState,
}

impl AxisDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self, axis: Axis) -> AxisState {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Moves `axis` to `new`, posting at most one release then one press.
    pub fn update(&mut self, axis: Axis, new: AxisState, queue: &mut EventQueue) {
        let slot = match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        };
        if *slot == new {
            return;
        }
        if let Some(code) = axis.key(*slot) {
            queue.post(InputEvent::release(code));
        }
        *slot = new;
        if let Some(code) = axis.key(new) {
            queue.post(InputEvent::press(code));
        }
    }

    #[inline]
    pub fn update_analog(&mut self, axis: Axis, value: i16, queue: &mut EventQueue) {
        self.update(axis, AxisState::quantize(value), queue);
    }

    pub fn update_hat(&mut self, hat: HatPosition, queue: &mut EventQueue) {
        for &(axis, state) in hat.updates() {
            self.update(axis, state, queue);
        }
    }

    /// Forgets held directions without posting releases.
    pub fn reset(&mut self) {
        self.x = AxisState::Centered;
        self.y = AxisState::Centered;
    }
}
