use std::collections::VecDeque;

use tracing::{trace, warn};

/// Internal key identifier handed to the emulation core.
///
/// - 1..=127: ASCII (printable keys use their own character code)
/// - 256..: named keys and keypad
/// - 512..=527: joystick buttons 0-15
/// - 528..=531: joystick direction pseudo-keys
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const NONE: Self = Self(0);

    pub const BACKSPACE: Self = Self(8);
    pub const TAB: Self = Self(9);
    pub const ENTER: Self = Self(13);
    pub const ESC: Self = Self(27);
    pub const SPACE: Self = Self(32);
    pub const DELETE: Self = Self(127);

    pub const SHIFT: Self = Self(256);
    pub const CTRL: Self = Self(257);
    pub const ALT: Self = Self(258);
    pub const UP: Self = Self(259);
    pub const DOWN: Self = Self(260);
    pub const RIGHT: Self = Self(261);
    pub const LEFT: Self = Self(262);
    pub const INS: Self = Self(263);
    pub const HOME: Self = Self(264);
    pub const END: Self = Self(265);
    pub const PRIOR: Self = Self(266);
    pub const NEXT: Self = Self(267);
    pub const CAPS: Self = Self(268);
    pub const NUMLOCK: Self = Self(269);
    pub const SCROLL: Self = Self(270);
    pub const PAUSE: Self = Self(271);

    pub const F1: Self = Self(272);
    pub const F2: Self = Self(273);
    pub const F3: Self = Self(274);
    pub const F4: Self = Self(275);
    pub const F5: Self = Self(276);
    pub const F6: Self = Self(277);
    pub const F7: Self = Self(278);
    pub const F8: Self = Self(279);
    pub const F9: Self = Self(280);
    pub const F10: Self = Self(281);
    pub const F11: Self = Self(282);
    pub const F12: Self = Self(283);

    pub const NUM0: Self = Self(288);
    pub const NUM1: Self = Self(289);
    pub const NUM2: Self = Self(290);
    pub const NUM3: Self = Self(291);
    pub const NUM4: Self = Self(292);
    pub const NUM5: Self = Self(293);
    pub const NUM6: Self = Self(294);
    pub const NUM7: Self = Self(295);
    pub const NUM8: Self = Self(296);
    pub const NUM9: Self = Self(297);
    pub const NUMPLUS: Self = Self(298);
    pub const NUMMINUS: Self = Self(299);
    pub const NUMMUL: Self = Self(300);
    pub const NUMDIV: Self = Self(301);
    pub const NUMDOT: Self = Self(302);
    pub const NUMENTER: Self = Self(303);

    pub const JOY0: Self = Self(512);
    pub const JOY_BUTTONS: u8 = 16;
    pub const JOY_UP: Self = Self(528);
    pub const JOY_DOWN: Self = Self(529);
    pub const JOY_LEFT: Self = Self(530);
    pub const JOY_RIGHT: Self = Self(531);

    /// Pseudo-key for a joystick button, `None` past the supported range.
    #[inline]
    pub const fn joy_button(index: u8) -> Option<Self> {
        if index < Self::JOY_BUTTONS {
            Some(Self(Self::JOY0.0 + index as u16))
        } else {
            None
        }
    }

    #[inline]
    pub const fn from_ascii(c: u8) -> Self {
        Self(c as u16)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EventKind {
    Press,
    Release,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct InputEvent {
    pub kind: EventKind,
    pub code: KeyCode,
}

impl InputEvent {
    #[inline]
    pub const fn press(code: KeyCode) -> Self {
        Self {
            kind: EventKind::Press,
            code,
        }
    }

    #[inline]
    pub const fn release(code: KeyCode) -> Self {
        Self {
            kind: EventKind::Release,
            code,
        }
    }
}

pub const EVENT_QUEUE_CAPACITY: usize = 256;

/// FIFO of internal events, filled by the backend and drained by the core.
pub struct EventQueue {
    events: VecDeque<InputEvent>,
    capacity: usize,
    dropped: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::with_capacity(EVENT_QUEUE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Appends an event. Returns false (and drops it) when the queue is full.
    pub fn post(&mut self, event: InputEvent) -> bool {
        if self.events.len() >= self.capacity {
            self.dropped += 1;
            warn!(?event, dropped = self.dropped, "event queue full, dropping event");
            return false;
        }
        trace!(?event, "post");
        self.events.push_back(event);
        true
    }

    #[inline]
    pub fn pop(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joy_button_codes_cover_sixteen_buttons() {
        assert_eq!(KeyCode::joy_button(0), Some(KeyCode::JOY0));
        assert_eq!(KeyCode::joy_button(15), Some(KeyCode(527)));
        assert_eq!(KeyCode::joy_button(16), None);
        assert_eq!(KeyCode::joy_button(255), None);
    }

    #[test]
    fn queue_is_fifo() {
        let mut q = EventQueue::new();
        q.post(InputEvent::press(KeyCode::UP));
        q.post(InputEvent::release(KeyCode::UP));

        assert_eq!(q.pop(), Some(InputEvent::press(KeyCode::UP)));
        assert_eq!(q.pop(), Some(InputEvent::release(KeyCode::UP)));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn full_queue_drops_and_counts() {
        let mut q = EventQueue::with_capacity(2);
        assert!(q.post(InputEvent::press(KeyCode::JOY0)));
        assert!(q.post(InputEvent::press(KeyCode::ENTER)));
        assert!(!q.post(InputEvent::press(KeyCode::ESC)));

        assert_eq!(q.len(), 2);
        assert_eq!(q.dropped(), 1);
        let drained: Vec<_> = q.drain().collect();
        assert_eq!(drained[1].code, KeyCode::ENTER);
        assert!(q.is_empty());
    }
}
