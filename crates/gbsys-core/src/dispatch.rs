use tracing::{debug, trace};

use crate::axis::{Axis, AxisDebouncer};
use crate::host::{HostEvent, Modifiers, VideoHost, Visibility};
use crate::keymap::KeyMap;
use crate::keys::{EventQueue, InputEvent, KeyCode};
use crate::present::Presentation;

/// Window-side effects of input handling.
pub trait DisplayControl {
    fn set_enabled(&mut self, enabled: bool);
    fn toggle_fullscreen(&mut self);
}

impl<H: VideoHost> DisplayControl for Presentation<H> {
    fn set_enabled(&mut self, enabled: bool) {
        Presentation::set_enabled(self, enabled);
    }

    fn toggle_fullscreen(&mut self) {
        Presentation::toggle_fullscreen(self);
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Poll {
    Continue,
    /// The host asked to quit; the caller terminates the process.
    Quit,
}

/// Routes host events into the core's event queue, one event at a time.
pub struct EventDispatcher {
    keymap: KeyMap,
    axes: AxisDebouncer,
    altenter: bool,
}

impl EventDispatcher {
    pub fn new(keymap: KeyMap, altenter: bool) -> Self {
        Self {
            keymap,
            axes: AxisDebouncer::new(),
            altenter,
        }
    }

    pub fn set_altenter(&mut self, altenter: bool) {
        self.altenter = altenter;
    }

    pub fn reset_axes(&mut self) {
        self.axes.reset();
    }

    pub fn dispatch<D: DisplayControl>(
        &mut self,
        event: HostEvent,
        display: &mut D,
        queue: &mut EventQueue,
    ) -> Poll {
        trace!(?event, "host event");
        match event {
            HostEvent::Window(Visibility::Hidden) => display.set_enabled(false),
            HostEvent::Window(Visibility::Shown) => display.set_enabled(true),

            HostEvent::KeyDown { sym, mods } => {
                let code = self.keymap.map(sym);
                if self.altenter && code == KeyCode::ENTER && mods.contains(Modifiers::ALT) {
                    debug!("alt-enter: toggling fullscreen");
                    display.toggle_fullscreen();
                }
                queue.post(InputEvent::press(code));
            }
            HostEvent::KeyUp { sym } => {
                queue.post(InputEvent::release(self.keymap.map(sym)));
            }

            HostEvent::JoyHat(hat) => self.axes.update_hat(hat, queue),
            HostEvent::JoyAxis { axis, value } => {
                if let Some(axis) = Axis::from_index(axis) {
                    self.axes.update_analog(axis, value, queue);
                }
            }

            HostEvent::JoyButtonDown(button) => {
                if let Some(code) = KeyCode::joy_button(button) {
                    queue.post(InputEvent::press(code));
                }
            }
            HostEvent::JoyButtonUp(button) => {
                if let Some(code) = KeyCode::joy_button(button) {
                    queue.post(InputEvent::release(code));
                }
            }

            HostEvent::Quit => return Poll::Quit,
        }
        Poll::Continue
    }
}
