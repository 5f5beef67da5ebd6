//! The translation boundary. A host backend (SDL2, headless, ...) turns its
//! native events into [`HostEvent`]s and performs raw surface/renderer work
//! through [`VideoHost`]; everything above this module is host-agnostic.

use bitflags::bitflags;

use crate::axis::HatPosition;
use crate::config::VideoMode;
use crate::error::SysError;
use crate::framebuffer::SurfaceFormat;
use crate::keymap::HostSym;

/// Off-screen surfaces the pipeline alternates between.
pub const SURFACE_COUNT: usize = 2;

bitflags! {
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const GUI = 1 << 3;
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Visibility {
    Hidden,
    Shown,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HostEvent {
    Window(Visibility),
    KeyDown { sym: HostSym, mods: Modifiers },
    KeyUp { sym: HostSym },
    JoyHat(HatPosition),
    JoyAxis { axis: u8, value: i16 },
    JoyButtonDown(u8),
    JoyButtonUp(u8),
    Quit,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JoystickInfo {
    pub index: u32,
    pub name: String,
}

/// Window, renderer, streaming texture and the two surfaces.
///
/// Surface indices are always `< SURFACE_COUNT`.
pub trait VideoHost {
    /// Creates every video resource and reports the layout of the surfaces
    /// that were actually allocated.
    fn open(&mut self, mode: &VideoMode, title: &str) -> Result<SurfaceFormat, SysError>;

    fn lock(&mut self, surface: usize) -> Result<(), SysError>;

    /// Current pixel memory of a locked surface. May move between locks.
    fn pixels_mut(&mut self, surface: usize) -> Option<&mut [u8]>;

    fn unlock(&mut self, surface: usize);

    /// Copies a surface into the streaming texture.
    fn upload(&mut self, surface: usize) -> Result<(), SysError>;

    /// Clear, draw the texture over the whole target, present.
    fn present(&mut self) -> Result<(), SysError>;

    fn set_title(&mut self, title: &str);

    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<(), SysError>;

    /// Releases everything `open` created. Safe to call more than once.
    fn close(&mut self);
}

pub trait EventSource {
    /// Next queued event, never blocking.
    fn next_event(&mut self) -> Option<HostEvent>;

    /// Opens the first usable joystick. Failure just means no joystick.
    fn open_joystick(&mut self) -> Option<JoystickInfo> {
        None
    }

    fn close_joystick(&mut self) {}
}
