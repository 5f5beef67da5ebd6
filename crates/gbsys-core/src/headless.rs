//! In-memory host: no window, scripted input, every call recorded.

use std::collections::VecDeque;

use crate::config::VideoMode;
use crate::error::SysError;
use crate::framebuffer::{ChannelMasks, SurfaceFormat, NATIVE_HEIGHT, NATIVE_WIDTH, PIXEL_SIZE};
use crate::host::{EventSource, HostEvent, JoystickInfo, VideoHost, SURFACE_COUNT};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HostCall {
    Open { mode: VideoMode, title: String },
    Lock(usize),
    Unlock(usize),
    Upload(usize),
    Present,
    SetTitle(String),
    SetFullscreen(bool),
    Close,
    OpenJoystick,
    CloseJoystick,
}

pub struct HeadlessHost {
    masks: ChannelMasks,
    surfaces: Option<[Vec<u8>; SURFACE_COUNT]>,
    locked: [bool; SURFACE_COUNT],
    texture: Vec<u8>,
    events: VecDeque<HostEvent>,
    joystick: Option<JoystickInfo>,
    fail_open: Option<String>,
    fail_lock: bool,
    calls: Vec<HostCall>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self {
            masks: ChannelMasks::ARGB8888,
            surfaces: None,
            locked: [false; SURFACE_COUNT],
            texture: Vec::new(),
            events: VecDeque::new(),
            joystick: None,
            fail_open: None,
            fail_lock: false,
            calls: Vec::new(),
        }
    }

    /// Allocates surfaces with a different channel layout than requested.
    pub fn with_masks(mut self, masks: ChannelMasks) -> Self {
        self.masks = masks;
        self
    }

    pub fn with_joystick(mut self, name: &str) -> Self {
        self.joystick = Some(JoystickInfo {
            index: 0,
            name: name.to_string(),
        });
        self
    }

    /// `open` fails the way a host without a display would.
    pub fn failing(reason: &str) -> Self {
        let mut host = Self::new();
        host.fail_open = Some(reason.to_string());
        host
    }

    /// Opens fine, but surfaces refuse to lock.
    pub fn unlockable() -> Self {
        let mut host = Self::new();
        host.fail_lock = true;
        host
    }

    pub fn push_event(&mut self, event: HostEvent) {
        self.events.push_back(event);
    }

    pub fn push_events<I: IntoIterator<Item = HostEvent>>(&mut self, events: I) {
        self.events.extend(events);
    }

    #[inline]
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn count(&self, call: &HostCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn uploads(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HostCall::Upload(_)))
            .count()
    }

    /// Contents of the streaming texture as of the last upload.
    #[inline]
    pub fn texture(&self) -> &[u8] {
        &self.texture
    }

    #[inline]
    pub fn is_locked(&self, surface: usize) -> bool {
        self.locked[surface]
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.surfaces.is_some()
    }

    fn pitch() -> usize {
        NATIVE_WIDTH as usize * PIXEL_SIZE
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoHost for HeadlessHost {
    fn open(&mut self, mode: &VideoMode, title: &str) -> Result<SurfaceFormat, SysError> {
        self.calls.push(HostCall::Open {
            mode: *mode,
            title: title.to_string(),
        });
        if let Some(reason) = &self.fail_open {
            return Err(SysError::Window(reason.clone()));
        }
        let len = Self::pitch() * NATIVE_HEIGHT as usize;
        self.surfaces = Some([vec![0; len], vec![0; len]]);
        self.texture = vec![0; len];
        Ok(SurfaceFormat {
            width: NATIVE_WIDTH,
            height: NATIVE_HEIGHT,
            pitch: Self::pitch(),
            masks: self.masks,
        })
    }

    fn lock(&mut self, surface: usize) -> Result<(), SysError> {
        self.calls.push(HostCall::Lock(surface));
        if self.surfaces.is_none() {
            return Err(SysError::Surface("lock on closed host".into()));
        }
        if self.fail_lock {
            return Err(SysError::Surface("surface can't be locked".into()));
        }
        self.locked[surface] = true;
        Ok(())
    }

    fn pixels_mut(&mut self, surface: usize) -> Option<&mut [u8]> {
        if !self.locked[surface] {
            return None;
        }
        self.surfaces
            .as_mut()
            .map(|s| s[surface].as_mut_slice())
    }

    fn unlock(&mut self, surface: usize) {
        self.calls.push(HostCall::Unlock(surface));
        self.locked[surface] = false;
    }

    fn upload(&mut self, surface: usize) -> Result<(), SysError> {
        self.calls.push(HostCall::Upload(surface));
        let surfaces = self
            .surfaces
            .as_ref()
            .ok_or_else(|| SysError::Texture("upload on closed host".into()))?;
        self.texture.copy_from_slice(&surfaces[surface]);
        Ok(())
    }

    fn present(&mut self) -> Result<(), SysError> {
        self.calls.push(HostCall::Present);
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        self.calls.push(HostCall::SetTitle(title.to_string()));
    }

    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<(), SysError> {
        self.calls.push(HostCall::SetFullscreen(fullscreen));
        Ok(())
    }

    fn close(&mut self) {
        self.calls.push(HostCall::Close);
        self.surfaces = None;
        self.locked = [false; SURFACE_COUNT];
    }
}

impl EventSource for HeadlessHost {
    fn next_event(&mut self) -> Option<HostEvent> {
        self.events.pop_front()
    }

    fn open_joystick(&mut self) -> Option<JoystickInfo> {
        self.calls.push(HostCall::OpenJoystick);
        self.joystick.clone()
    }

    fn close_joystick(&mut self) {
        self.calls.push(HostCall::CloseJoystick);
    }
}
