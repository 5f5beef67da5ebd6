//! Double-buffered presentation.
//!
//! Two host surfaces alternate as the "front" buffer. The front one is
//! exposed to the emulation core through a [`Frame`] between `begin()` and
//! the end of the frame; ending the frame uploads it to the streaming
//! texture, presents, and flips to the other surface.

use tracing::{debug, info, warn};

use crate::config::SysConfig;
use crate::error::SysError;
use crate::framebuffer::FrameBuffer;
use crate::host::{VideoHost, SURFACE_COUNT};

pub const DEFAULT_TITLE: &str = "gbsys";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PipelineState {
    Uninitialized,
    Ready,
    FrameOpen,
    Closed,
}

pub struct Presentation<H> {
    host: H,
    state: PipelineState,
    front: usize,
    fb: FrameBuffer,
    title: String,
    fullscreen: bool,
    frames: u64,
}

impl<H: VideoHost> Presentation<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            state: PipelineState::Uninitialized,
            front: 0,
            fb: FrameBuffer::default(),
            title: DEFAULT_TITLE.to_string(),
            fullscreen: false,
            frames: 0,
        }
    }

    /// Opens the window and both surfaces. Only the first call does anything.
    pub fn init(&mut self, config: &SysConfig) -> Result<(), SysError> {
        if self.state != PipelineState::Uninitialized {
            warn!(state = ?self.state, "video already initialized");
            return Ok(());
        }

        let mode = config.video_mode();
        let format = self.host.open(&mode, &self.title)?;

        // Make sure the front surface really hands out memory before the
        // core is told it can draw.
        if let Err(e) = self.host.lock(self.front) {
            self.host.close();
            return Err(e);
        }
        let mapped = self.host.pixels_mut(self.front).map(|p| p.len());
        self.host.unlock(self.front);
        match mapped {
            Some(len) if len >= format.pitch * format.height as usize => {}
            _ => {
                self.host.close();
                return Err(SysError::Surface("surface has no usable pixel memory".into()));
            }
        }

        self.fb = FrameBuffer::from_surface(&format);
        self.fullscreen = mode.fullscreen;
        self.front = 0;
        self.state = PipelineState::Ready;

        info!(
            width = mode.width,
            height = mode.height,
            scale = mode.scale,
            fullscreen = mode.fullscreen,
            pitch = format.pitch,
            "video initialized"
        );
        debug!(channels = ?self.fb.channels, alpha_mask = self.fb.alpha_mask, "surface layout");
        Ok(())
    }

    /// Locks the front surface and exposes it until the returned frame ends.
    ///
    /// After `close()` this still succeeds, but the frame has no pixels and
    /// ending it only flips the buffer index.
    pub fn begin(&mut self) -> Result<Frame<'_, H>, SysError> {
        let detached = match self.state {
            PipelineState::Uninitialized => return Err(SysError::NotInitialized),
            PipelineState::Closed => true,
            // FrameOpen is only reachable by leaking a Frame; relock and go on.
            PipelineState::Ready | PipelineState::FrameOpen => {
                self.host.lock(self.front)?;
                false
            }
        };
        self.state = PipelineState::FrameOpen;
        Ok(Frame {
            video: self,
            detached,
        })
    }

    fn end_frame(&mut self, detached: bool) {
        if !detached {
            self.host.unlock(self.front);
            if self.fb.enabled {
                let shown = self
                    .host
                    .upload(self.front)
                    .and_then(|()| self.host.present());
                if let Err(e) = shown {
                    debug!(error = %e, "present failed");
                }
            }
        }
        self.front = (self.front + 1) % SURFACE_COUNT;
        self.frames += 1;
        self.state = if detached {
            PipelineState::Closed
        } else {
            PipelineState::Ready
        };
    }

    pub fn close(&mut self) {
        match self.state {
            PipelineState::Uninitialized | PipelineState::Closed => return,
            PipelineState::Ready | PipelineState::FrameOpen => {}
        }
        self.host.close();
        self.fb.enabled = false;
        self.state = PipelineState::Closed;
        info!(frames = self.frames, "video closed");
    }

    /// Sets the window title. Before `init()` the title is kept for the
    /// window that will be created; after `close()` it is ignored.
    pub fn set_title(&mut self, title: &str) {
        match self.state {
            PipelineState::Closed => {}
            PipelineState::Uninitialized => self.title = title.to_string(),
            PipelineState::Ready | PipelineState::FrameOpen => {
                self.title = title.to_string();
                self.host.set_title(title);
            }
        }
    }

    /// True-colour surfaces have no palette.
    #[inline]
    pub fn set_palette(&mut self, _index: u8, _r: u8, _g: u8, _b: u8) {}

    /// Visibility gating; only meaningful while the window exists.
    pub fn set_enabled(&mut self, enabled: bool) {
        if matches!(
            self.state,
            PipelineState::Ready | PipelineState::FrameOpen
        ) {
            self.fb.enabled = enabled;
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        if matches!(
            self.state,
            PipelineState::Uninitialized | PipelineState::Closed
        ) {
            return;
        }
        self.fullscreen = !self.fullscreen;
        if let Err(e) = self.host.set_fullscreen(self.fullscreen) {
            warn!(error = %e, fullscreen = self.fullscreen, "fullscreen switch failed");
        }
    }

    #[inline]
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Index of the surface the next `begin()` exposes.
    #[inline]
    pub fn front(&self) -> usize {
        self.front
    }

    #[inline]
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.fb
    }

    #[inline]
    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Completed begin/end cycles.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

/// An open frame. The exposed surface is writable only through this handle;
/// dropping it (or calling [`Frame::end`]) ends the frame.
pub struct Frame<'a, H: VideoHost> {
    video: &'a mut Presentation<H>,
    detached: bool,
}

impl<H: VideoHost> Frame<'_, H> {
    #[inline]
    pub fn buffer(&self) -> &FrameBuffer {
        &self.video.fb
    }

    /// Pixel memory of the exposed surface, re-read from the host each call.
    pub fn pixels_mut(&mut self) -> Option<&mut [u8]> {
        if self.detached {
            return None;
        }
        let front = self.video.front;
        self.video.host.pixels_mut(front)
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.video.fb.dirty = true;
    }

    pub fn end(self) {}
}

impl<H: VideoHost> Drop for Frame<'_, H> {
    fn drop(&mut self) {
        self.video.end_frame(self.detached);
    }
}
