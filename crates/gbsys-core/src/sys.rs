use tracing::{debug, info};

use crate::config::SysConfig;
use crate::dispatch::{EventDispatcher, Poll};
use crate::error::SysError;
use crate::host::{EventSource, JoystickInfo, VideoHost};
use crate::keymap::KeyMap;
use crate::keys::EventQueue;
use crate::present::{Frame, Presentation};

/// Backend context handed to the frame loop: video pipeline, input
/// dispatcher, the core-facing event queue and the joystick handle.
pub struct Sys<H> {
    video: Presentation<H>,
    dispatcher: EventDispatcher,
    queue: EventQueue,
    config: SysConfig,
    joystick: Option<JoystickInfo>,
}

impl<H: VideoHost + EventSource> Sys<H> {
    pub fn new(host: H, keymap: KeyMap, config: SysConfig) -> Self {
        Self {
            video: Presentation::new(host),
            dispatcher: EventDispatcher::new(keymap, config.altenter),
            queue: EventQueue::new(),
            config,
            joystick: None,
        }
    }

    /// Nothing to prepare before the config is read.
    #[inline]
    pub fn pre_init(&mut self) {}

    pub fn init(&mut self) -> Result<(), SysError> {
        self.video.init(&self.config)?;
        self.dispatcher.reset_axes();

        if self.config.joy {
            self.joystick = self.video.host_mut().open_joystick();
            match &self.joystick {
                Some(joy) => info!(index = joy.index, name = %joy.name, "joystick opened"),
                None => debug!("no joystick, joystick input disabled"),
            }
        }
        Ok(())
    }

    pub fn begin_frame(&mut self) -> Result<Frame<'_, H>, SysError> {
        self.video.begin()
    }

    /// Drains every pending host event into the event queue. Stops early
    /// only on a quit request.
    pub fn poll_events(&mut self) -> Poll {
        while let Some(event) = self.video.host_mut().next_event() {
            if self
                .dispatcher
                .dispatch(event, &mut self.video, &mut self.queue)
                == Poll::Quit
            {
                return Poll::Quit;
            }
        }
        Poll::Continue
    }

    /// The queue the emulation core drains.
    #[inline]
    pub fn events(&mut self) -> &mut EventQueue {
        &mut self.queue
    }

    pub fn set_title(&mut self, title: &str) {
        self.video.set_title(title);
    }

    #[inline]
    pub fn set_palette(&mut self, index: u8, r: u8, g: u8, b: u8) {
        self.video.set_palette(index, r, g, b);
    }

    pub fn close(&mut self) {
        if self.joystick.take().is_some() {
            self.video.host_mut().close_joystick();
        }
        self.video.close();
    }

    #[inline]
    pub fn video(&self) -> &Presentation<H> {
        &self.video
    }

    #[inline]
    pub fn video_mut(&mut self) -> &mut Presentation<H> {
        &mut self.video
    }

    #[inline]
    pub fn joystick(&self) -> Option<&JoystickInfo> {
        self.joystick.as_ref()
    }
}
