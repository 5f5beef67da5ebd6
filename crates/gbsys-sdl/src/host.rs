//! SDL2 side of the host boundary.

use gbsys_core::axis::HatPosition;
use gbsys_core::config::VideoMode;
use gbsys_core::framebuffer::{ChannelMasks, SurfaceFormat, NATIVE_HEIGHT, NATIVE_WIDTH};
use gbsys_core::host::{
    EventSource, HostEvent, JoystickInfo, Modifiers, VideoHost, Visibility, SURFACE_COUNT,
};
use gbsys_core::SysError;
use sdl2::event::{Event, WindowEvent};
use sdl2::joystick::{HatState, Joystick};
use sdl2::keyboard::{Keycode, Mod};
use sdl2::pixels::{PixelFormatEnum, PixelMasks};
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::surface::Surface;
use sdl2::video::{FullscreenType, Window, WindowContext};
use sdl2::{EventPump, JoystickSubsystem, Sdl, VideoSubsystem};
use tracing::{debug, warn};

const UNKNOWN_SYM: i32 = 0;

struct VideoResources {
    // Never freed implicitly; `close` destroys it while the renderer lives.
    texture: Texture,
    _texture_creator: TextureCreator<WindowContext>,
    canvas: Canvas<Window>,
    surfaces: Vec<Surface<'static>>,
    _video: VideoSubsystem,
}

pub struct SdlHost {
    sdl: Sdl,
    event_pump: EventPump,
    video: Option<VideoResources>,
    locked: [bool; SURFACE_COUNT],
    joystick: Option<(JoystickSubsystem, Joystick)>,
}

impl SdlHost {
    pub fn new(sdl: &Sdl) -> Result<Self, SysError> {
        let event_pump = sdl.event_pump().map_err(SysError::Init)?;
        Ok(Self {
            sdl: sdl.clone(),
            event_pump,
            video: None,
            locked: [false; SURFACE_COUNT],
            joystick: None,
        })
    }
}

fn surface_masks() -> PixelMasks {
    let m = ChannelMasks::ARGB8888;
    PixelMasks {
        bpp: 32,
        rmask: m.r,
        gmask: m.g,
        bmask: m.b,
        amask: m.a,
    }
}

impl VideoHost for SdlHost {
    fn open(&mut self, mode: &VideoMode, title: &str) -> Result<SurfaceFormat, SysError> {
        let video = self.sdl.video().map_err(SysError::Init)?;

        let mut builder = video.window(title, mode.width, mode.height);
        builder.opengl();
        if mode.fullscreen {
            builder.fullscreen();
        }
        let window = builder
            .build()
            .map_err(|e| SysError::Window(e.to_string()))?;

        // The emulator always draws 160x144; magnification happens here.
        let mut canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| SysError::Renderer(e.to_string()))?;
        canvas
            .set_scale(mode.scale as f32, mode.scale as f32)
            .map_err(SysError::Renderer)?;

        let masks = surface_masks();
        let surfaces = (0..SURFACE_COUNT)
            .map(|_| Surface::from_pixelmasks(NATIVE_WIDTH, NATIVE_HEIGHT, &masks))
            .collect::<Result<Vec<_>, _>>()
            .map_err(SysError::Surface)?;

        let texture_creator = canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, NATIVE_WIDTH, NATIVE_HEIGHT)
            .map_err(|e| SysError::Texture(e.to_string()))?;
        texture.set_blend_mode(BlendMode::None);

        self.sdl.mouse().show_cursor(false);

        let front = &surfaces[0];
        let actual = front
            .pixel_format_enum()
            .into_masks()
            .map_err(SysError::Surface)?;
        let format = SurfaceFormat {
            width: front.width(),
            height: front.height(),
            pitch: front.pitch() as usize,
            masks: ChannelMasks {
                r: actual.rmask,
                g: actual.gmask,
                b: actual.bmask,
                a: actual.amask,
            },
        };

        self.video = Some(VideoResources {
            texture,
            _texture_creator: texture_creator,
            canvas,
            surfaces,
            _video: video,
        });
        self.locked = [false; SURFACE_COUNT];
        Ok(format)
    }

    fn lock(&mut self, surface: usize) -> Result<(), SysError> {
        let res = self.video.as_ref().ok_or(SysError::NotInitialized)?;
        // Plain software surfaces (no RLE) can be written without SDL_LockSurface.
        if res.surfaces[surface].must_lock() {
            return Err(SysError::Surface("surface requires SDL locking".into()));
        }
        self.locked[surface] = true;
        Ok(())
    }

    fn pixels_mut(&mut self, surface: usize) -> Option<&mut [u8]> {
        if !self.locked[surface] {
            return None;
        }
        self.video
            .as_mut()
            .and_then(|res| res.surfaces[surface].without_lock_mut())
    }

    fn unlock(&mut self, surface: usize) {
        self.locked[surface] = false;
    }

    fn upload(&mut self, surface: usize) -> Result<(), SysError> {
        let res = self.video.as_mut().ok_or(SysError::NotInitialized)?;
        let src = &res.surfaces[surface];
        let pitch = src.pitch() as usize;
        let texture = &mut res.texture;
        src.with_lock(|pixels| texture.update(None, pixels, pitch))
            .map_err(|e| SysError::Texture(e.to_string()))
    }

    fn present(&mut self) -> Result<(), SysError> {
        let res = self.video.as_mut().ok_or(SysError::NotInitialized)?;
        res.canvas.clear();
        res.canvas
            .copy(&res.texture, None, None)
            .map_err(SysError::Renderer)?;
        res.canvas.present();
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        if let Some(res) = self.video.as_mut() {
            if let Err(e) = res.canvas.window_mut().set_title(title) {
                warn!(error = %e, "can't set window title");
            }
        }
    }

    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<(), SysError> {
        let res = self.video.as_mut().ok_or(SysError::NotInitialized)?;
        let mode = if fullscreen {
            FullscreenType::True
        } else {
            FullscreenType::Off
        };
        res.canvas
            .window_mut()
            .set_fullscreen(mode)
            .map_err(SysError::Window)
    }

    fn close(&mut self) {
        if let Some(res) = self.video.take() {
            // SAFETY: the canvas owning this texture's renderer is still
            // alive in `res` and nothing else references the texture.
            unsafe { res.texture.destroy() };
        }
        self.locked = [false; SURFACE_COUNT];
    }
}

impl EventSource for SdlHost {
    fn next_event(&mut self) -> Option<HostEvent> {
        while let Some(event) = self.event_pump.poll_event() {
            if let Some(event) = translate_event(event) {
                return Some(event);
            }
        }
        None
    }

    fn open_joystick(&mut self) -> Option<JoystickInfo> {
        let subsystem = match self.sdl.joystick() {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "joystick subsystem unavailable");
                return None;
            }
        };
        let count = match subsystem.num_joysticks() {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "can't count joysticks");
                return None;
            }
        };

        // First device that opens wins.
        for index in 0..count {
            match subsystem.open(index) {
                Ok(joystick) => {
                    let info = JoystickInfo {
                        index,
                        name: joystick.name(),
                    };
                    subsystem.set_event_state(true);
                    self.joystick = Some((subsystem, joystick));
                    return Some(info);
                }
                Err(e) => debug!(index, error = %e, "can't open joystick"),
            }
        }
        None
    }

    fn close_joystick(&mut self) {
        self.joystick = None;
    }
}

fn modifiers(keymod: Mod) -> Modifiers {
    let mut mods = Modifiers::empty();
    if keymod.intersects(Mod::LSHIFTMOD | Mod::RSHIFTMOD) {
        mods |= Modifiers::SHIFT;
    }
    if keymod.intersects(Mod::LCTRLMOD | Mod::RCTRLMOD) {
        mods |= Modifiers::CTRL;
    }
    if keymod.intersects(Mod::LALTMOD | Mod::RALTMOD) {
        mods |= Modifiers::ALT;
    }
    if keymod.intersects(Mod::LGUIMOD | Mod::RGUIMOD) {
        mods |= Modifiers::GUI;
    }
    mods
}

fn hat_position(state: HatState) -> HatPosition {
    match state {
        HatState::Centered => HatPosition::Centered,
        HatState::Up => HatPosition::Up,
        HatState::RightUp => HatPosition::RightUp,
        HatState::Right => HatPosition::Right,
        HatState::RightDown => HatPosition::RightDown,
        HatState::Down => HatPosition::Down,
        HatState::LeftDown => HatPosition::LeftDown,
        HatState::Left => HatPosition::Left,
        HatState::LeftUp => HatPosition::LeftUp,
    }
}

// Keys SDL can't name still reach the core, as code 0.
fn keysym(keycode: Option<Keycode>) -> i32 {
    keycode.map_or(UNKNOWN_SYM, |key| key.into_i32())
}

/// Keeps the events the backend cares about and drops the rest.
pub fn translate_event(event: Event) -> Option<HostEvent> {
    match event {
        Event::Window { win_event, .. } => match win_event {
            WindowEvent::Hidden | WindowEvent::Minimized => {
                Some(HostEvent::Window(Visibility::Hidden))
            }
            WindowEvent::Shown | WindowEvent::Restored => {
                Some(HostEvent::Window(Visibility::Shown))
            }
            _ => None,
        },
        Event::KeyDown {
            keycode, keymod, ..
        } => Some(HostEvent::KeyDown {
            sym: keysym(keycode),
            mods: modifiers(keymod),
        }),
        Event::KeyUp { keycode, .. } => Some(HostEvent::KeyUp {
            sym: keysym(keycode),
        }),
        Event::JoyHatMotion { state, .. } => Some(HostEvent::JoyHat(hat_position(state))),
        Event::JoyAxisMotion {
            axis_idx, value, ..
        } => Some(HostEvent::JoyAxis {
            axis: axis_idx,
            value,
        }),
        Event::JoyButtonDown { button_idx, .. } => Some(HostEvent::JoyButtonDown(button_idx)),
        Event::JoyButtonUp { button_idx, .. } => Some(HostEvent::JoyButtonUp(button_idx)),
        Event::Quit { .. } => Some(HostEvent::Quit),
        _ => None,
    }
}
