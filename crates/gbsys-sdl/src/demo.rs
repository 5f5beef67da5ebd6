//! Stand-in for the emulation core: consumes the event queue, moves a
//! cursor over a test pattern and beeps while fire is held.

use std::collections::BTreeSet;

use gbsys_core::framebuffer::FrameBuffer;
use gbsys_core::keys::{EventKind, InputEvent, KeyCode};

const CURSOR_SIZE: u32 = 8;
const TONE_HZ: u32 = 440;
const TONE_AMPLITUDE: i16 = 4000;

pub struct Demo {
    held: BTreeSet<KeyCode>,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    last: Option<InputEvent>,
    phase: u32,
    quit: bool,
}

impl Demo {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            held: BTreeSet::new(),
            x: width.saturating_sub(CURSOR_SIZE) / 2,
            y: height.saturating_sub(CURSOR_SIZE) / 2,
            width,
            height,
            last: None,
            phase: 0,
            quit: false,
        }
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event.kind {
            EventKind::Press => {
                if event.code == KeyCode::ESC {
                    self.quit = true;
                }
                self.held.insert(event.code);
            }
            EventKind::Release => {
                self.held.remove(&event.code);
            }
        }
        self.last = Some(event);
    }

    fn holding(&self, keys: [KeyCode; 2]) -> bool {
        keys.iter().any(|k| self.held.contains(k))
    }

    /// One emulated frame: move the cursor one pixel per held direction.
    pub fn step(&mut self) {
        let max_x = self.width.saturating_sub(CURSOR_SIZE);
        let max_y = self.height.saturating_sub(CURSOR_SIZE);
        if self.holding([KeyCode::LEFT, KeyCode::JOY_LEFT]) {
            self.x = self.x.saturating_sub(1);
        }
        if self.holding([KeyCode::RIGHT, KeyCode::JOY_RIGHT]) {
            self.x = (self.x + 1).min(max_x);
        }
        if self.holding([KeyCode::UP, KeyCode::JOY_UP]) {
            self.y = self.y.saturating_sub(1);
        }
        if self.holding([KeyCode::DOWN, KeyCode::JOY_DOWN]) {
            self.y = (self.y + 1).min(max_y);
        }
    }

    #[inline]
    pub fn cursor(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    #[inline]
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    #[inline]
    pub fn last_event(&self) -> Option<InputEvent> {
        self.last
    }

    pub fn tone_on(&self) -> bool {
        self.holding([KeyCode::JOY0, KeyCode::from_ascii(b'z')])
    }

    /// Square wave while fire is held, silence otherwise.
    pub fn fill_samples(&mut self, out: &mut [i16], sample_rate: u32) {
        if !self.tone_on() || sample_rate == 0 {
            out.fill(0);
            self.phase = 0;
            return;
        }
        let half_period = (sample_rate / (TONE_HZ * 2)).max(1);
        for sample in out.iter_mut() {
            *sample = if (self.phase / half_period) % 2 == 0 {
                TONE_AMPLITUDE
            } else {
                -TONE_AMPLITUDE
            };
            self.phase = self.phase.wrapping_add(1);
        }
    }

    /// Draws the pattern with the frame buffer's own channel layout.
    pub fn draw(&self, fb: &FrameBuffer, pixels: &mut [u8]) {
        let background = [
            fb.pack_rgb(0xE0, 0xF8, 0xD0),
            fb.pack_rgb(0x88, 0xC0, 0x70),
            fb.pack_rgb(0x34, 0x68, 0x56),
            fb.pack_rgb(0x08, 0x18, 0x20),
        ];
        let cursor = fb.pack_rgb(0xFF, 0x20, 0x20);

        for (y, row) in pixels.chunks_exact_mut(fb.pitch).take(fb.height as usize).enumerate() {
            let y = y as u32;
            let band = background[(y * 4 / fb.height.max(1)) as usize % 4];
            for (x, px) in row
                .chunks_exact_mut(fb.pixel_size)
                .take(fb.width as usize)
                .enumerate()
            {
                let x = x as u32;
                let inside = x >= self.x
                    && x < self.x + CURSOR_SIZE
                    && y >= self.y
                    && y < self.y + CURSOR_SIZE;
                let value = if inside { cursor } else { band };
                px.copy_from_slice(&value.to_ne_bytes()[..fb.pixel_size]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_directions_move_cursor_within_bounds() {
        let mut demo = Demo::new(160, 144);
        assert_eq!(demo.cursor(), (76, 68));

        demo.apply(InputEvent::press(KeyCode::JOY_RIGHT));
        demo.apply(InputEvent::press(KeyCode::UP));
        demo.step();
        assert_eq!(demo.cursor(), (77, 67));

        for _ in 0..500 {
            demo.step();
        }
        assert_eq!(demo.cursor(), (152, 0));

        demo.apply(InputEvent::release(KeyCode::JOY_RIGHT));
        demo.step();
        assert_eq!(demo.cursor(), (152, 0));
    }

    #[test]
    fn escape_requests_quit() {
        let mut demo = Demo::new(160, 144);
        demo.apply(InputEvent::press(KeyCode::ESC));
        assert!(demo.quit_requested());
        assert_eq!(demo.last_event(), Some(InputEvent::press(KeyCode::ESC)));
    }

    #[test]
    fn tone_follows_fire_button() {
        let mut demo = Demo::new(160, 144);
        let mut buf = [1i16; 64];

        demo.fill_samples(&mut buf, 44_100);
        assert!(buf.iter().all(|&s| s == 0));

        demo.apply(InputEvent::press(KeyCode::JOY0));
        demo.fill_samples(&mut buf, 44_100);
        assert!(buf.iter().all(|&s| s.abs() == TONE_AMPLITUDE));
        assert!(buf.contains(&TONE_AMPLITUDE));
        assert!(buf.contains(&-TONE_AMPLITUDE));
    }

    #[test]
    fn draw_marks_cursor_pixels() {
        let fb = FrameBuffer::default();
        let mut pixels = vec![0u8; fb.byte_len()];
        let demo = Demo::new(fb.width, fb.height);
        demo.draw(&fb, &mut pixels);

        let at = |x: usize, y: usize| {
            let o = y * fb.pitch + x * fb.pixel_size;
            u32::from_ne_bytes(pixels[o..o + 4].try_into().unwrap())
        };
        assert_eq!(at(76, 68), fb.pack_rgb(0xFF, 0x20, 0x20));
        assert_eq!(at(0, 0), fb.pack_rgb(0xE0, 0xF8, 0xD0));
        assert_eq!(at(0, 143), fb.pack_rgb(0x08, 0x18, 0x20));
    }
}
