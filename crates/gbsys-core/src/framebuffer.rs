pub const NATIVE_WIDTH: u32 = 160;
pub const NATIVE_HEIGHT: u32 = 144;
pub const PIXEL_SIZE: usize = 4;

/// Channel masks of a 32-bit surface, as reported by the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ChannelMasks {
    pub r: u32,
    pub g: u32,
    pub b: u32,
    pub a: u32,
}

impl ChannelMasks {
    /// 0xAARRGGBB, the layout both surfaces are requested with.
    pub const ARGB8888: Self = Self {
        r: 0x00FF_0000,
        g: 0x0000_FF00,
        b: 0x0000_00FF,
        a: 0xFF00_0000,
    };
}

/// How to squeeze an 8-bit channel into a pixel word:
/// `((value >> loss) << shift)`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ChannelShift {
    pub loss: u8,
    pub shift: u8,
}

impl ChannelShift {
    pub const fn from_mask(mask: u32) -> Self {
        if mask == 0 {
            return Self { loss: 8, shift: 0 };
        }
        let bits = mask.count_ones();
        Self {
            loss: if bits >= 8 { 0 } else { (8 - bits) as u8 },
            shift: mask.trailing_zeros() as u8,
        }
    }

    #[inline]
    pub const fn pack(self, value: u8) -> u32 {
        ((value >> self.loss) as u32) << self.shift
    }
}

/// Layout of the surface that was actually allocated.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SurfaceFormat {
    pub width: u32,
    pub height: u32,
    pub pitch: usize,
    pub masks: ChannelMasks,
}

/// What the emulation core needs to know to draw into the exposed surface.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    /// Bytes per row.
    pub pitch: usize,
    pub pixel_size: usize,
    /// R, G, B.
    pub channels: [ChannelShift; 3],
    pub alpha_mask: u32,
    pub indexed: bool,
    /// Presentation is skipped while false (window hidden or minimized).
    pub enabled: bool,
    pub dirty: bool,
    /// The renderer magnifies; pixel code always draws at native size.
    pub delegate_scaling: bool,
}

impl FrameBuffer {
    pub fn from_surface(format: &SurfaceFormat) -> Self {
        let m = format.masks;
        Self {
            width: format.width,
            height: format.height,
            pitch: format.pitch,
            pixel_size: PIXEL_SIZE,
            channels: [
                ChannelShift::from_mask(m.r),
                ChannelShift::from_mask(m.g),
                ChannelShift::from_mask(m.b),
            ],
            alpha_mask: m.a,
            indexed: false,
            enabled: true,
            dirty: false,
            delegate_scaling: true,
        }
    }

    /// Packs an opaque 8-bit-per-channel colour into a native pixel word.
    #[inline]
    pub fn pack_rgb(&self, r: u8, g: u8, b: u8) -> u32 {
        let [cr, cg, cb] = self.channels;
        cr.pack(r) | cg.pack(g) | cb.pack(b) | self.alpha_mask
    }

    #[inline]
    pub fn byte_len(&self) -> usize {
        self.pitch * self.height as usize
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        let mut fb = Self::from_surface(&SurfaceFormat {
            width: NATIVE_WIDTH,
            height: NATIVE_HEIGHT,
            pitch: NATIVE_WIDTH as usize * PIXEL_SIZE,
            masks: ChannelMasks::ARGB8888,
        });
        fb.enabled = false;
        fb
    }
}
