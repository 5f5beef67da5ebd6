use std::path::Path;

use serde::Deserialize;

use crate::error::SysError;
use crate::framebuffer::{NATIVE_HEIGHT, NATIVE_WIDTH};

/// Largest integer magnification; 160x144 at 16x is already 2560x2304.
pub const MAX_SCALE: u32 = 16;

/// Backend options, read once before `init()`. Unknown keys are ignored so
/// the same file can carry options for other parts of the emulator.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SysConfig {
    /// Clamped to `1..=MAX_SCALE` when resolved.
    pub scale: u32,
    /// Window size in pixels; a zero in either slot derives both from `scale`.
    pub vmode: [u32; 2],
    pub fullscreen: bool,
    pub altenter: bool,
    pub joy: bool,
    pub sound: bool,
}

impl Default for SysConfig {
    fn default() -> Self {
        Self {
            scale: 1,
            vmode: [0, 0],
            fullscreen: false,
            altenter: true,
            joy: true,
            sound: true,
        }
    }
}

/// Resolved window geometry.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct VideoMode {
    pub width: u32,
    pub height: u32,
    pub scale: u32,
    pub fullscreen: bool,
}

impl SysConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, SysError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, SysError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn video_mode(&self) -> VideoMode {
        let scale = self.scale.clamp(1, MAX_SCALE);
        let (width, height) = match self.vmode {
            [w, h] if w != 0 && h != 0 => (w, h),
            _ => (NATIVE_WIDTH * scale, NATIVE_HEIGHT * scale),
        };
        VideoMode {
            width,
            height,
            scale,
            fullscreen: self.fullscreen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = SysConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, SysConfig::default());
        assert!(cfg.altenter);
        assert!(cfg.joy);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = SysConfig::from_toml_str("scale = 3\njoy = false\nrcfile = \"x\"\n").unwrap();
        assert_eq!(cfg.scale, 3);
        assert!(!cfg.joy);
        assert_eq!(cfg.vmode, [0, 0]);
    }

    #[test]
    fn bad_types_are_rejected() {
        assert!(matches!(
            SysConfig::from_toml_str("scale = \"big\""),
            Err(SysError::Config(_))
        ));
    }

    #[test]
    fn window_size_derives_from_scale() {
        let cfg = SysConfig {
            scale: 3,
            ..SysConfig::default()
        };
        let mode = cfg.video_mode();
        assert_eq!((mode.width, mode.height, mode.scale), (480, 432, 3));
    }

    #[test]
    fn zero_scale_clamps_to_one() {
        let cfg = SysConfig {
            scale: 0,
            ..SysConfig::default()
        };
        let mode = cfg.video_mode();
        assert_eq!((mode.width, mode.height, mode.scale), (160, 144, 1));
    }

    #[test]
    fn huge_scale_clamps_to_max() {
        let cfg = SysConfig {
            scale: 30_000_000,
            ..SysConfig::default()
        };
        let mode = cfg.video_mode();
        assert_eq!(mode.scale, MAX_SCALE);
        assert_eq!((mode.width, mode.height), (160 * MAX_SCALE, 144 * MAX_SCALE));

        let cfg = SysConfig::from_toml_str("scale = 4294967295").unwrap();
        assert_eq!(cfg.video_mode().scale, MAX_SCALE);
    }

    #[test]
    fn explicit_vmode_wins_only_when_complete() {
        let cfg = SysConfig {
            scale: 2,
            vmode: [640, 576],
            fullscreen: true,
            ..SysConfig::default()
        };
        let mode = cfg.video_mode();
        assert_eq!((mode.width, mode.height, mode.scale), (640, 576, 2));
        assert!(mode.fullscreen);

        let half = SysConfig {
            scale: 2,
            vmode: [640, 0],
            ..SysConfig::default()
        };
        assert_eq!(half.video_mode().width, 320);
    }
}
