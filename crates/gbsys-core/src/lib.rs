//! Host-agnostic platform backend for the emulator front end: key mapping,
//! joystick debouncing, event dispatch and the double-buffered presentation
//! pipeline.

pub mod axis;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod framebuffer;
pub mod headless;
pub mod host;
pub mod keymap;
pub mod keys;
pub mod pcm;
pub mod present;
pub mod sys;

pub use error::SysError;
pub use sys::Sys;
