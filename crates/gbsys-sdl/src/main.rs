mod audio;
mod demo;
mod host;
mod keymap;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use gbsys_core::config::SysConfig;
use gbsys_core::dispatch::Poll;
use gbsys_core::keys::{EventKind, InputEvent};
use gbsys_core::pcm::{NullPcm, PcmSink};
use gbsys_core::{Sys, SysError};
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::audio::SdlPcm;
use crate::demo::Demo;
use crate::host::SdlHost;
use crate::keymap::sdl_keymap;

const GB_FPS: f64 = 4_194_304.0 / (456.0 * 154.0);
const SAMPLE_RATE_HZ: u32 = 44_100;
const TITLE_INTERVAL: Duration = Duration::from_secs(1);

/// SDL front end for the gbsys platform backend.
#[derive(Parser, Debug)]
#[command(name = "gbsys-sdl", version)]
struct Args {
    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Integer magnification of the 160x144 screen
    #[arg(long)]
    scale: Option<u32>,

    /// Start fullscreen
    #[arg(long)]
    fullscreen: bool,

    /// Don't open a joystick
    #[arg(long)]
    no_joy: bool,

    /// Don't open an audio device
    #[arg(long)]
    no_sound: bool,

    /// -v for debug output, -vv for trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    fn load_config(&self) -> Result<SysConfig, SysError> {
        let mut config = match &self.config {
            Some(path) => SysConfig::load(path)?,
            None => SysConfig::default(),
        };
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        config.fullscreen |= self.fullscreen;
        config.joy &= !self.no_joy;
        config.sound &= !self.no_sound;
        Ok(config)
    }
}

fn open_pcm(sdl: &sdl2::Sdl, config: &SysConfig) -> Box<dyn PcmSink> {
    if !config.sound {
        return Box::new(NullPcm::new(SAMPLE_RATE_HZ));
    }
    match sdl
        .audio()
        .map_err(SysError::Audio)
        .and_then(|audio| SdlPcm::new(&audio, SAMPLE_RATE_HZ))
    {
        Ok(pcm) => {
            debug!(rate = pcm.sample_rate(), "audio queue opened");
            Box::new(pcm)
        }
        Err(e) => {
            warn!(error = %e, "no audio, continuing silent");
            Box::new(NullPcm::new(SAMPLE_RATE_HZ))
        }
    }
}

fn describe(event: Option<InputEvent>) -> String {
    match event {
        Some(InputEvent { kind, code }) => {
            let verb = match kind {
                EventKind::Press => "press",
                EventKind::Release => "release",
            };
            format!("{verb} {}", code.0)
        }
        None => "-".to_owned(),
    }
}

fn run(args: &Args) -> Result<(), SysError> {
    let config = args.load_config()?;
    debug!(?config, "configuration");

    let sdl = sdl2::init().map_err(SysError::Init)?;
    let mut pcm = open_pcm(&sdl, &config);

    let mut sys = Sys::new(SdlHost::new(&sdl)?, sdl_keymap(), config);
    sys.pre_init();
    sys.set_title("gbsys-sdl");
    sys.init()?;

    let (width, height) = {
        let fb = sys.video().frame_buffer();
        (fb.width, fb.height)
    };
    let mut demo = Demo::new(width, height);
    let samples_per_frame = (pcm.sample_rate() as f64 / GB_FPS).round() as usize;
    let mut samples = vec![0i16; samples_per_frame];

    let frame_duration = Duration::from_secs_f64(1.0 / GB_FPS);
    let mut next_frame_at = Instant::now();
    let mut title_since = Instant::now();
    let mut frames_at_title = sys.video().frames();

    loop {
        if sys.poll_events() == Poll::Quit {
            info!("quit requested");
            pcm.close();
            sys.close();
            std::process::exit(0);
        }
        for event in sys.events().drain() {
            demo.apply(event);
        }
        if demo.quit_requested() {
            break;
        }

        demo.step();
        {
            let mut frame = sys.begin_frame()?;
            let fb = frame.buffer().clone();
            if let Some(pixels) = frame.pixels_mut() {
                demo.draw(&fb, pixels);
            }
            frame.mark_dirty();
            frame.end();
        }

        demo.fill_samples(&mut samples, pcm.sample_rate());
        if let Err(e) = pcm.submit(&samples) {
            warn!(error = %e, "audio submit failed");
        }

        let now = Instant::now();
        let elapsed = now - title_since;
        if elapsed >= TITLE_INTERVAL {
            let frames = sys.video().frames();
            let elapsed = elapsed.as_secs_f64();
            let fps = (frames - frames_at_title) as f64 / elapsed;
            sys.set_title(&format!(
                "gbsys-sdl | {fps:.1} fps | {}",
                describe(demo.last_event())
            ));
            frames_at_title = frames;
            title_since = now;
        }

        let now = Instant::now();
        if now < next_frame_at {
            std::thread::sleep(next_frame_at - now);
        }
        next_frame_at += frame_duration;
        if next_frame_at < Instant::now() {
            next_frame_at = Instant::now();
        }
    }

    info!(frames = sys.video().frames(), "shutting down");
    pcm.close();
    sys.close();
    Ok(())
}

fn main() {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("can't install logger: {e}");
    }

    if let Err(e) = run(&args) {
        error!(error = %e, "fatal");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gbsys_core::keys::KeyCode;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from(["gbsys-sdl", "--scale", "4", "--no-joy", "-vv"]);
        let config = args.load_config().unwrap();
        assert_eq!(config.scale, 4);
        assert!(!config.joy);
        assert!(config.sound);
        assert_eq!(args.log_level(), Level::TRACE);
    }

    #[test]
    fn describe_names_the_event() {
        assert_eq!(describe(None), "-");
        assert_eq!(describe(Some(InputEvent::press(KeyCode::JOY0))), "press 512");
    }
}
