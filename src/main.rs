use std::io::{Read, Write};

use anyhow::Context;
use tilecanvas::audio::{DropSound, Playback, PlaybackError};
use tilecanvas::canvas::gesture::GestureRouter;
use tilecanvas::canvas::CanvasController;
use tilecanvas::config::types::Config;
use tilecanvas::geometry::Rect;
use tilecanvas::script::{format_tiles, parse_script, replay};

fn main() {
    env_logger::init();
    log::info!("tilecanvas v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run() {
        log::error!("{e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Load config from XDG path or use defaults
    let config_path = dirs_config_path();
    let config = match Config::load(&config_path) {
        Ok(cfg) => {
            log::info!("Config loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            log::warn!("Config load error ({}), using defaults", e);
            Config::default()
        }
    };

    let source = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading script {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading script from stdin")?;
            buf
        }
    };
    let commands = parse_script(&source, &config.palette.palette)?;
    log::info!("Replaying {} scripted events", commands.len());

    let bell = Box::new(TerminalBell { volume: 0.0 });
    let sound = DropSound::new(bell, config.audio.volume, config.audio.muted);
    let mut controller = CanvasController::new(sound);
    let mut router = GestureRouter::new();
    router.set_frame(&mut controller, Rect::from_size(config.canvas.size()));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    replay(&commands, &mut router, &mut controller, &mut out)?;
    write!(out, "{}", format_tiles(&controller))?;
    Ok(())
}

/// Drop sound for a terminal: rings the bell unless muted.
struct TerminalBell {
    volume: f32,
}

impl Playback for TerminalBell {
    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.volume <= 0.0 {
            return Ok(());
        }
        let mut stderr = std::io::stderr();
        stderr
            .write_all(b"\x07")
            .and_then(|_| stderr.flush())
            .map_err(|e| PlaybackError::Device(e.to_string()))
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }
}

/// Get the config file path (~/.config/tilecanvas/config.toml).
fn dirs_config_path() -> std::path::PathBuf {
    dirs_home()
        .join(".config")
        .join("tilecanvas")
        .join("config.toml")
}

/// Get the user's home directory.
fn dirs_home() -> std::path::PathBuf {
    std::env::var("HOME")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("."))
}
