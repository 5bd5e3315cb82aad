//! termtrace - a CPU ray tracer that renders to the terminal
//!
//! Controls:
//! - W/S: Move forward/back
//! - A/D: Move left/right
//! - Space/X: Move up/down
//! - Arrows or mouse: Look around
//! - O: Toggle the scripted orbit
//! - P: Pause
//! - R: Reset camera
//! - Q or Escape: Quit

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use termtrace::config::{LoadedScene, SceneFile};
use termtrace::controls::{apply_action, Action};
use termtrace::terminal::{encode_halfblock, parse_event, MouseLook, TerminalDisplay};
use termtrace::{FrameBuffer, Renderer};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser)]
#[command(name = "termtrace")]
#[command(version)]
#[command(about = "Ray trace spheres, planes and boxes in the terminal")]
#[command(long_about = "
termtrace renders a small scene of primitives lit by directional lights,
one ray per sample, and draws the result with 24-bit colored half blocks.

Example usage:
  termtrace run --orbit
  termtrace --scene scene.yaml record --frames 180 --output orbit.ans
  termtrace --scene scene.yaml check
")]
struct Cli {
    /// Scene file (YAML); the built-in showcase scene when omitted
    #[arg(short, long, global = true)]
    scene: Option<PathBuf>,

    /// Set logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive view (default)
    Run {
        /// Start with the scripted orbit running
        #[arg(long)]
        orbit: bool,
        /// Frame rate cap
        #[arg(long, default_value_t = 30)]
        fps: u32,
    },

    /// Render orbit frames to a file that can be replayed with `cat`
    Record {
        /// Number of frames
        #[arg(short, long, default_value_t = 180)]
        frames: usize,
        /// Output file
        #[arg(short, long, default_value = "orbit.ans")]
        output: PathBuf,
        /// Samples per row
        #[arg(long, default_value_t = 120)]
        width: usize,
        /// Sample rows (two per terminal line)
        #[arg(long, default_value_t = 72)]
        height: usize,
    },

    /// Validate the scene file and print a summary
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level_filter = if let Some(level) = cli.log_level {
        level.to_string()
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
            .to_string()
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&level_filter))
        .with_writer(std::io::stderr)
        .init();

    let scene_file = load_scene_file(cli.scene.as_deref())?;

    match cli.command.unwrap_or(Commands::Run { orbit: false, fps: 30 }) {
        Commands::Run { orbit, fps } => run_interactive(&scene_file, orbit, fps),
        Commands::Record {
            frames,
            output,
            width,
            height,
        } => record(&scene_file, frames, &output, width, height),
        Commands::Check => check(&scene_file),
    }
}

fn load_scene_file(path: Option<&Path>) -> Result<SceneFile> {
    match path {
        Some(path) => {
            tracing::info!("Loading scene from {:?}", path);
            SceneFile::from_file(path).with_context(|| format!("loading scene {}", path.display()))
        }
        None => Ok(SceneFile::showcase()),
    }
}

fn run_interactive(scene_file: &SceneFile, start_orbit: bool, fps: u32) -> Result<()> {
    let LoadedScene {
        scene,
        camera: initial_camera,
        render,
        orbit,
    } = scene_file.build().context("building scene")?;

    let mut terminal = TerminalDisplay::new().context("initializing terminal")?;
    let renderer = Renderer::new(render);
    let (width, height) = terminal.sample_size();
    let mut frame = FrameBuffer::new(width, height);

    let mut camera = initial_camera;
    let mut mouse = MouseLook::new();
    let mut orbiting = start_orbit && orbit.is_some();
    let mut paused = false;
    let mut frame_index = 0usize;

    let frame_time = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
    let mut last_frame: Option<Instant> = None;

    tracing::debug!(width, height, orbiting, "Starting interactive view");

    'main_loop: loop {
        if terminal.check_resize() {
            let (width, height) = terminal.sample_size();
            frame.resize(width, height);
            tracing::debug!(width, height, "Terminal resized");
        }

        for event in terminal.drain_events().context("reading input")? {
            match parse_event(event, &mut mouse) {
                Action::Quit => break 'main_loop,
                Action::Pause => paused = !paused,
                Action::ToggleOrbit => orbiting = !orbiting && orbit.is_some(),
                Action::Reset => {
                    camera = initial_camera;
                    frame_index = 0;
                }
                action if action.steers_camera() && !orbiting => apply_action(&mut camera, action),
                _ => {}
            }
        }

        // Throttle rendering; input is still drained while waiting
        let due = last_frame.map_or(true, |t| t.elapsed() >= frame_time);
        if paused || !due {
            std::thread::sleep(Duration::from_millis(5));
            continue;
        }
        last_frame = Some(Instant::now());

        if let (true, Some(path)) = (orbiting, &orbit) {
            path.apply(&mut camera, frame_index);
        }

        renderer.render(&camera, &scene, &mut frame);
        let content = encode_halfblock(&frame);

        let status = format!(
            "Pos ({:.1}, {:.1}, {:.1}) Yaw {:.1} Pitch {:.1} | [WASD/Space/X] Move  [Arrows/Mouse] Look  [O]rbit {}  [P]ause  [R]eset  [Q]uit",
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.yaw_degrees,
            camera.pitch_degrees,
            if orbiting { "on" } else { "off" },
        );

        if let Err(e) = terminal.render(&content, &status) {
            if e.kind() == std::io::ErrorKind::BrokenPipe {
                break;
            }
            tracing::warn!(error = %e, "Render error");
        }

        frame_index += 1;
    }

    Ok(())
}

/// Render `frames` orbit frames, one independent pass per frame
fn record(scene_file: &SceneFile, frames: usize, output: &Path, width: usize, height: usize) -> Result<()> {
    let loaded = scene_file.build().context("building scene")?;
    let orbit = loaded.orbit.unwrap_or_default();
    let renderer = Renderer::new(loaded.render);

    tracing::info!(frames, width, height, output = %output.display(), "Recording orbit");
    let start = Instant::now();

    let encoded: Vec<String> = (0..frames)
        .into_par_iter()
        .map(|index| {
            let mut camera = loaded.camera;
            orbit.apply(&mut camera, index);
            let frame = renderer.render_frame(&camera, &loaded.scene, width, height);
            // Home the cursor so each frame overdraws the last when replayed
            format!("\x1b[H{}", encode_halfblock(&frame))
        })
        .collect();

    let mut data = String::from("\x1b[2J");
    for frame in &encoded {
        data.push_str(frame);
    }
    std::fs::write(output, data).with_context(|| format!("writing {}", output.display()))?;

    tracing::info!(
        frames,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Wrote {}",
        output.display()
    );
    Ok(())
}

fn check(scene_file: &SceneFile) -> Result<()> {
    let loaded = scene_file.build().context("scene is invalid")?;

    println!("✓ Scene is valid\n");
    println!("Camera:");
    println!(
        "  Position: ({}, {}, {})",
        loaded.camera.position.x, loaded.camera.position.y, loaded.camera.position.z
    );
    println!("  Yaw: {}  Pitch: {}", loaded.camera.yaw_degrees, loaded.camera.pitch_degrees);
    println!("\nRender:");
    println!("  FOV: {}", loaded.render.fov_degrees);
    println!("  Shininess: {}", loaded.render.shininess);
    println!("\nPrimitives: {}", loaded.scene.primitives.len());
    for primitive in &loaded.scene.primitives {
        println!("  {:?}", primitive);
    }
    println!("\nLights: {}", loaded.scene.lights.len());
    match loaded.orbit {
        Some(orbit) => println!(
            "\nOrbit: radius {} at {}°/frame",
            orbit.radius, orbit.degrees_per_frame
        ),
        None => println!("\nOrbit: none"),
    }
    Ok(())
}
