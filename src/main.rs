//! Tilecraft - headless host
//!
//! Drives the logic module through the reload contract with scripted
//! input and in-memory assets. Useful for soak runs and for watching the
//! frame diagnostics without a window.

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;
use tracing_subscriber::EnvFilter;

use tilecraft::core::config::CoreConfig;
use tilecraft::core::error::Result;
use tilecraft::game::logic_module;
use tilecraft::platform::{InputSnapshot, Key, MemoryAssets};
use tilecraft::reload::{ModuleHost, QueuedLoader};
use tilecraft::render::DrawList;

/// Headless Tilecraft host - runs scripted frames against the logic module
#[derive(Parser, Debug)]
#[command(name = "tilecraft")]
struct Args {
    /// Number of frames to run
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// TOML config file (defaults used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Render height in pixels
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Populate the seeded debug world on start
    #[arg(long)]
    debug_world: bool,

    /// Swap in a fresh module build every N frames
    #[arg(long)]
    reload_every: Option<u64>,

    /// Flush frame diagnostics every N frames
    #[arg(long, default_value_t = 120)]
    diagnostics_every: u64,
}

const DT: f32 = 1.0 / 60.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tilecraft=info")),
        )
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => CoreConfig::load(path)?,
        None => CoreConfig::default(),
    };
    config.debug_world |= args.debug_world;

    tracing::info!("Tilecraft host starting ({} frames)", args.frames);

    let mut assets = MemoryAssets::with_kind_textures(16.0, 16.0);
    let mut host = ModuleHost::new(config)?;
    host.load(logic_module(), &mut assets)?;

    let mut loader = QueuedLoader::new();
    let mut draw = DrawList::new();
    let render_size = Vec2::new(args.width, args.height);

    for n in 0..args.frames {
        if let Some(every) = args.reload_every.filter(|e| *e > 0) {
            if n > 0 && n % every == 0 {
                loader.push(logic_module());
            }
        }
        host.reload_from(&mut loader, &mut assets)?;

        let input = scripted_input(n, render_size);
        let requests = host.frame(&input, &mut assets, &mut draw)?;
        if requests.toggle_maximise {
            tracing::info!("Module asked to toggle maximise");
        }

        if args.diagnostics_every > 0 && (n + 1) % args.diagnostics_every == 0 {
            host.flush_diagnostics()?;
        }
    }

    let state = host.state();
    tracing::info!(
        "Finished after {} frames: {} entities, {} draw commands in the last frame, {} loads",
        state.frame,
        state.entities.active_count(),
        draw.len(),
        host.loads()
    );
    for (kind, count) in state.inventory.iter() {
        tracing::info!("  {}: {}", kind.display_name(), count);
    }

    Ok(())
}

/// Walk right, sweep the cursor around the centre clicking every half
/// second, and cycle through the UI modes.
fn scripted_input(n: u64, render_size: Vec2) -> InputSnapshot {
    let time = n as f64 * DT as f64;
    let angle = time as f32 * 0.8;
    let cursor = render_size * 0.5 + Vec2::new(angle.cos(), angle.sin()) * render_size.y * 0.3;

    let mut input = InputSnapshot::new(render_size, DT)
        .with_time(time)
        .with_mouse(cursor);

    if n < 120 {
        input = input.with_key_down(Key::Right);
    } else if n < 180 {
        input = input.with_key_down(Key::Down).with_key_down(Key::LeftShift);
    }
    if n % 30 == 29 {
        input = input.with_click();
    }
    match n % 400 {
        200 | 260 => input = input.with_key_released(Key::Tab),
        300 | 360 => input = input.with_key_released(Key::C),
        _ => {}
    }
    input
}
