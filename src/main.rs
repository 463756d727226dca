use airboard::replay::{self, ReplayScript};
use airboard::render::SummaryRenderer;
use airboard::{Config, InteractionSession};
use anyhow::Context;
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "airboard")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("AIRBOARD_GIT_HASH"), ")"),
    about = "Hand-tracked whiteboard: create boards with a pinch, draw with a fingertip"
)]
struct Cli {
    /// Read settings from this file instead of ~/.config/airboard/config.toml
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Play a recorded hand-tracking script through a session
    #[arg(long, short = 'r', value_name = "FILE", conflicts_with = "demo")]
    replay: Option<PathBuf>,

    /// Play the built-in calibrate-and-draw script
    #[arg(long, short = 'd', action = ArgAction::SetTrue)]
    demo: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long, action = ArgAction::SetTrue)]
    print_config: bool,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Config::load().context("loading config"),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let script = if let Some(path) = &cli.replay {
        ReplayScript::load(path)
            .with_context(|| format!("loading replay script {}", path.display()))?
    } else if cli.demo {
        ReplayScript::demo().context("built-in demo script")?
    } else {
        // No flags: show usage
        println!("airboard: Hand-tracked whiteboard");
        println!();
        println!("Usage:");
        println!("  airboard --demo            Play the built-in calibrate-and-draw script");
        println!("  airboard --replay FILE     Play a recorded hand-tracking script");
        println!("  airboard --print-config    Print the effective configuration");
        println!("  airboard --help            Show help");
        println!();
        println!("Gestures:");
        println!("  - Create a board: hold the support hand's thumb-middle pinch, then drag");
        println!("  - Draw: touch a board with the dominant index fingertip");
        println!("  - Move a board: pinch thumb and index on both hands");
        println!("  - Clear the last board: dominant pinky pinch");
        println!("  - Remove all boards: support pinky pinch");
        return Ok(());
    };

    log::info!(
        "Replaying {} ticks at {} Hz",
        script.total_ticks(),
        script.tick_hz
    );
    let mut session = InteractionSession::new(&config);
    let mut renderer = SummaryRenderer::new(config.surface_style().background);
    let summary = replay::run(&script, &mut session, &mut renderer);

    println!("{summary}");
    for (id, stats) in renderer.boards() {
        println!(
            "{id}: {}x{} px, {} uploads, {} inked pixels",
            stats.width, stats.height, stats.uploads, stats.inked
        );
    }

    Ok(())
}
