mod config;
mod tui;

use anyhow::{Context, Result};
use config::ViewerConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::Canvas;
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let config = ViewerConfig::load().context("Failed to load configuration")?;

    init_tracing(&config)?;

    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);

    tracing::info!("Starting germs viewer");
    tracing::info!("Seed: {}", seed);

    if config.headless {
        run_headless(&config, config.canvas()?, &mut rng)
    } else {
        tui::run(&config, &mut rng)
    }
}

fn init_tracing(config: &ViewerConfig) -> Result<()> {
    let filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| "viewer=info,sim=info".into());

    if config.headless {
        // stdout carries the final stats
        tracing_subscriber::registry()
            .with(filter())
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else if let Some(path) = &config.log_file {
        // the terminal view owns the screen, so logs only go to a file
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(filter())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    }

    Ok(())
}

fn run_headless<R: Rng>(config: &ViewerConfig, canvas: Canvas, rng: &mut R) -> Result<()> {
    tracing::info!(
        "Running {} ticks on a {}x{} canvas",
        config.ticks,
        canvas.width(),
        canvas.height()
    );

    let stats = sim::run_simulation(canvas, config.ticks, rng);

    let json = serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?;
    println!("{json}");

    tracing::info!("Simulation completed successfully");
    Ok(())
}
