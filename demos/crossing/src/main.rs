//! crossing: pedestrians approaching a street crossing.
//!
//! Builds a small fleet of single- and multi-mode ados from a JSON scene
//! (or the built-in default), steps it forward by sampling every ado's vPDF,
//! writes positions to CSV and finally prints a mean-velocity forecast for
//! each ado.
//!
//! ```text
//! cargo run -p crossing -- --scene scene.json --out output/crossing
//! RUST_LOG=debug cargo run -p crossing
//! ```

mod output;
mod scene;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ado_dist::VelocityDistribution;
use ado_model::rollout::unroll_mean;
use ado_sim::SimBuilder;

use output::CsvObserver;
use scene::Scene;

// ── Constants ─────────────────────────────────────────────────────────────────

const FORECAST_STEPS: usize = 5;

// ── CLI ───────────────────────────────────────────────────────────────────────

/// Simulate observed pedestrians with discrete-time velocity models.
#[derive(Parser)]
#[command(name = "crossing", version, about)]
struct Cli {
    /// Path to a JSON scene file (uses the built-in scene if not provided).
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Directory for the CSV output.
    #[arg(long, default_value = "output/crossing")]
    out: PathBuf,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // 1. Scene.
    let scene = match &cli.scene {
        Some(path) => Scene::load(path)?,
        None       => Scene::default(),
    };
    let config = scene.config.clone();
    info!(
        listed = scene.ados.len(),
        random = scene.random_walkers,
        steps = config.total_steps,
        dt = config.dt_secs,
        seed = config.seed,
        "scene loaded"
    );

    // 2. Fleet and sim.
    let fleet = scene.build_fleet()?;
    let mut sim = SimBuilder::new(config.clone(), fleet).build()?;

    // 3. Output.
    std::fs::create_dir_all(&cli.out)
        .with_context(|| format!("failed to create {}", cli.out.display()))?;
    let mut obs = CsvObserver::new(&cli.out, config.dt_secs)?;

    // 4. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        warn!("output error: {e}");
    }
    info!(
        secs = elapsed.as_secs_f64(),
        position_rows = obs.position_rows(),
        summary_rows = obs.summary_rows(),
        out = %cli.out.display(),
        "simulation complete"
    );

    // 5. Forecast table.
    println!(
        "{:<8} {:<6} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "Ado", "Modes", "x", "y", "dominant", "x+5", "y+5"
    );
    println!("{}", "-".repeat(66));
    for ado in &sim.ados {
        let vpdf = ado.vpdf_current();
        let forecast = unroll_mean(ado, FORECAST_STEPS, config.dt_secs)?;
        let Some(end) = forecast.last() else { continue };
        println!(
            "{:<8} {:<6} {:>9.3} {:>9.3} {:>9} {:>9.3} {:>9.3}",
            ado.id().0,
            vpdf.mode_count(),
            ado.position().x,
            ado.position().y,
            vpdf.dominant_mode(),
            end.position.x,
            end.position.y,
        );
    }

    Ok(())
}
