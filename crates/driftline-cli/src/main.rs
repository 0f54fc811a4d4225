use clap::{Parser, Subcommand};
use colored::Colorize;
use driftline_core::{Direction, InputAdapter, TrajectoryEngine};
use std::path::PathBuf;

mod script;

/// Driftline CLI - replay edit scripts and inspect session trajectories
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an edit script (JSON array of operations) through the core
    Replay {
        /// Path to the script file
        script: PathBuf,

        /// Write the trajectory artifact to this path after replay
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,

        /// How many future states to predict
        #[arg(long, default_value_t = 3)]
        lookahead: usize,

        /// Output the summary as JSON for integrations
        #[arg(long)]
        json: bool,
    },

    /// Run the built-in demo session (draft, pivot, converge)
    Demo {
        /// Write the trajectory artifact to this path after the demo
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            script,
            export,
            lookahead,
            json,
        } => {
            let ops = script::load(&script)?;
            let mut adapter = InputAdapter::new();
            let mut engine = TrajectoryEngine::new();
            let applied = script::replay(&ops, &mut adapter, &mut engine)?;

            if json {
                println!("{}", serde_json::to_string(&engine.summary())?);
            } else {
                println!("Replayed {} of {} operations", applied, ops.len());
                print_report(&adapter, &engine, lookahead);
            }

            if let Some(path) = export {
                engine.export(&path)?;
                println!("Trajectory exported to {}", path.display());
            }
        }
        Commands::Demo { export } => {
            let mut adapter = InputAdapter::new();
            let mut engine = TrajectoryEngine::new();
            script::replay(&script::demo_script(), &mut adapter, &mut engine)?;

            print_report(&adapter, &engine, 3);

            if let Some(path) = export {
                engine.export(&path)?;
                println!("Trajectory exported to {}", path.display());
            }
        }
    }

    Ok(())
}

fn print_report(adapter: &InputAdapter, engine: &TrajectoryEngine, lookahead: usize) {
    let summary = engine.summary();
    let state = engine.current_state();

    println!();
    println!("{}", "SESSION".bold());
    println!("  content: {} chars", adapter.content().chars().count());
    println!("  events: {}", adapter.event_count());
    println!("  velocity: {:.1} chars/s", adapter.typing_velocity());
    println!("  intensity: {:.1} edits/s", adapter.edit_intensity());

    println!();
    println!("{}", "TRAJECTORY".bold());
    println!("  direction: {}", paint(summary.current_direction));
    println!("  confidence: {:.2}", state.confidence);
    println!("  points: {}", summary.total_points);
    println!("  segments: {}", summary.total_segments);
    println!("  health: {:.2}", summary.trajectory_health);

    for segment in &summary.recent_segments {
        println!(
            "    {} x{} (avg confidence {:.2})",
            paint(segment.dominant_direction),
            segment.points.len(),
            segment.avg_confidence,
        );
    }

    println!();
    println!("{}", "PREDICTIONS".bold());
    for prediction in engine.predict_next_states(lookahead) {
        println!(
            "  {} {} (p={:.2})",
            paint(prediction.direction),
            prediction.description,
            prediction.probability,
        );
    }
}

fn paint(direction: Direction) -> colored::ColoredString {
    let label = direction.to_string();
    match direction {
        Direction::Expanding => label.green(),
        Direction::Converging => label.blue(),
        Direction::Pivoting => label.yellow(),
        Direction::Stable => label.cyan(),
        Direction::Uncertain => label.dimmed(),
    }
}
