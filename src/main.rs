use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use snake_evo::utils::seeded_rng;
use snake_evo::{GameTrace, TrainingConfig, run_generations};

#[derive(Parser)]
#[command(name = "snake_evo")]
#[command(version)]
#[command(about = "Evolves a small neural network to play Snake with a genetic algorithm")]
struct Cli {
    /// Training configuration (JSON); flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of generations to run
    #[arg(short, long, default_value = "100")]
    generations: usize,

    #[arg(long)]
    population_size: Option<usize>,

    #[arg(long)]
    keep_fraction: Option<f64>,

    #[arg(long)]
    mutation_rate: Option<f64>,

    #[arg(long)]
    mutation_scale: Option<f64>,

    #[arg(long)]
    board_size: Option<i32>,

    /// Games averaged per fitness evaluation
    #[arg(long)]
    plays: Option<usize>,

    #[arg(long)]
    max_steps: Option<usize>,

    #[arg(long)]
    stall_steps: Option<usize>,

    /// Never cut a game short for not eating
    #[arg(long, conflicts_with = "stall_steps")]
    no_stall: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Stop once the best fitness is at or below this value
    #[arg(long, allow_negative_numbers = true)]
    target_fitness: Option<f64>,

    /// Replay the best network once and write the game as JSON
    #[arg(long)]
    trace: Option<PathBuf>,
}

impl Cli {
    fn training_config(&self) -> Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => TrainingConfig::default(),
        };
        if let Some(v) = self.population_size { config.population_size = v; }
        if let Some(v) = self.keep_fraction { config.keep_fraction = v; }
        if let Some(v) = self.mutation_rate { config.mutation_rate = v; }
        if let Some(v) = self.mutation_scale { config.mutation_scale = v; }
        if let Some(v) = self.board_size { config.board_size = v; }
        if let Some(v) = self.plays { config.plays = v; }
        if let Some(v) = self.max_steps { config.max_steps = v; }
        if let Some(v) = self.stall_steps { config.stall_steps = Some(v); }
        if self.no_stall { config.stall_steps = None; }
        if let Some(v) = self.seed { config.seed = Some(v); }
        if let Some(v) = self.target_fitness { config.target_fitness = Some(v); }
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<TrainingConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing config {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.training_config()?;
    log::info!("starting run: {:?}", config);

    let mut trainer = run_generations(config, cli.generations).context("invalid training setup")?;

    // one JSON line per generation on stdout, logs go to stderr
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for stats in trainer.by_ref() {
        let stats = stats?;
        serde_json::to_writer(&mut out, &stats)?;
        writeln!(out)?;
    }

    if let Some(path) = &cli.trace {
        let best = trainer.best().context("no generation was evaluated")?;
        let mut rng = seeded_rng(trainer.config().seed);
        let trace = trainer.evaluator().play_recorded(&best.genome.weights, &mut rng)?;
        write_trace(path, &trace)?;
        log::info!(
            "replay of the best network: {} steps, length {}, written to {}",
            trace.steps(),
            trace.final_state().body.len(),
            path.display()
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct TraceFile {
    width: i32,
    height: i32,
    steps: Vec<TraceStep>,
}

#[derive(Serialize)]
struct TraceStep {
    comment: String,
    pts: Vec<TracePoint>,
}

#[derive(Serialize)]
struct TracePoint {
    x: i32,
    y: i32,
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Board frames as fruit + snake point lists, the stimuli as a comment.
fn write_trace(path: &Path, trace: &GameTrace) -> Result<()> {
    let first = &trace.states()[0];
    let steps = trace
        .states()
        .iter()
        .zip(trace.stimuli())
        .enumerate()
        .map(|(idx, (state, stimuli))| {
            let mut pts = vec![TracePoint { x: state.fruit.x, y: state.fruit.y, kind: "fruit" }];
            pts.extend(state.body.iter().map(|p| TracePoint { x: p.x, y: p.y, kind: "snake" }));
            TraceStep {
                comment: format!("{}: {:?}", idx, stimuli),
                pts,
            }
        })
        .collect();

    let file = TraceFile {
        width: first.board_size,
        height: first.board_size,
        steps,
    };
    let json = serde_json::to_string_pretty(&file)?;
    fs::write(path, json).with_context(|| format!("writing trace {}", path.display()))?;
    Ok(())
}
