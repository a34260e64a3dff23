use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lifegrid_common::{CellCoord, GridConfig, PatternSpec};
use lifegrid_input::Action;
use lifegrid_kernel::Pattern;
use lifegrid_render::{Renderer, SpriteLayer, TextRenderer};
use lifegrid_sim::{Control, Simulation};
use lifegrid_tools::GridInspector;
use tracing_subscriber::EnvFilter;

/// How long `play` waits for input while the timer is stopped.
const IDLE_POLL: Duration = Duration::from_millis(250);

const PLAY_HELP: &str = "\
commands: start | stop | manual | step | reseed | resize ROWS COLS | toggle ROW COL | quit
keys:     s start, p stop, m manual, n step, r reseed, q quit";

#[derive(Parser)]
#[command(name = "lifegrid", about = "Conway's Game of Life on a bounded grid")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, default configuration and built-in patterns
    Info,
    /// List built-in patterns
    Patterns,
    /// Step a grid and print every generation
    Run {
        #[command(flatten)]
        grid: GridArgs,
        /// Number of generations to run
        #[arg(short, long, default_value = "10")]
        generations: u64,
        /// Wait one generation interval between frames
        #[arg(long)]
        realtime: bool,
        /// Print one JSON summary per generation instead of frames
        #[arg(long)]
        json: bool,
    },
    /// Interactive session driven by commands on stdin
    Play {
        #[command(flatten)]
        grid: GridArgs,
    },
}

#[derive(Args, Debug, Default)]
struct GridArgs {
    /// YAML or JSON config file; the flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    rows: Option<usize>,
    #[arg(long)]
    cols: Option<usize>,
    /// Chance that a cell starts alive, 0.0 to 1.0
    #[arg(short, long)]
    probability: Option<f64>,
    /// RNG seed for a reproducible random fill
    #[arg(short, long)]
    seed: Option<u64>,
    /// Built-in pattern instead of a random fill (see `patterns`)
    #[arg(long)]
    pattern: Option<String>,
    /// Where the pattern's top-left corner goes
    #[arg(long, num_args = 2, value_names = ["ROW", "COL"])]
    offset: Option<Vec<usize>>,
    /// Milliseconds per generation
    #[arg(short, long)]
    interval_ms: Option<u64>,
    /// Start with timer-driven steps suppressed
    #[arg(short, long)]
    manual: bool,
}

impl GridArgs {
    /// Config file (or defaults) with command-line overrides applied.
    fn resolve(&self) -> Result<GridConfig> {
        let mut config = match &self.config {
            Some(path) => GridConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => GridConfig::default(),
        };
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(p) = self.probability {
            config.live_probability = p;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(name) = &self.pattern {
            config.pattern = Some(PatternSpec::Named(name.clone()));
        }
        if let Some(&[row, col]) = self.offset.as_deref() {
            config.pattern_offset = CellCoord::new(row, col);
        }
        if let Some(ms) = self.interval_ms {
            config.generation_interval_ms = ms;
        }
        if self.manual {
            config.manual_update = true;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("lifegrid v{}", env!("CARGO_PKG_VERSION"));
            println!("default config:");
            print!("{}", serde_yaml::to_string(&GridConfig::default())?);
            let names: Vec<&str> = Pattern::all().iter().map(|p| p.name).collect();
            println!("patterns: {}", names.join(", "));
        }
        Commands::Patterns => {
            for pattern in Pattern::all() {
                let (rows, cols) = pattern.extent();
                println!(
                    "{:<12} {rows}x{cols}  {} live cells",
                    pattern.name,
                    pattern.cells.len()
                );
            }
        }
        Commands::Run {
            grid,
            generations,
            realtime,
            json,
        } => run(grid.resolve()?, generations, realtime, json)?,
        Commands::Play { grid } => play(grid.resolve()?)?,
    }

    Ok(())
}

fn emit(sim: &Simulation<SpriteLayer>, renderer: &TextRenderer, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&GridInspector::summary(sim.grid()))?);
    } else {
        println!("{}", renderer.render(sim.grid()));
    }
    Ok(())
}

fn run(config: GridConfig, generations: u64, realtime: bool, json: bool) -> Result<()> {
    let mut sim = Simulation::new(config, SpriteLayer::default())?;
    let renderer = TextRenderer::new();
    emit(&sim, &renderer, json)?;

    if realtime {
        if sim.is_manual() {
            anyhow::bail!("manual mode suppresses timer steps; use `play` or drop --manual");
        }
        sim.start();
        let mut last = Instant::now();
        while sim.generation() < generations {
            if let Some(wait) = sim.scheduler().until_next_tick() {
                thread::sleep(wait);
            }
            let now = Instant::now();
            // One step per wake-up so every generation gets its own frame;
            // ticks missed while printing are skipped, not bunched.
            if sim.advance_limited(now - last, 1) > 0 {
                emit(&sim, &renderer, json)?;
            }
            last = now;
        }
    } else {
        for _ in 0..generations {
            sim.force_step();
            emit(&sim, &renderer, json)?;
        }
    }

    let history = sim.step_history();
    let (births, deaths) = history.churn();
    tracing::info!(
        generation = sim.generation(),
        population = sim.grid().population(),
        recent_steps = history.len(),
        births,
        deaths,
        still = history.is_still(),
        avg_step = ?history.mean_elapsed(),
        max_step = ?history.slowest(),
        "run finished"
    );
    Ok(())
}

fn status(sim: &Simulation<SpriteLayer>) -> String {
    format!(
        "[running={} manual={} generation={} visible={}]",
        sim.is_running(),
        sim.is_manual(),
        sim.generation(),
        sim.presenter().visible_count()
    )
}

fn play(config: GridConfig) -> Result<()> {
    let mut sim = Simulation::new(config, SpriteLayer::default())?;
    let renderer = TextRenderer::new();
    println!("{PLAY_HELP}\n");
    println!("{}", renderer.render(sim.grid()));

    let (tx, rx) = mpsc::channel::<String>();
    thread::Builder::new()
        .name("stdin commands".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })?;

    let mut last = Instant::now();
    loop {
        let wait = sim.scheduler().until_next_tick().unwrap_or(IDLE_POLL);
        let received = rx.recv_timeout(wait);

        // Credit elapsed time before applying the command so a fresh
        // `start` does not fire ticks for time spent stopped.
        let now = Instant::now();
        if sim.advance(now - last) > 0 {
            println!("{}", renderer.render(sim.grid()));
        }
        last = now;

        let line = match received {
            Ok(line) => line,
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        };
        let action = match line.parse::<Action>() {
            Ok(action) => action,
            Err(e) => {
                tracing::warn!("{e}");
                continue;
            }
        };
        match sim.apply(action) {
            Ok(Control::Quit) => break,
            Ok(Control::Continue) => match action {
                Action::Step | Action::Reseed | Action::Resize { .. } | Action::Toggle(_) => {
                    println!("{}", renderer.render(sim.grid()));
                }
                Action::Noop => {}
                _ => println!("{}", status(&sim)),
            },
            Err(e) => tracing::error!("{e}"),
        }
    }

    println!("{}", GridInspector::summary(sim.grid()));
    Ok(())
}
