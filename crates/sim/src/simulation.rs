use std::time::{Duration, Instant};

use lifegrid_common::{CellCoord, CellState, ConfigError, GridConfig};
use lifegrid_input::Action;
use lifegrid_kernel::{Grid, Seeding, StepReport};
use lifegrid_render::CellPresenter;

use crate::history::StepHistory;
use crate::scheduler::TickScheduler;

/// Whether the driver loop should keep going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// The grid plus everything that decides when it steps and who sees it.
///
/// Owned by exactly one driver; every mutation goes through `&mut self`.
/// The presenter is synced at construction, after every committed generation
/// and on every rebuild.
pub struct Simulation<P> {
    config: GridConfig,
    seeding: Seeding,
    grid: Grid,
    scheduler: TickScheduler,
    presenter: P,
    history: StepHistory,
}

impl<P: CellPresenter> Simulation<P> {
    /// Validate `config`, seed the grid and show it on `presenter`.
    pub fn new(config: GridConfig, mut presenter: P) -> Result<Self, ConfigError> {
        config.validate()?;
        let seeding = Seeding::from_config(&config)?;
        let grid = seeding.build(config.rows, config.cols);

        let mut scheduler = TickScheduler::new(config.generation_interval());
        scheduler.set_manual(config.manual_update);

        presenter.reset(grid.rows(), grid.cols());
        presenter.sync(&grid);

        Ok(Self {
            config,
            seeding,
            grid,
            scheduler,
            presenter,
            history: StepHistory::default(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Recent steps with their counts and durations.
    pub fn step_history(&self) -> &StepHistory {
        &self.history
    }

    pub fn generation(&self) -> u64 {
        self.grid.generation()
    }

    pub fn start(&mut self) {
        self.scheduler.start();
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn is_manual(&self) -> bool {
        self.scheduler.is_manual()
    }

    pub fn set_manual(&mut self, manual: bool) {
        self.scheduler.set_manual(manual);
    }

    /// Flip manual mode, returning the new value.
    pub fn toggle_manual(&mut self) -> bool {
        self.scheduler.toggle_manual()
    }

    /// Feed elapsed wall time; performs one step per due timer tick.
    /// Returns the number of generations advanced.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.advance_limited(dt, u32::MAX)
    }

    /// Like `advance`, but steps at most `limit` times. Due ticks past the
    /// limit are discarded.
    pub fn advance_limited(&mut self, dt: Duration, limit: u32) -> u32 {
        let outcome = self.scheduler.advance(dt);
        if outcome.suppressed > 0 {
            tracing::debug!(suppressed = outcome.suppressed, "manual mode, timer ticks ignored");
        }
        if outcome.dropped > 0 {
            tracing::warn!(dropped = outcome.dropped, "timer fell behind, backlog dropped");
        }
        let steps = outcome.due.min(limit);
        if steps < outcome.due {
            tracing::debug!(skipped = outcome.due - steps, "due ticks over step limit");
        }
        for _ in 0..steps {
            self.step_once();
        }
        steps
    }

    /// Step once now, ignoring the timer and manual mode. A forced step is a
    /// full generation and advances the generation counter.
    pub fn force_step(&mut self) -> StepReport {
        self.step_once()
    }

    fn step_once(&mut self) -> StepReport {
        let started = Instant::now();
        let report = self.grid.step();
        self.history.record(report, started.elapsed());
        self.presenter.sync(&self.grid);
        report
    }

    /// Throw the grid away and seed a new one of the same size.
    pub fn reseed(&mut self) {
        self.grid = self.seeding.build(self.config.rows, self.config.cols);
        self.presenter.sync(&self.grid);
        tracing::info!(population = self.grid.population(), "grid reseeded");
    }

    /// Rebuild from scratch with new dimensions. Invalid dimensions leave
    /// the current grid untouched.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<(), ConfigError> {
        let config = self.config.with_dimensions(rows, cols);
        config.validate()?;
        self.grid = self.seeding.build(rows, cols);
        self.config = config;
        self.presenter.reset(rows, cols);
        self.presenter.sync(&self.grid);
        tracing::info!(rows, cols, "grid resized");
        Ok(())
    }

    /// Flip one cell. Returns `None` outside the grid.
    pub fn toggle(&mut self, coord: CellCoord) -> Option<CellState> {
        let state = self.grid.toggle(coord)?;
        self.presenter.set_visible(coord, state.is_alive());
        Some(state)
    }

    /// Apply a control action from any driver.
    pub fn apply(&mut self, action: Action) -> Result<Control, ConfigError> {
        tracing::debug!(?action, "applying action");
        match action {
            Action::Start => self.start(),
            Action::Stop => self.stop(),
            Action::ToggleManual => {
                self.toggle_manual();
            }
            Action::Step => {
                self.force_step();
            }
            Action::Reseed => self.reseed(),
            Action::Resize { rows, cols } => self.resize(rows, cols)?,
            Action::Toggle(coord) => {
                if self.toggle(coord).is_none() {
                    tracing::warn!(%coord, "toggle outside grid ignored");
                }
            }
            Action::Quit => return Ok(Control::Quit),
            Action::Noop => {}
        }
        Ok(Control::Continue)
    }
}
