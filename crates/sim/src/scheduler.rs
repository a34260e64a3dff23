use std::time::Duration;

/// Most ticks a single `advance` reports. A longer backlog (a suspended
/// process, a huge `dt`) is dropped instead of replayed.
pub const MAX_CATCH_UP_TICKS: u32 = 1024;

/// What happened during one `TickScheduler::advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Ticks that should each produce one generation step.
    pub due: u32,
    /// Ticks that fired while manual mode was on and were dropped.
    pub suppressed: u32,
    /// Backlog beyond `MAX_CATCH_UP_TICKS`, discarded.
    pub dropped: u64,
}

/// Fixed-interval generation timer with a manual-mode gate.
///
/// Elapsed time is accumulated and converted into whole ticks. The timer
/// does nothing until started; while manual mode is on, ticks still fire
/// but are reported as suppressed.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    accumulator: Duration,
    running: bool,
    manual: bool,
    fired: u64,
}

impl TickScheduler {
    pub fn new(interval: Duration) -> Self {
        assert!(!interval.is_zero(), "tick interval must be positive");
        Self {
            interval,
            accumulator: Duration::ZERO,
            running: false,
            manual: false,
            fired: 0,
        }
    }

    /// Start ticking. The first tick fires one full interval from now.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.accumulator = Duration::ZERO;
            tracing::info!(interval_ms = self.interval.as_millis() as u64, "timer started");
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.accumulator = Duration::ZERO;
            tracing::info!("timer stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_manual(&mut self, manual: bool) {
        self.manual = manual;
    }

    /// Flip manual mode, returning the new value.
    pub fn toggle_manual(&mut self) -> bool {
        self.manual = !self.manual;
        tracing::info!(manual = self.manual, "manual mode toggled");
        self.manual
    }

    pub fn is_manual(&self) -> bool {
        self.manual
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Total ticks fired since construction, suppressed ones included.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Feed elapsed wall time.
    pub fn advance(&mut self, dt: Duration) -> TickOutcome {
        if !self.running {
            return TickOutcome::default();
        }
        let interval = self.interval.as_nanos();
        let pending = self.accumulator.saturating_add(dt).as_nanos();
        self.accumulator = nanos_to_duration(pending % interval);

        let whole = u64::try_from(pending / interval).unwrap_or(u64::MAX);
        let ticks = whole.min(MAX_CATCH_UP_TICKS as u64) as u32;
        let dropped = whole - ticks as u64;
        self.fired = self.fired.saturating_add(whole);

        let outcome = if self.manual {
            TickOutcome {
                due: 0,
                suppressed: ticks,
                dropped,
            }
        } else {
            TickOutcome {
                due: ticks,
                suppressed: 0,
                dropped,
            }
        };
        tracing::trace!(
            ?dt,
            due = outcome.due,
            suppressed = outcome.suppressed,
            dropped,
            "timer advanced"
        );
        outcome
    }

    /// Time left until the next tick, or `None` while stopped.
    pub fn until_next_tick(&self) -> Option<Duration> {
        self.running
            .then(|| self.interval.saturating_sub(self.accumulator))
    }
}

/// Remainders are always shorter than the interval, so they fit a `Duration`.
fn nanos_to_duration(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    Duration::new((nanos / NANOS_PER_SEC) as u64, (nanos % NANOS_PER_SEC) as u32)
}
