use std::collections::VecDeque;
use std::time::Duration;

use lifegrid_kernel::StepReport;

/// One committed generation and how long computing it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSample {
    pub report: StepReport,
    pub elapsed: Duration,
}

/// Sliding window over the most recent generation steps, oldest first.
#[derive(Debug, Clone)]
pub struct StepHistory {
    samples: VecDeque<StepSample>,
    window: usize,
}

impl StepHistory {
    pub fn new(window: usize) -> Self {
        assert!(window > 0, "step history needs room for at least one step");
        Self {
            samples: VecDeque::with_capacity(window),
            window,
        }
    }

    pub fn record(&mut self, report: StepReport, elapsed: Duration) {
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(StepSample { report, elapsed });
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&StepSample> {
        self.samples.back()
    }

    pub fn mean_elapsed(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        self.samples.iter().map(|s| s.elapsed).sum::<Duration>() / self.samples.len() as u32
    }

    pub fn slowest(&self) -> Duration {
        self.samples
            .iter()
            .map(|s| s.elapsed)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    /// `(births, deaths)` summed over the window.
    pub fn churn(&self) -> (usize, usize) {
        self.samples.iter().fold((0, 0), |(b, d), s| {
            (b + s.report.births, d + s.report.deaths)
        })
    }

    /// True once a full window of steps has passed without a single birth
    /// or death.
    pub fn is_still(&self) -> bool {
        self.samples.len() == self.window
            && self
                .samples
                .iter()
                .all(|s| s.report.births == 0 && s.report.deaths == 0)
    }
}

impl Default for StepHistory {
    fn default() -> Self {
        Self::new(64)
    }
}
