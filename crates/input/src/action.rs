use std::num::ParseIntError;
use std::str::FromStr;

use lifegrid_common::CellCoord;

/// A high-level control action any driver can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start the generation timer.
    Start,
    /// Stop the generation timer.
    Stop,
    /// Flip manual mode: timer ticks are ignored while it is on.
    ToggleManual,
    /// Advance exactly one generation, regardless of timer or manual mode.
    Step,
    /// Rebuild the grid with the configured seeding.
    Reseed,
    /// Rebuild the grid from scratch with new dimensions.
    Resize { rows: usize, cols: usize },
    /// Flip a single cell.
    Toggle(CellCoord),
    Quit,
    /// Input that is recognised but bound to nothing.
    Noop,
}

/// Errors from parsing a textual command.
#[derive(Debug, thiserror::Error)]
pub enum ActionParseError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("`{command}` expects {expected} numeric arguments")]
    MissingArguments {
        command: &'static str,
        expected: usize,
    },
    #[error("invalid number `{value}`")]
    InvalidNumber {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl Action {
    /// Single-key bindings.
    pub fn from_key(key: char) -> Action {
        match key.to_ascii_lowercase() {
            's' => Action::Start,
            'p' => Action::Stop,
            'm' => Action::ToggleManual,
            'n' | ' ' => Action::Step,
            'r' => Action::Reseed,
            'q' => Action::Quit,
            _ => Action::Noop,
        }
    }

    /// Whether the action ends the driver loop.
    pub fn is_quit(&self) -> bool {
        matches!(self, Action::Quit)
    }
}

fn two_numbers<'a>(
    command: &'static str,
    mut args: impl Iterator<Item = &'a str>,
) -> Result<(usize, usize), ActionParseError> {
    let (Some(a), Some(b), None) = (args.next(), args.next(), args.next()) else {
        return Err(ActionParseError::MissingArguments {
            command,
            expected: 2,
        });
    };
    let parse = |value: &str| {
        value
            .parse::<usize>()
            .map_err(|source| ActionParseError::InvalidNumber {
                value: value.to_string(),
                source,
            })
    };
    Ok((parse(a)?, parse(b)?))
}

impl FromStr for Action {
    type Err = ActionParseError;

    /// Parse a line such as `start`, `step`, `resize 30 40` or `toggle 2 5`.
    /// A blank line is a no-op; a single character uses the key bindings.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Action::Noop);
        };
        let action = match command.to_ascii_lowercase().as_str() {
            "start" => Action::Start,
            "stop" | "pause" => Action::Stop,
            "manual" => Action::ToggleManual,
            "step" => Action::Step,
            "reseed" | "random" => Action::Reseed,
            "quit" | "exit" => Action::Quit,
            "resize" => {
                let (rows, cols) = two_numbers("resize", words)?;
                Action::Resize { rows, cols }
            }
            "toggle" => {
                let (row, col) = two_numbers("toggle", words)?;
                Action::Toggle(CellCoord::new(row, col))
            }
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(key), None) if Action::from_key(key) != Action::Noop => {
                        Action::from_key(key)
                    }
                    _ => return Err(ActionParseError::Unknown(line.trim().to_string())),
                }
            }
        };
        tracing::trace!(?action, "parsed command");
        Ok(action)
    }
}
