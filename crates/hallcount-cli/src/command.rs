//! Emulator command parsing.

use thiserror::Error;

/// A command typed at the emulator prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Simulate sensor pulses.
    Pulse(u64),
    /// Show the `distance` attribute.
    Distance,
    /// Write the given text to the `reset` attribute.
    Reset(String),
    /// Show counters and binding details.
    Status,
    /// List commands.
    Help,
    /// Leave the emulator.
    Quit,
}

/// Errors from parsing a command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("invalid pulse count: {0}")]
    InvalidCount(String),

    #[error("missing argument for {0}")]
    MissingArgument(&'static str),
}

pub const HELP: &str = "\
commands:
  pulse [n]       simulate n sensor pulses (default 1)
  distance        show accumulated distance in micrometers
  reset <value>   write value to the reset attribute (1 resets)
  status          show counters and binding details
  help            show this help
  quit            leave the emulator";

impl Command {
    /// Parse one input line.
    ///
    /// The `reset` argument is passed through verbatim so the attribute
    /// sees exactly what was typed.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim_start();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));

        match word.trim_end() {
            "pulse" | "p" => {
                let rest = rest.trim();
                if rest.is_empty() {
                    return Ok(Command::Pulse(1));
                }
                rest.parse()
                    .map(Command::Pulse)
                    .map_err(|_| CommandError::InvalidCount(rest.to_string()))
            }
            "distance" | "d" => Ok(Command::Distance),
            "reset" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("reset"));
                }
                Ok(Command::Reset(rest.to_string()))
            }
            "status" | "s" => Ok(Command::Status),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
