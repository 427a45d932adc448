//! Offset transitions and their text form
//!
//! Grammar (case-insensitive keywords):
//! - `reset`
//! - `set <video> <telemetry>`
//! - `offset <seconds>`
//! - `nudge <delta>`
//! - `+0.1`, `-1` (signed number: nudge)

use std::fmt;
use std::str::FromStr;

use crate::error::CommandParseError;

/// Offset transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncCommand {
    /// offset = telemetry - video
    SetAbsolute { video: f64, telemetry: f64 },
    /// offset = value
    SetDirect(f64),
    /// offset += delta
    Nudge(f64),
    /// offset = 0
    Reset,
}

impl SyncCommand {
    /// Metric label
    pub fn kind(&self) -> &'static str {
        match self {
            SyncCommand::SetAbsolute { .. } => "set_absolute",
            SyncCommand::SetDirect(_) => "set_direct",
            SyncCommand::Nudge(_) => "nudge",
            SyncCommand::Reset => "reset",
        }
    }
}

impl fmt::Display for SyncCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncCommand::SetAbsolute { video, telemetry } => write!(f, "set {video} {telemetry}"),
            SyncCommand::SetDirect(offset) => write!(f, "offset {offset}"),
            SyncCommand::Nudge(delta) => write!(f, "nudge {delta:+}"),
            SyncCommand::Reset => f.write_str("reset"),
        }
    }
}

fn number(
    token: Option<&str>,
    command: &'static str,
    expected: &'static str,
) -> Result<f64, CommandParseError> {
    let token = token.ok_or(CommandParseError::MissingArgument { command, expected })?;
    token
        .parse::<f64>()
        .map_err(|_| CommandParseError::InvalidNumber {
            value: token.to_string(),
        })
}

impl FromStr for SyncCommand {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let head = tokens.next().ok_or(CommandParseError::Empty)?;

        let command = match head.to_ascii_lowercase().as_str() {
            "reset" => SyncCommand::Reset,
            "set" => SyncCommand::SetAbsolute {
                video: number(tokens.next(), "set", "<video> <telemetry>")?,
                telemetry: number(tokens.next(), "set", "<video> <telemetry>")?,
            },
            "offset" => SyncCommand::SetDirect(number(tokens.next(), "offset", "<seconds>")?),
            "nudge" => SyncCommand::Nudge(number(tokens.next(), "nudge", "<delta>")?),
            _ if head.starts_with(['+', '-']) => {
                SyncCommand::Nudge(number(Some(head), "nudge", "<delta>")?)
            }
            _ => return Err(CommandParseError::Unknown(head.to_string())),
        };

        let rest: Vec<&str> = tokens.collect();
        if !rest.is_empty() {
            return Err(CommandParseError::Trailing(rest.join(" ")));
        }
        Ok(command)
    }
}
