//! Line-oriented input script.
//!
//! One command per line, `#` starts a comment:
//!
//! ```text
//! place <item> <shape> <x> <y>
//! release <item>
//! begin <item>
//! hover <x> <y>
//! drop <x> <y>
//! cancel
//! reset
//! ```

use std::str::FromStr;

use effigy_core::{Cell, ItemId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Place {
        item: ItemId,
        shape: String,
        anchor: Cell,
    },
    Release(ItemId),
    Begin(ItemId),
    Hover(Cell),
    Drop(Cell),
    Cancel,
    Reset,
}

/// A command and the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: Command,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{name}'")]
    UnknownCommand { line: usize, name: String },

    #[error("line {line}: '{command}' takes {expected} argument(s), got {got}")]
    Arity {
        line: usize,
        command: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("line {line}: '{value}' is not a valid integer")]
    BadNumber { line: usize, value: String },
}

/// Parse a whole script, skipping blank and comment lines.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut lines = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        if let Some(command) = parse_line(i + 1, raw)? {
            lines.push(ScriptLine {
                line: i + 1,
                command,
            });
        }
    }
    Ok(lines)
}

/// Parse one line. `Ok(None)` for blank or comment-only lines.
pub fn parse_line(line: usize, raw: &str) -> Result<Option<Command>, ScriptError> {
    let text = raw.split('#').next().unwrap_or_default();
    let mut parts = text.split_whitespace();
    let Some(name) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();

    let command = match name {
        "place" => {
            arity(line, "place", &args, 4)?;
            Command::Place {
                item: ItemId(number(line, args[0])?),
                shape: args[1].to_string(),
                anchor: Cell::new(number(line, args[2])?, number(line, args[3])?),
            }
        }
        "release" => {
            arity(line, "release", &args, 1)?;
            Command::Release(ItemId(number(line, args[0])?))
        }
        "begin" => {
            arity(line, "begin", &args, 1)?;
            Command::Begin(ItemId(number(line, args[0])?))
        }
        "hover" => {
            arity(line, "hover", &args, 2)?;
            Command::Hover(Cell::new(number(line, args[0])?, number(line, args[1])?))
        }
        "drop" => {
            arity(line, "drop", &args, 2)?;
            Command::Drop(Cell::new(number(line, args[0])?, number(line, args[1])?))
        }
        "cancel" => {
            arity(line, "cancel", &args, 0)?;
            Command::Cancel
        }
        "reset" => {
            arity(line, "reset", &args, 0)?;
            Command::Reset
        }
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                name: other.to_string(),
            })
        }
    };
    Ok(Some(command))
}

fn arity(line: usize, command: &'static str, args: &[&str], expected: usize) -> Result<(), ScriptError> {
    if args.len() != expected {
        return Err(ScriptError::Arity {
            line,
            command,
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn number<T: FromStr>(line: usize, value: &str) -> Result<T, ScriptError> {
    value.parse().map_err(|_| ScriptError::BadNumber {
        line,
        value: value.to_string(),
    })
}
