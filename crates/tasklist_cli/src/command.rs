//! Line commands typed at the prompt.
//!
//! A line starting with `:` is a command; anything else is text typed into
//! the focused input followed by Enter. `::` escapes a literal leading colon.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text for the focused input, then Enter. Empty means Enter alone.
    Type(String),
    Toggle(usize),
    Delete(usize),
    Edit(usize),
    Cancel,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnknownCommand(String),
    MissingRow(&'static str),
    InvalidRow(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand(name) => write!(f, "unknown command `:{name}`; try :help"),
            Self::MissingRow(name) => write!(f, "`:{name}` needs a row number"),
            Self::InvalidRow(value) => write!(f, "`{value}` is not a row number"),
        }
    }
}

impl Error for ParseError {}

pub const HELP: &str = "\
Type text and press Enter to add a task (or to save while editing).
  :toggle N   mark row N done / not done
  :edit N     edit row N (Enter saves, :cancel discards)
  :delete N   delete row N
  :cancel     leave edit mode
  :help       show this help
  :quit       exit";

pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if let Some(literal) = line.strip_prefix("::") {
        return Ok(Command::Type(format!(":{literal}")));
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Type(line.to_string()));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    match name {
        "toggle" | "t" => parse_row("toggle", parts.next()).map(Command::Toggle),
        "delete" | "d" => parse_row("delete", parts.next()).map(Command::Delete),
        "edit" | "e" => parse_row("edit", parts.next()).map(Command::Edit),
        "cancel" | "c" => Ok(Command::Cancel),
        "help" | "h" => Ok(Command::Help),
        "quit" | "q" => Ok(Command::Quit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn parse_row(name: &'static str, value: Option<&str>) -> Result<usize, ParseError> {
    let value = value.ok_or(ParseError::MissingRow(name))?;
    value
        .parse::<usize>()
        .ok()
        .filter(|row| *row > 0)
        .ok_or_else(|| ParseError::InvalidRow(value.to_string()))
}
