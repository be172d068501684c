//! Typed commands and their translation into core messages.
//!
//! Rows can be referred to by their 1-based position in the last rendered list
//! or by video id. Positions are resolved against the view the user saw, so the
//! resulting messages always carry ids.

use manual_core::{AppViewModel, Msg, VideoId};
use thiserror::Error;

pub const HELP_TEXT: &str = "\
commands:
  search <keyword>   search and replace the list
  move <row> <row>   move the first row to the position of the second
  toggle <row>       select or deselect a row
  all | none         select every row / clear the selection
  open <row>         open the row's watch page
  export             save the selected rows as an HTML manual
  list               show the list again
  help               show this text
  quit               leave
rows are 1-based positions or video ids";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Move { moved: String, target: String },
    Toggle(String),
    SelectAll(bool),
    Open(String),
    Export,
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command {0:?}; type `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match word.to_ascii_lowercase().as_str() {
        "search" | "s" => {
            if rest.is_empty() {
                return Err(ParseError::Usage("search <keyword>"));
            }
            Command::Search(rest.to_string())
        }
        "move" | "mv" => match args.as_slice() {
            [moved, target] => Command::Move {
                moved: moved.to_string(),
                target: target.to_string(),
            },
            _ => return Err(ParseError::Usage("move <row> <row>")),
        },
        "toggle" | "t" => match args.as_slice() {
            [row] => Command::Toggle(row.to_string()),
            _ => return Err(ParseError::Usage("toggle <row>")),
        },
        "open" | "o" => match args.as_slice() {
            [row] => Command::Open(row.to_string()),
            _ => return Err(ParseError::Usage("open <row>")),
        },
        "all" => Command::SelectAll(true),
        "none" => Command::SelectAll(false),
        "export" | "e" => Command::Export,
        "list" | "ls" => Command::List,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Maps a row reference to an id: an in-range position picks that row,
/// anything else is taken as a literal id.
pub fn resolve_row(view: &AppViewModel, reference: &str) -> VideoId {
    reference
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| view.rows.get(index))
        .map(|row| row.id.clone())
        .unwrap_or_else(|| VideoId::new(reference))
}

/// Messages for commands that reach the core; `None` for purely local ones.
pub fn command_to_msgs(command: &Command, view: &AppViewModel) -> Option<Vec<Msg>> {
    let msgs = match command {
        Command::Search(keyword) => vec![Msg::KeywordChanged(keyword.clone()), Msg::SearchSubmitted],
        Command::Move { moved, target } => vec![Msg::ItemMoved {
            moved: resolve_row(view, moved),
            target: resolve_row(view, target),
        }],
        Command::Toggle(row) => vec![Msg::ItemToggled {
            id: resolve_row(view, row),
        }],
        Command::SelectAll(checked) => vec![Msg::SelectAllToggled { checked: *checked }],
        Command::Open(row) => vec![Msg::ItemClicked {
            id: resolve_row(view, row),
        }],
        Command::Export => vec![Msg::ExportClicked],
        Command::List | Command::Help | Command::Quit => return None,
    };
    Some(msgs)
}
