//! Tmux inventory listing and parsing
//!
//! Each level is listed with its own `-F` format whose fields are separated by
//! a horizontal tab. Parsing is strict: the first malformed line aborts the
//! whole listing with a [`ParseError`]; whitespace-only lines are skipped.

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::debug;

use super::runner::{Runner, execute};

/// Field separator used in every listing format.
pub const FIELD_SEPARATOR: char = '\t';

/// `list-sessions` format: name, window count, attached flag.
pub const SESSION_FORMAT: &str = "#{session_name}\t#{session_windows}\t#{session_attached}";

/// `list-windows -a` format: session, index, name, active flag, pane count.
pub const WINDOW_FORMAT: &str =
    "#{session_name}\t#{window_index}\t#{window_name}\t#{window_active}\t#{window_panes}";

/// `list-panes -a` format: session, window index, window name, pane index,
/// current command, active flag.
pub const PANE_FORMAT: &str = "#{session_name}\t#{window_index}\t#{window_name}\t#{pane_index}\t#{pane_current_command}\t#{pane_active}";

const TRUE_FLAG: &str = "1";

/// Information about a tmux session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Session name
    pub name: String,
    /// Number of windows in the session
    pub window_count: u32,
    /// Whether a client is attached to this session
    pub attached: bool,
}

/// Information about a tmux window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Window {
    /// Owning session name
    pub session: String,
    /// Window index, unique within the session
    pub index: u32,
    /// Window name
    pub name: String,
    /// Whether this is the session's current window
    pub active: bool,
    /// Number of panes in the window
    pub pane_count: u32,
}

/// Information about a tmux pane
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pane {
    /// Owning session name
    pub session: String,
    /// Owning window index
    pub window_index: u32,
    /// Owning window name
    pub window_name: String,
    /// Pane index, unique within the window
    pub pane_index: u32,
    /// Program currently running in the pane
    pub command: String,
    /// Whether this is the window's current pane
    pub active: bool,
}

/// Which listing a parse error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// `list-sessions`
    Session,
    /// `list-windows`
    Window,
    /// `list-panes`
    Pane,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Session => "session",
            Self::Window => "window",
            Self::Pane => "pane",
        })
    }
}

/// What was wrong with a malformed line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The line did not split into the expected number of fields.
    #[error("expected {expected} fields, found {found}")]
    FieldCount {
        /// Fields required by the format.
        expected: usize,
        /// Fields present on the line.
        found: usize,
    },
    /// A numeric field was not a base-10 integer.
    #[error("invalid {field} value '{value}'")]
    InvalidNumber {
        /// Format field name.
        field: &'static str,
        /// Raw field text.
        value: String,
    },
}

/// A malformed inventory line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed {level} listing at line {line}: {kind}")]
pub struct ParseError {
    /// Listing the line came from.
    pub level: Level,
    /// 1-based line number within the listing output.
    pub line: usize,
    /// What was wrong.
    pub kind: ParseErrorKind,
}

struct Fields<'a> {
    level: Level,
    line: usize,
    parts: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    fn split(level: Level, line: usize, text: &'a str, expected: usize) -> Result<Self, ParseError> {
        let parts: Vec<&str> = text.split(FIELD_SEPARATOR).collect();
        if parts.len() != expected {
            return Err(ParseError {
                level,
                line,
                kind: ParseErrorKind::FieldCount {
                    expected,
                    found: parts.len(),
                },
            });
        }
        Ok(Self { level, line, parts })
    }

    fn text(&self, idx: usize) -> String {
        self.parts[idx].to_string()
    }

    fn number(&self, idx: usize, field: &'static str) -> Result<u32, ParseError> {
        let raw = self.parts[idx];
        raw.parse::<u32>().map_err(|_| ParseError {
            level: self.level,
            line: self.line,
            kind: ParseErrorKind::InvalidNumber {
                field,
                value: raw.to_string(),
            },
        })
    }

    fn flag(&self, idx: usize) -> bool {
        self.parts[idx] == TRUE_FLAG
    }
}

fn parse_lines<T>(
    output: &str,
    level: Level,
    expected: usize,
    build: impl Fn(&Fields<'_>) -> Result<T, ParseError>,
) -> Result<Vec<T>, ParseError> {
    output
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let fields = Fields::split(level, idx + 1, line, expected)?;
            build(&fields)
        })
        .collect()
}

/// Parse `list-sessions` output produced with [`SESSION_FORMAT`].
///
/// # Errors
///
/// Returns an error on the first malformed line.
pub fn parse_sessions(output: &str) -> Result<Vec<Session>, ParseError> {
    parse_lines(output, Level::Session, 3, |f| {
        Ok(Session {
            name: f.text(0),
            window_count: f.number(1, "session_windows")?,
            attached: f.flag(2),
        })
    })
}

/// Parse `list-windows -a` output produced with [`WINDOW_FORMAT`].
///
/// # Errors
///
/// Returns an error on the first malformed line.
pub fn parse_windows(output: &str) -> Result<Vec<Window>, ParseError> {
    parse_lines(output, Level::Window, 5, |f| {
        Ok(Window {
            session: f.text(0),
            index: f.number(1, "window_index")?,
            name: f.text(2),
            active: f.flag(3),
            pane_count: f.number(4, "window_panes")?,
        })
    })
}

/// Parse `list-panes -a` output produced with [`PANE_FORMAT`].
///
/// # Errors
///
/// Returns an error on the first malformed line.
pub fn parse_panes(output: &str) -> Result<Vec<Pane>, ParseError> {
    parse_lines(output, Level::Pane, 6, |f| {
        Ok(Pane {
            session: f.text(0),
            window_index: f.number(1, "window_index")?,
            window_name: f.text(2),
            pane_index: f.number(3, "pane_index")?,
            command: f.text(4),
            active: f.flag(5),
        })
    })
}

fn listing_args(subcommand: &str, all: bool, format: &str) -> Vec<String> {
    let mut args = vec![subcommand.to_string()];
    if all {
        args.push("-a".to_string());
    }
    args.push("-F".to_string());
    args.push(format.to_string());
    args
}

/// List every session.
///
/// A failed or empty listing yields an empty list.
///
/// # Errors
///
/// Returns an error if tmux produced a malformed line.
pub fn list_sessions<R: Runner + ?Sized>(runner: &R) -> Result<Vec<Session>, ParseError> {
    let output = execute(runner, &listing_args("list-sessions", false, SESSION_FORMAT));
    let sessions = parse_sessions(&output)?;
    debug!(count = sessions.len(), "Listed tmux sessions");
    Ok(sessions)
}

/// List every window of every session.
///
/// # Errors
///
/// Returns an error if tmux produced a malformed line.
pub fn list_windows<R: Runner + ?Sized>(runner: &R) -> Result<Vec<Window>, ParseError> {
    let output = execute(runner, &listing_args("list-windows", true, WINDOW_FORMAT));
    let windows = parse_windows(&output)?;
    debug!(count = windows.len(), "Listed tmux windows");
    Ok(windows)
}

/// List every pane of every window of every session.
///
/// # Errors
///
/// Returns an error if tmux produced a malformed line.
pub fn list_panes<R: Runner + ?Sized>(runner: &R) -> Result<Vec<Pane>, ParseError> {
    let output = execute(runner, &listing_args("list-panes", true, PANE_FORMAT));
    let panes = parse_panes(&output)?;
    debug!(count = panes.len(), "Listed tmux panes");
    Ok(panes)
}
