//! Addressable tmux targets

use serde::Serialize;
use std::fmt;

use super::inventory::{Pane, Session, Window};

/// A session, window or pane that a tmux command can be pointed at.
///
/// Targets are plain values taken from one inventory snapshot. They hold no
/// link to live tmux state and go stale once the server changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target {
    /// A whole session.
    Session {
        /// Session name
        session: String,
    },
    /// One window of a session.
    Window {
        /// Session name
        session: String,
        /// Window index within the session
        window_index: u32,
    },
    /// One pane of a window.
    Pane {
        /// Session name
        session: String,
        /// Window index within the session
        window_index: u32,
        /// Pane index within the window
        pane_index: u32,
    },
}

impl Target {
    /// The session this target belongs to.
    #[must_use]
    pub fn session_name(&self) -> &str {
        match self {
            Self::Session { session }
            | Self::Window { session, .. }
            | Self::Pane { session, .. } => session,
        }
    }

    /// Short lowercase name of the variant, for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Session { .. } => "session",
            Self::Window { .. } => "window",
            Self::Pane { .. } => "pane",
        }
    }

    /// Format the target in tmux's `-t` syntax.
    ///
    /// `session`, `session:window` or `session:window.pane`. Tmux does not
    /// allow `:` or `.` in session names, so the format is unambiguous.
    #[must_use]
    pub fn address(&self) -> String {
        match self {
            Self::Session { session } => session.clone(),
            Self::Window {
                session,
                window_index,
            } => format!("{session}:{window_index}"),
            Self::Pane {
                session,
                window_index,
                pane_index,
            } => format!("{session}:{window_index}.{pane_index}"),
        }
    }

    /// Address of the window containing this target, if it has one.
    #[must_use]
    pub fn window_address(&self) -> Option<String> {
        match self {
            Self::Session { .. } => None,
            Self::Window {
                session,
                window_index,
            }
            | Self::Pane {
                session,
                window_index,
                ..
            } => Some(format!("{session}:{window_index}")),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address())
    }
}

impl From<&Session> for Target {
    fn from(session: &Session) -> Self {
        Self::Session {
            session: session.name.clone(),
        }
    }
}

impl From<&Window> for Target {
    fn from(window: &Window) -> Self {
        Self::Window {
            session: window.session.clone(),
            window_index: window.index,
        }
    }
}

impl From<&Pane> for Target {
    fn from(pane: &Pane) -> Self {
        Self::Pane {
            session: pane.session.clone(),
            window_index: pane.window_index,
            pane_index: pane.pane_index,
        }
    }
}
