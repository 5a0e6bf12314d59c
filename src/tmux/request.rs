//! Argument vectors for mutating tmux commands
//!
//! Names and addresses are always passed as separate argv items and never go
//! through a shell, so quotes and metacharacters in a name are inert.

use super::target::Target;

/// A single mutating tmux command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `switch-client -t <target>`
    SwitchClient(Target),
    /// `select-window -t <session:window>`
    SelectWindow(Target),
    /// `select-pane -t <session:window.pane>`
    SelectPane(Target),
    /// `rename-session -t <session> <name>`
    RenameSession {
        /// Session to rename
        target: Target,
        /// New name
        name: String,
    },
    /// `rename-window -t <session:window> <name>`
    RenameWindow {
        /// Window to rename
        target: Target,
        /// New name
        name: String,
    },
    /// `kill-session -t <session>`
    KillSession(Target),
    /// `kill-window -t <session:window>`
    KillWindow(Target),
    /// `kill-pane -t <session:window.pane>`
    KillPane(Target),
    /// `new-session -d [-s <name>]`
    NewSession {
        /// Optional session name
        name: Option<String>,
    },
    /// `new-window -t <session> [-n <name>]`
    NewWindow {
        /// Session receiving the window
        session: String,
        /// Optional window name
        name: Option<String>,
    },
}

impl Request {
    /// The tmux subcommand name.
    #[must_use]
    pub const fn subcommand(&self) -> &'static str {
        match self {
            Self::SwitchClient(_) => "switch-client",
            Self::SelectWindow(_) => "select-window",
            Self::SelectPane(_) => "select-pane",
            Self::RenameSession { .. } => "rename-session",
            Self::RenameWindow { .. } => "rename-window",
            Self::KillSession(_) => "kill-session",
            Self::KillWindow(_) => "kill-window",
            Self::KillPane(_) => "kill-pane",
            Self::NewSession { .. } => "new-session",
            Self::NewWindow { .. } => "new-window",
        }
    }

    /// Build the argv passed to tmux, without the program itself.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.subcommand().to_string()];
        match self {
            Self::SwitchClient(target)
            | Self::SelectPane(target)
            | Self::KillSession(target)
            | Self::KillWindow(target)
            | Self::KillPane(target) => {
                args.push("-t".to_string());
                args.push(target.address());
            }
            Self::SelectWindow(target) => {
                args.push("-t".to_string());
                args.push(
                    target
                        .window_address()
                        .unwrap_or_else(|| target.address()),
                );
            }
            Self::RenameSession { target, name } | Self::RenameWindow { target, name } => {
                args.push("-t".to_string());
                args.push(target.address());
                args.push(name.clone());
            }
            Self::NewSession { name } => {
                args.push("-d".to_string());
                if let Some(name) = name {
                    args.push("-s".to_string());
                    args.push(name.clone());
                }
            }
            Self::NewWindow { session, name } => {
                args.push("-t".to_string());
                args.push(session.clone());
                if let Some(name) = name {
                    args.push("-n".to_string());
                    args.push(name.clone());
                }
            }
        }
        args
    }
}
