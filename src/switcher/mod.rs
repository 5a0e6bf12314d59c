//! Tmux action engine
//!
//! Each action takes one inventory snapshot, offers it through the host's
//! [`Selector`], resolves the chosen [`Target`] into tmux commands and reports
//! the outcome through the [`Notifier`]. The snapshot is never re-read between
//! the pick and the command, so a target that vanished in the meantime simply
//! makes tmux fail, which is logged.

mod options;

pub use options::{
    KILL_ICON, NEW_WINDOW_ICON, RENAME_ICON, kill_options, rename_options, session_description,
    session_options, switch_options,
};

use anyhow::Result;
use tracing::{debug, info};

use crate::config::HotkeyId;
use crate::host::{Notifier, Prompt, Selector, non_empty};
use crate::tmux::{self, ParseError, Request, Runner, Target, Window};

/// Notice emitted when a gated action finds no tmux server.
pub const NOT_RUNNING: &str = "tmux is not running";

/// Selector title for the switch action.
pub const SWITCH_TITLE: &str = "Switch to tmux pane";
/// Selector title for the rename action.
pub const RENAME_TITLE: &str = "Rename tmux target";
/// Selector title for the kill action.
pub const KILL_TITLE: &str = "Kill tmux target";
/// Selector title for picking the session that receives a new window.
pub const NEW_WINDOW_TITLE: &str = "New window in session";

/// How an action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Commands were issued.
    Done,
    /// The user dismissed the selector or prompt, or submitted nothing.
    Cancelled,
    /// The inventory was empty, so nothing was offered.
    Empty,
    /// No tmux server was reachable.
    Unavailable,
    /// The tmux listing could not be parsed.
    Unreadable,
}

/// Commands that bring `target` into view.
#[must_use]
pub fn switch_requests(target: &Target) -> Vec<Request> {
    match target {
        Target::Session { .. } => vec![Request::SwitchClient(target.clone())],
        Target::Window { .. } => vec![Request::SelectWindow(target.clone())],
        Target::Pane { .. } => vec![
            Request::SelectWindow(target.clone()),
            Request::SelectPane(target.clone()),
        ],
    }
}

/// Command that renames `target`.
///
/// Panes have no name of their own; renaming one renames its window.
#[must_use]
pub fn rename_request(target: &Target, name: &str) -> Request {
    let name = name.to_string();
    match target {
        Target::Session { .. } => Request::RenameSession {
            target: target.clone(),
            name,
        },
        Target::Window { .. } => Request::RenameWindow {
            target: target.clone(),
            name,
        },
        Target::Pane {
            session,
            window_index,
            ..
        } => Request::RenameWindow {
            target: Target::Window {
                session: session.clone(),
                window_index: *window_index,
            },
            name,
        },
    }
}

/// Command that destroys `target`.
#[must_use]
pub fn kill_request(target: &Target) -> Request {
    match target {
        Target::Session { .. } => Request::KillSession(target.clone()),
        Target::Window { .. } => Request::KillWindow(target.clone()),
        Target::Pane { .. } => Request::KillPane(target.clone()),
    }
}

/// Notice shown after a kill.
#[must_use]
pub fn kill_notice(target: &Target) -> String {
    match target {
        Target::Session { session } => format!("Killed session \"{session}\""),
        Target::Window { .. } => "Window killed".to_string(),
        Target::Pane { .. } => "Pane killed".to_string(),
    }
}

/// Name used to seed the rename prompt.
///
/// Sessions use their own name; windows and panes use the name of the window
/// they address in `windows`, or an empty string if it is not listed.
#[must_use]
pub fn current_name(target: &Target, windows: &[Window]) -> String {
    match target {
        Target::Session { session } => session.clone(),
        Target::Window {
            session,
            window_index,
        }
        | Target::Pane {
            session,
            window_index,
            ..
        } => windows
            .iter()
            .find(|window| &window.session == session && window.index == *window_index)
            .map(|window| window.name.clone())
            .unwrap_or_default(),
    }
}

/// Drives the tmux actions against host-supplied collaborators.
#[derive(Debug)]
pub struct TmuxSwitcher<R, S, P, N> {
    runner: R,
    selector: S,
    prompt: P,
    notifier: N,
}

impl<R, S, P, N> TmuxSwitcher<R, S, P, N>
where
    R: Runner,
    S: Selector,
    P: Prompt,
    N: Notifier,
{
    /// Create an engine from its collaborators.
    pub const fn new(runner: R, selector: S, prompt: P, notifier: N) -> Self {
        Self {
            runner,
            selector,
            prompt,
            notifier,
        }
    }

    /// Run the action bound to a tmux hotkey.
    ///
    /// Returns `Ok(None)` for hotkeys that belong to the tab switcher.
    ///
    /// # Errors
    ///
    /// Propagates selector or prompt failures.
    pub fn handle_hotkey(&mut self, hotkey: HotkeyId) -> Result<Option<Completion>> {
        let completion = match hotkey {
            HotkeyId::TmuxSwitch => self.show_switch()?,
            HotkeyId::TmuxRename => self.show_rename()?,
            HotkeyId::TmuxKill => self.show_kill()?,
            HotkeyId::TmuxNewSession => self.show_new_session()?,
            HotkeyId::TmuxNewWindow => self.show_new_window()?,
            HotkeyId::SwitcherShow
            | HotkeyId::SwitcherRename
            | HotkeyId::SwitcherClose
            | HotkeyId::SwitcherDuplicate => return Ok(None),
        };
        Ok(Some(completion))
    }

    /// Pick a pane and switch to it.
    ///
    /// # Errors
    ///
    /// Propagates selector failures.
    pub fn show_switch(&mut self) -> Result<Completion> {
        if !self.ensure_available() {
            return Ok(Completion::Unavailable);
        }
        let panes = match tmux::list_panes(&self.runner) {
            Ok(panes) => panes,
            Err(err) => return Ok(self.unreadable(&err)),
        };
        if panes.is_empty() {
            debug!("No panes to switch to");
            return Ok(Completion::Empty);
        }

        let Some(target) = self.selector.show(SWITCH_TITLE, switch_options(&panes))? else {
            return Ok(Completion::Cancelled);
        };
        self.switch_to(&target);
        Ok(Completion::Done)
    }

    /// Switch to a target without showing a picker.
    pub fn switch_to(&self, target: &Target) {
        info!(target = %target, kind = target.kind(), "Switching tmux target");
        self.apply(&switch_requests(target));
    }

    /// Pick a session or window and rename it.
    ///
    /// # Errors
    ///
    /// Propagates selector or prompt failures.
    pub fn show_rename(&mut self) -> Result<Completion> {
        if !self.ensure_available() {
            return Ok(Completion::Unavailable);
        }
        let (sessions, windows) =
            match tmux::list_sessions(&self.runner).and_then(|sessions| {
                tmux::list_windows(&self.runner).map(|windows| (sessions, windows))
            }) {
                Ok(listing) => listing,
                Err(err) => return Ok(self.unreadable(&err)),
            };
        if sessions.is_empty() && windows.is_empty() {
            debug!("Nothing to rename");
            return Ok(Completion::Empty);
        }

        let options = rename_options(&sessions, &windows);
        let Some(target) = self.selector.show(RENAME_TITLE, options)? else {
            return Ok(Completion::Cancelled);
        };

        let seed = current_name(&target, &windows);
        let Some(name) = self
            .prompt
            .open(&format!("Rename {}", target.kind()), &seed)?
            .as_deref()
            .and_then(non_empty)
        else {
            return Ok(Completion::Cancelled);
        };

        info!(target = %target, %name, "Renaming tmux target");
        self.apply(&[rename_request(&target, &name)]);
        self.notifier.info(&format!("Renamed to \"{name}\""));
        Ok(Completion::Done)
    }

    /// Pick a session or pane and kill it.
    ///
    /// # Errors
    ///
    /// Propagates selector failures.
    pub fn show_kill(&mut self) -> Result<Completion> {
        if !self.ensure_available() {
            return Ok(Completion::Unavailable);
        }
        let (sessions, panes) = match tmux::list_sessions(&self.runner)
            .and_then(|sessions| tmux::list_panes(&self.runner).map(|panes| (sessions, panes)))
        {
            Ok(listing) => listing,
            Err(err) => return Ok(self.unreadable(&err)),
        };
        if sessions.is_empty() && panes.is_empty() {
            debug!("Nothing to kill");
            return Ok(Completion::Empty);
        }

        let Some(target) = self
            .selector
            .show(KILL_TITLE, kill_options(&sessions, &panes))?
        else {
            return Ok(Completion::Cancelled);
        };

        self.kill(&target);
        Ok(Completion::Done)
    }

    /// Kill a target without showing a picker.
    pub fn kill(&self, target: &Target) {
        info!(target = %target, kind = target.kind(), "Killing tmux target");
        self.apply(&[kill_request(target)]);
        self.notifier.info(&kill_notice(target));
    }

    /// Create a detached session, optionally named.
    ///
    /// Not gated on a running server, since creating a session starts one.
    ///
    /// # Errors
    ///
    /// Propagates prompt failures.
    pub fn show_new_session(&mut self) -> Result<Completion> {
        let Some(input) = self.prompt.open("New session name (optional)", "")? else {
            return Ok(Completion::Cancelled);
        };
        let name = non_empty(&input);
        info!(name = ?name, "Creating tmux session");
        self.apply(&[Request::NewSession { name: name.clone() }]);

        let notice = name.map_or_else(
            || "New session created".to_string(),
            |name| format!("Session \"{name}\" created"),
        );
        self.notifier.info(&notice);
        Ok(Completion::Done)
    }

    /// Pick a session and open a new window in it.
    ///
    /// # Errors
    ///
    /// Propagates selector or prompt failures.
    pub fn show_new_window(&mut self) -> Result<Completion> {
        if !self.ensure_available() {
            return Ok(Completion::Unavailable);
        }
        let sessions = match tmux::list_sessions(&self.runner) {
            Ok(sessions) => sessions,
            Err(err) => return Ok(self.unreadable(&err)),
        };
        if sessions.is_empty() {
            return Ok(Completion::Empty);
        }

        let options = session_options(&sessions, NEW_WINDOW_ICON);
        let Some(target) = self.selector.show(NEW_WINDOW_TITLE, options)? else {
            return Ok(Completion::Cancelled);
        };
        let Some(input) = self.prompt.open("New window name (optional)", "")? else {
            return Ok(Completion::Cancelled);
        };
        let name = non_empty(&input);

        info!(session = target.session_name(), name = ?name, "Creating tmux window");
        self.apply(&[Request::NewWindow {
            session: target.session_name().to_string(),
            name: name.clone(),
        }]);

        let notice = name.map_or_else(
            || "New window created".to_string(),
            |name| format!("Window \"{name}\" created"),
        );
        self.notifier.info(&notice);
        Ok(Completion::Done)
    }

    fn ensure_available(&self) -> bool {
        if tmux::is_available(&self.runner) {
            return true;
        }
        self.notifier.error(NOT_RUNNING);
        false
    }

    fn unreadable(&self, err: &ParseError) -> Completion {
        tracing::error!(error = %err, "Failed to parse tmux listing");
        self.notifier
            .error(&format!("Could not read tmux state: {err}"));
        Completion::Unreadable
    }

    fn apply(&self, requests: &[Request]) {
        let batch: Vec<Vec<String>> = requests.iter().map(Request::args).collect();
        let outcomes = self.runner.run_batch(&batch);
        for (args, outcome) in batch.iter().zip(&outcomes) {
            tmux::log_failure(args, outcome);
        }
    }
}
