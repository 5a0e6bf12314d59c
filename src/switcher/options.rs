//! Selector option lists for the tmux actions

use crate::host::SelectorOption;
use crate::tmux::{Pane, Session, Target, Window};

/// Icon shown next to rename candidates.
pub const RENAME_ICON: &str = "fas fa-pen";
/// Icon shown next to kill candidates.
pub const KILL_ICON: &str = "fas fa-times";
/// Icon shown next to new-window candidates.
pub const NEW_WINDOW_ICON: &str = "fas fa-plus";

const SESSIONS_GROUP: &str = "Sessions";
const WINDOWS_GROUP: &str = "Windows";

/// "Session — 1 window" / "Session — 3 windows"
#[must_use]
pub fn session_description(session: &Session) -> String {
    let plural = if session.window_count == 1 { "" } else { "s" };
    format!("Session — {} window{plural}", session.window_count)
}

fn pane_label(pane: &Pane) -> String {
    format!("{}:{} — {}", pane.window_name, pane.pane_index, pane.command)
}

fn pane_description(pane: &Pane) -> String {
    format!("{} → window {}", pane.session, pane.window_index)
}

/// One option per session, grouped under "Sessions".
#[must_use]
pub fn session_options(sessions: &[Session], icon: &str) -> Vec<SelectorOption<Target>> {
    sessions
        .iter()
        .map(|session| {
            SelectorOption::new(session.name.clone(), Target::from(session))
                .with_description(session_description(session))
                .with_group(SESSIONS_GROUP)
                .with_icon(Some(icon.to_string()))
        })
        .collect()
}

/// Options for the switch picker: every pane, grouped by session, with the
/// active pane of each window marked.
#[must_use]
pub fn switch_options(panes: &[Pane]) -> Vec<SelectorOption<Target>> {
    panes
        .iter()
        .map(|pane| {
            let marker = if pane.active { " *" } else { "" };
            SelectorOption::new(format!("{}{marker}", pane_label(pane)), Target::from(pane))
                .with_description(pane_description(pane))
                .with_group(pane.session.clone())
        })
        .collect()
}

/// Options for the rename picker: sessions, then windows.
#[must_use]
pub fn rename_options(sessions: &[Session], windows: &[Window]) -> Vec<SelectorOption<Target>> {
    let mut options = session_options(sessions, RENAME_ICON);
    options.extend(windows.iter().map(|window| {
        SelectorOption::new(format!("{}: {}", window.index, window.name), Target::from(window))
            .with_description(window.session.clone())
            .with_group(WINDOWS_GROUP)
            .with_icon(Some(RENAME_ICON.to_string()))
    }));
    options
}

/// Options for the kill picker: sessions, then panes grouped per session.
#[must_use]
pub fn kill_options(sessions: &[Session], panes: &[Pane]) -> Vec<SelectorOption<Target>> {
    let mut options = session_options(sessions, KILL_ICON);
    options.extend(panes.iter().map(|pane| {
        SelectorOption::new(pane_label(pane), Target::from(pane))
            .with_description(pane_description(pane))
            .with_group(format!("{} windows/panes", pane.session))
            .with_icon(Some(KILL_ICON.to_string()))
    }));
    options
}
