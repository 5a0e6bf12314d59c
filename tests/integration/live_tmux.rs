//! End-to-end checks against a private tmux server

use crate::common::{
    IsolatedServer, RecordingNotifier, ScriptedPrompt, ScriptedSelector, skip_if_no_tmux,
};
use pretty_assertions::assert_eq;
use tmux_switcher::switcher::{Completion, TmuxSwitcher};
use tmux_switcher::tmux::{self, Target};

#[test]
fn test_inventory_of_fresh_server() -> anyhow::Result<()> {
    if skip_if_no_tmux() {
        return Ok(());
    }
    let server = IsolatedServer::new("inventory");
    let runner = server.runner();
    assert!(!tmux::is_available(&runner));

    assert!(server.run(&["new-session", "-d", "-s", "alpha", "-n", "main"]));
    assert!(server.run(&["split-window", "-d", "-t", "alpha:main"]));
    assert!(tmux::is_available(&runner));

    let sessions = tmux::list_sessions(&runner)?;
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].name, "alpha");
    assert_eq!(sessions[0].window_count, 1);

    let windows = tmux::list_windows(&runner)?;
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].name, "main");
    assert_eq!(windows[0].pane_count, 2);

    let panes = tmux::list_panes(&runner)?;
    assert_eq!(panes.len(), 2);
    assert_eq!(panes.iter().filter(|pane| pane.active).count(), 1);
    Ok(())
}

#[test]
fn test_rename_session_through_switcher() -> anyhow::Result<()> {
    if skip_if_no_tmux() {
        return Ok(());
    }
    let server = IsolatedServer::new("rename");
    assert!(server.run(&["new-session", "-d", "-s", "alpha"]));

    let runner = server.runner();
    let notifier = RecordingNotifier::default();
    let mut switcher = TmuxSwitcher::new(
        &runner,
        ScriptedSelector::choosing("alpha"),
        ScriptedPrompt::answering(&[Some("it's \"quoted\"")]),
        &notifier,
    );

    assert_eq!(switcher.show_rename()?, Completion::Done);

    let sessions = tmux::list_sessions(&runner)?;
    assert_eq!(sessions[0].name, "it's \"quoted\"");
    assert_eq!(
        *notifier.info.borrow(),
        vec!["Renamed to \"it's \"quoted\"\"".to_string()]
    );
    Ok(())
}

#[test]
fn test_new_window_and_kill_window() -> anyhow::Result<()> {
    if skip_if_no_tmux() {
        return Ok(());
    }
    let server = IsolatedServer::new("create-kill");
    assert!(server.run(&["new-session", "-d", "-s", "alpha"]));

    let runner = server.runner();
    let mut switcher = TmuxSwitcher::new(
        &runner,
        ScriptedSelector::choosing("alpha"),
        ScriptedPrompt::answering(&[Some("logs")]),
        RecordingNotifier::default(),
    );
    assert_eq!(switcher.show_new_window()?, Completion::Done);

    let windows = tmux::list_windows(&runner)?;
    assert_eq!(windows.len(), 2);
    let Some(logs) = windows.iter().find(|window| window.name == "logs") else {
        anyhow::bail!("new window not listed: {windows:?}");
    };

    switcher.kill(&Target::Window {
        session: "alpha".to_string(),
        window_index: logs.index,
    });

    let windows = tmux::list_windows(&runner)?;
    assert_eq!(windows.len(), 1);
    assert!(windows.iter().all(|window| window.name != "logs"));
    Ok(())
}
