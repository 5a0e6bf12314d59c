//! Switching to a pane picked from the inventory

use crate::common::{FakeRunner, RecordingNotifier, ScriptedPrompt, ScriptedSelector, argv};
use pretty_assertions::assert_eq;
use tmux_switcher::switcher::{Completion, NOT_RUNNING, SWITCH_TITLE, TmuxSwitcher};
use tmux_switcher::tmux::Outcome;
use tmux_switcher::{HotkeyId, Target};

const PANES: &str = "work\t0\teditor\t0\tvim\t1\nwork\t0\teditor\t1\tzsh\t0\ndev\t2\tlogs\t0\ttail\t1";

#[test]
fn test_switch_selects_window_then_pane() -> anyhow::Result<()> {
    let runner = FakeRunner::new().with_listing("list-panes", PANES);
    let notifier = RecordingNotifier::default();
    let mut selector = ScriptedSelector::choosing("editor:1 — zsh");
    let mut switcher = TmuxSwitcher::new(
        &runner,
        &mut selector,
        ScriptedPrompt::default(),
        &notifier,
    );

    assert_eq!(switcher.show_switch()?, Completion::Done);
    drop(switcher);

    assert_eq!(
        runner.mutations(),
        vec![
            argv(&["select-window", "-t", "work:0"]),
            argv(&["select-pane", "-t", "work:0.1"]),
        ]
    );
    assert!(notifier.info.borrow().is_empty());
    assert!(notifier.error.borrow().is_empty());

    let shown = &selector.shown[0];
    assert_eq!(shown.title, SWITCH_TITLE);
    assert_eq!(
        shown.names,
        vec!["editor:0 — vim *", "editor:1 — zsh", "logs:0 — tail *"]
    );
    assert_eq!(shown.descriptions[2], "dev → window 2");
    assert_eq!(shown.groups[0].as_deref(), Some("work"));
    Ok(())
}

#[test]
fn test_switch_checks_server_then_lists_all_panes() -> anyhow::Result<()> {
    let runner = FakeRunner::new().with_listing("list-panes", PANES);
    let mut switcher = TmuxSwitcher::new(
        &runner,
        ScriptedSelector::dismissing(),
        ScriptedPrompt::default(),
        RecordingNotifier::default(),
    );

    assert_eq!(switcher.show_switch()?, Completion::Cancelled);

    let calls = runner.calls();
    assert_eq!(calls[0], argv(&["list-sessions"]));
    assert_eq!(calls[1][..2].to_vec(), argv(&["list-panes", "-a"]));
    assert_eq!(calls.len(), 2);
    Ok(())
}

#[test]
fn test_switch_without_server_notifies_once() -> anyhow::Result<()> {
    let runner = FakeRunner::down();
    let notifier = RecordingNotifier::default();
    let mut selector = ScriptedSelector::choosing("anything");
    let mut switcher = TmuxSwitcher::new(
        &runner,
        &mut selector,
        ScriptedPrompt::default(),
        &notifier,
    );

    assert_eq!(
        switcher.handle_hotkey(HotkeyId::TmuxSwitch)?,
        Some(Completion::Unavailable)
    );
    drop(switcher);

    assert!(selector.shown.is_empty());
    assert_eq!(*notifier.error.borrow(), vec![NOT_RUNNING.to_string()]);
    assert_eq!(runner.calls().len(), 1);
    Ok(())
}

#[test]
fn test_empty_inventory_never_shows_selector() -> anyhow::Result<()> {
    let runner = FakeRunner::new().with_listing("list-panes", "\n");
    let notifier = RecordingNotifier::default();
    let mut selector = ScriptedSelector::choosing("anything");
    let mut switcher = TmuxSwitcher::new(
        &runner,
        &mut selector,
        ScriptedPrompt::default(),
        &notifier,
    );

    assert_eq!(switcher.show_switch()?, Completion::Empty);
    drop(switcher);

    assert!(selector.shown.is_empty());
    assert!(notifier.error.borrow().is_empty());
    assert!(runner.mutations().is_empty());
    Ok(())
}

#[test]
fn test_failed_select_window_skips_select_pane() {
    let runner = FakeRunner::new().with_failure(
        "select-window",
        Outcome::Failed {
            code: Some(1),
            stderr: "can't find window: 7".to_string(),
        },
    );
    let switcher = TmuxSwitcher::new(
        &runner,
        ScriptedSelector::dismissing(),
        ScriptedPrompt::default(),
        RecordingNotifier::default(),
    );

    switcher.switch_to(&Target::Pane {
        session: "work".to_string(),
        window_index: 7,
        pane_index: 0,
    });

    assert_eq!(
        runner.mutations(),
        vec![argv(&["select-window", "-t", "work:7"])]
    );
}

#[test]
fn test_session_target_switches_client() {
    let runner = FakeRunner::new();
    let switcher = TmuxSwitcher::new(
        &runner,
        ScriptedSelector::dismissing(),
        ScriptedPrompt::default(),
        RecordingNotifier::default(),
    );

    switcher.switch_to(&Target::Session {
        session: "dev".to_string(),
    });

    assert_eq!(
        runner.mutations(),
        vec![argv(&["switch-client", "-t", "dev"])]
    );
}
