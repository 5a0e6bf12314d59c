//! Creating sessions and windows

use crate::common::{FakeRunner, RecordingNotifier, ScriptedPrompt, ScriptedSelector, argv};
use pretty_assertions::assert_eq;
use tmux_switcher::HotkeyId;
use tmux_switcher::switcher::{Completion, NEW_WINDOW_TITLE, NOT_RUNNING, TmuxSwitcher};

#[test]
fn test_new_session_named() -> anyhow::Result<()> {
    let runner = FakeRunner::new();
    let notifier = RecordingNotifier::default();
    let mut switcher = TmuxSwitcher::new(
        &runner,
        ScriptedSelector::dismissing(),
        ScriptedPrompt::answering(&[Some(" scratch ")]),
        &notifier,
    );

    assert_eq!(switcher.show_new_session()?, Completion::Done);
    assert_eq!(
        runner.calls(),
        vec![argv(&["new-session", "-d", "-s", "scratch"])]
    );
    assert_eq!(*notifier.info.borrow(), vec!["Session \"scratch\" created".to_string()]);
    Ok(())
}

#[test]
fn test_new_session_unnamed_works_without_server() -> anyhow::Result<()> {
    let runner = FakeRunner::down();
    let notifier = RecordingNotifier::default();
    let mut switcher = TmuxSwitcher::new(
        &runner,
        ScriptedSelector::dismissing(),
        ScriptedPrompt::answering(&[Some("")]),
        &notifier,
    );

    switcher.handle_hotkey(HotkeyId::TmuxNewSession)?;

    // No availability probe: the only call is the creation itself.
    assert_eq!(runner.calls(), vec![argv(&["new-session", "-d"])]);
    assert_eq!(*notifier.info.borrow(), vec!["New session created".to_string()]);
    assert!(notifier.error.borrow().is_empty());
    Ok(())
}

#[test]
fn test_new_session_dismissed() -> anyhow::Result<()> {
    let runner = FakeRunner::new();
    let mut switcher = TmuxSwitcher::new(
        &runner,
        ScriptedSelector::dismissing(),
        ScriptedPrompt::answering(&[None]),
        RecordingNotifier::default(),
    );

    assert_eq!(switcher.show_new_session()?, Completion::Cancelled);
    assert!(runner.calls().is_empty());
    Ok(())
}

#[test]
fn test_new_window_unnamed() -> anyhow::Result<()> {
    let runner = FakeRunner::new().with_listing("list-sessions", "work\t2\t1\ndev\t1\t0");
    let notifier = RecordingNotifier::default();
    let mut selector = ScriptedSelector::choosing("dev");
    let mut switcher = TmuxSwitcher::new(
        &runner,
        &mut selector,
        ScriptedPrompt::answering(&[Some("  ")]),
        &notifier,
    );

    assert_eq!(
        switcher.handle_hotkey(HotkeyId::TmuxNewWindow)?,
        Some(Completion::Done)
    );
    drop(switcher);

    assert_eq!(selector.shown[0].title, NEW_WINDOW_TITLE);
    assert_eq!(selector.shown[0].names, vec!["work", "dev"]);
    assert_eq!(runner.mutations(), vec![argv(&["new-window", "-t", "dev"])]);
    assert_eq!(*notifier.info.borrow(), vec!["New window created".to_string()]);
    Ok(())
}

#[test]
fn test_new_window_requires_server() -> anyhow::Result<()> {
    let runner = FakeRunner::down();
    let notifier = RecordingNotifier::default();
    let mut switcher = TmuxSwitcher::new(
        &runner,
        ScriptedSelector::choosing("work"),
        ScriptedPrompt::answering(&[Some("logs")]),
        &notifier,
    );

    assert_eq!(switcher.show_new_window()?, Completion::Unavailable);
    assert_eq!(*notifier.error.borrow(), vec![NOT_RUNNING.to_string()]);
    assert!(runner.mutations().is_empty());
    Ok(())
}

#[test]
fn test_new_window_without_sessions_never_shows_selector() -> anyhow::Result<()> {
    let runner = FakeRunner::new();
    let notifier = RecordingNotifier::default();
    let mut selector = ScriptedSelector::choosing("work");
    let mut prompt = ScriptedPrompt::answering(&[Some("logs")]);
    let mut switcher = TmuxSwitcher::new(&runner, &mut selector, &mut prompt, &notifier);

    assert_eq!(switcher.show_new_window()?, Completion::Empty);
    drop(switcher);

    assert!(selector.shown.is_empty());
    assert!(prompt.opened.is_empty());
    assert!(runner.mutations().is_empty());
    assert!(notifier.error.borrow().is_empty());
    Ok(())
}

#[test]
fn test_new_window_dismissed_selector_issues_nothing() -> anyhow::Result<()> {
    let runner = FakeRunner::new().with_listing("list-sessions", "work\t2\t1");
    let notifier = RecordingNotifier::default();
    let mut prompt = ScriptedPrompt::answering(&[Some("logs")]);
    let mut switcher = TmuxSwitcher::new(
        &runner,
        ScriptedSelector::dismissing(),
        &mut prompt,
        &notifier,
    );

    assert_eq!(switcher.show_new_window()?, Completion::Cancelled);
    drop(switcher);

    assert!(prompt.opened.is_empty());
    assert!(runner.mutations().is_empty());
    assert!(notifier.info.borrow().is_empty());
    Ok(())
}
