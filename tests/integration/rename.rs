//! Renaming sessions and windows

use crate::common::{FakeRunner, RecordingNotifier, ScriptedPrompt, ScriptedSelector, argv};
use pretty_assertions::assert_eq;
use tmux_switcher::switcher::{Completion, RENAME_TITLE, TmuxSwitcher};

const SESSIONS: &str = "work\t2\t1\ndev\t1\t0";
const WINDOWS: &str = "work\t0\teditor\t1\t2\nwork\t1\tlogs\t0\t1\ndev\t0\tshell\t1\t1";

fn inventory() -> FakeRunner {
    FakeRunner::new()
        .with_listing("list-sessions", SESSIONS)
        .with_listing("list-windows", WINDOWS)
}

#[test]
fn test_rename_window_seeds_prompt_with_current_name() -> anyhow::Result<()> {
    let runner = inventory();
    let notifier = RecordingNotifier::default();
    let mut selector = ScriptedSelector::choosing("0: editor");
    let mut prompt = ScriptedPrompt::answering(&[Some("build")]);
    let mut switcher = TmuxSwitcher::new(&runner, &mut selector, &mut prompt, &notifier);

    assert_eq!(switcher.show_rename()?, Completion::Done);
    drop(switcher);

    assert_eq!(prompt.opened[0].1, "editor");
    assert_eq!(
        runner.mutations(),
        vec![argv(&["rename-window", "-t", "work:0", "build"])]
    );
    assert_eq!(*notifier.info.borrow(), vec!["Renamed to \"build\"".to_string()]);

    let shown = &selector.shown[0];
    assert_eq!(shown.title, RENAME_TITLE);
    assert_eq!(
        shown.names,
        vec!["work", "dev", "0: editor", "1: logs", "0: shell"]
    );
    assert_eq!(
        shown.descriptions[..2].to_vec(),
        vec!["Session — 2 windows".to_string(), "Session — 1 window".to_string()]
    );
    assert_eq!(shown.groups[4].as_deref(), Some("Windows"));
    Ok(())
}

#[test]
fn test_rename_session_trims_input() -> anyhow::Result<()> {
    let runner = inventory();
    let notifier = RecordingNotifier::default();
    let mut prompt = ScriptedPrompt::answering(&[Some("  scratch  ")]);
    let mut switcher = TmuxSwitcher::new(
        &runner,
        ScriptedSelector::choosing("dev"),
        &mut prompt,
        &notifier,
    );

    switcher.show_rename()?;
    drop(switcher);

    assert_eq!(prompt.opened[0].1, "dev");
    assert_eq!(
        runner.mutations(),
        vec![argv(&["rename-session", "-t", "dev", "scratch"])]
    );
    assert_eq!(*notifier.info.borrow(), vec!["Renamed to \"scratch\"".to_string()]);
    Ok(())
}

#[test]
fn test_whitespace_only_name_issues_nothing() -> anyhow::Result<()> {
    let runner = inventory();
    let notifier = RecordingNotifier::default();
    let mut switcher = TmuxSwitcher::new(
        &runner,
        ScriptedSelector::choosing("0: editor"),
        ScriptedPrompt::answering(&[Some("   ")]),
        &notifier,
    );

    assert_eq!(switcher.show_rename()?, Completion::Cancelled);
    assert!(runner.mutations().is_empty());
    assert!(notifier.info.borrow().is_empty());
    Ok(())
}

#[test]
fn test_dismissed_prompt_issues_nothing() -> anyhow::Result<()> {
    let runner = inventory();
    let mut switcher = TmuxSwitcher::new(
        &runner,
        ScriptedSelector::choosing("work"),
        ScriptedPrompt::answering(&[None]),
        RecordingNotifier::default(),
    );

    assert_eq!(switcher.show_rename()?, Completion::Cancelled);
    assert!(runner.mutations().is_empty());
    Ok(())
}

#[test]
fn test_name_with_shell_metacharacters_is_one_argument() -> anyhow::Result<()> {
    let runner = inventory();
    let mut switcher = TmuxSwitcher::new(
        &runner,
        ScriptedSelector::choosing("1: logs"),
        ScriptedPrompt::answering(&[Some("a\"; kill-server; echo \"")]),
        RecordingNotifier::default(),
    );

    switcher.show_rename()?;

    assert_eq!(
        runner.mutations(),
        vec![argv(&[
            "rename-window",
            "-t",
            "work:1",
            "a\"; kill-server; echo \""
        ])]
    );
    Ok(())
}

#[test]
fn test_malformed_window_listing_is_reported() -> anyhow::Result<()> {
    let runner = FakeRunner::new()
        .with_listing("list-sessions", SESSIONS)
        .with_listing("list-windows", "work\tzero\teditor\t1\t2");
    let notifier = RecordingNotifier::default();
    let mut selector = ScriptedSelector::choosing("work");
    let mut switcher = TmuxSwitcher::new(
        &runner,
        &mut selector,
        ScriptedPrompt::default(),
        &notifier,
    );

    assert_eq!(switcher.show_rename()?, Completion::Unreadable);
    drop(switcher);

    assert!(selector.shown.is_empty());
    let errors = notifier.error.borrow();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("line 1"));
    Ok(())
}

#[test]
fn test_empty_inventory_never_shows_selector() -> anyhow::Result<()> {
    let runner = FakeRunner::new();
    let notifier = RecordingNotifier::default();
    let mut selector = ScriptedSelector::choosing("work");
    let mut prompt = ScriptedPrompt::answering(&[Some("build")]);
    let mut switcher = TmuxSwitcher::new(&runner, &mut selector, &mut prompt, &notifier);

    assert_eq!(switcher.show_rename()?, Completion::Empty);
    drop(switcher);

    assert!(selector.shown.is_empty());
    assert!(prompt.opened.is_empty());
    assert!(runner.mutations().is_empty());
    assert!(notifier.error.borrow().is_empty());
    Ok(())
}

#[test]
fn test_dismissed_selector_never_opens_prompt() -> anyhow::Result<()> {
    let runner = inventory();
    let notifier = RecordingNotifier::default();
    let mut prompt = ScriptedPrompt::answering(&[Some("build")]);
    let mut switcher = TmuxSwitcher::new(
        &runner,
        ScriptedSelector::dismissing(),
        &mut prompt,
        &notifier,
    );

    assert_eq!(switcher.show_rename()?, Completion::Cancelled);
    drop(switcher);

    assert!(prompt.opened.is_empty());
    assert!(runner.mutations().is_empty());
    assert!(notifier.info.borrow().is_empty());
    Ok(())
}
