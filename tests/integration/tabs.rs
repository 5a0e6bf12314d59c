//! Tab inventory and focus across split containers

use std::time::{Duration, Instant};

use crate::common::{FakeTabs, ScriptedPrompt, ScriptedSelector, Tab};
use pretty_assertions::assert_eq;
use tmux_switcher::HotkeyId;
use tmux_switcher::tabs::{FocusSequence, FocusState, SWITCH_TITLE, TabOutcome, TabSwitcher, collect_tabs};

fn layout() -> (FakeTabs, Tab, Vec<Tab>) {
    let mut tabs = FakeTabs::new();
    tabs.tab("zsh");
    let (split, leaves) = tabs.split(&["vim", "cargo watch"]);
    tabs.tab("");
    (tabs, split, leaves)
}

#[test]
fn test_collect_tabs_flattens_splits() {
    let (tabs, _, leaves) = layout();
    let entries = collect_tabs(&tabs);

    assert_eq!(
        entries
            .iter()
            .map(|e| (e.handle, e.title.as_str(), e.position))
            .collect::<Vec<_>>(),
        vec![
            (Tab(0), "zsh", 1),
            (leaves[0], "vim", 2),
            (leaves[1], "cargo watch", 2),
            (Tab(4), "", 3),
        ]
    );
}

#[test]
fn test_switcher_options_and_direct_activation() -> anyhow::Result<()> {
    let (mut tabs, _, _) = layout();
    tabs.colored(Tab(0), "green");
    let mut selector = ScriptedSelector::choosing("Tab 3");
    let mut switcher = TabSwitcher::new(&mut selector, ScriptedPrompt::default());

    let outcome = switcher.handle_hotkey(HotkeyId::SwitcherShow, &mut tabs)?;
    drop(switcher);

    let Some(TabOutcome::Focusing(sequence)) = outcome else {
        anyhow::bail!("expected the switcher to focus a tab");
    };
    assert!(sequence.is_done());
    assert_eq!(tabs.log, vec!["activate 4"]);

    let shown = &selector.shown[0];
    assert_eq!(shown.title, SWITCH_TITLE);
    assert_eq!(shown.names, vec!["zsh", "vim", "cargo watch", "Tab 3"]);
    assert_eq!(shown.descriptions, vec!["Tab #1", "Tab #2", "Tab #2", "Tab #3"]);
    Ok(())
}

#[test]
fn test_split_child_waits_for_fallback() -> anyhow::Result<()> {
    let (mut tabs, split, leaves) = layout();
    let mut switcher = TabSwitcher::new(
        ScriptedSelector::choosing("cargo watch"),
        ScriptedPrompt::default(),
    )
    .with_focus_fallback(Duration::from_millis(50));

    let TabOutcome::Focusing(mut sequence) = switcher.show(&mut tabs)? else {
        anyhow::bail!("expected the switcher to focus a tab");
    };

    assert_eq!(tabs.log, vec![format!("activate {}", split.0)]);
    let Some(deadline) = sequence.deadline() else {
        anyhow::bail!("expected a pending focus");
    };

    sequence.tick(&mut tabs, deadline - Duration::from_millis(1));
    assert!(!sequence.is_done());

    sequence.tick(&mut tabs, deadline);
    assert_eq!(sequence.state(), FocusState::Done);
    assert_eq!(
        tabs.log,
        vec![
            format!("activate {}", split.0),
            format!("focus {}", leaves[1].0)
        ]
    );
    Ok(())
}

#[test]
fn test_ready_signal_beats_fallback() {
    let (mut tabs, split, leaves) = layout();
    let now = Instant::now();
    let mut sequence = FocusSequence::start(&mut tabs, leaves[0], Duration::from_secs(60), now);

    sequence.ready(&mut tabs, split);

    assert!(sequence.is_done());
    assert_eq!(tabs.log.last().map(String::as_str), Some("focus 2"));
}

#[test]
fn test_rename_seeds_current_title() -> anyhow::Result<()> {
    let (mut tabs, _, leaves) = layout();
    let mut prompt = ScriptedPrompt::answering(&[Some(" tests ")]);
    let mut switcher = TabSwitcher::new(ScriptedSelector::choosing("cargo watch"), &mut prompt);

    let outcome = switcher.handle_hotkey(HotkeyId::SwitcherRename, &mut tabs)?;
    drop(switcher);

    assert!(matches!(outcome, Some(TabOutcome::Applied)));
    assert_eq!(prompt.opened, vec![("Rename tab".to_string(), "cargo watch".to_string())]);
    assert_eq!(tabs.log, vec![format!("title {} tests", leaves[1].0)]);
    assert_eq!(collect_tabs(&tabs)[2].title, "tests");
    Ok(())
}

#[test]
fn test_close_and_duplicate() -> anyhow::Result<()> {
    let (mut tabs, _, _) = layout();
    let mut selector = ScriptedSelector::choosing("zsh");
    let mut switcher = TabSwitcher::new(&mut selector, ScriptedPrompt::default());

    switcher.handle_hotkey(HotkeyId::SwitcherDuplicate, &mut tabs)?;
    switcher.handle_hotkey(HotkeyId::SwitcherClose, &mut tabs)?;
    drop(switcher);

    assert_eq!(tabs.log, vec!["duplicate 0", "close 0"]);
    assert_eq!(
        selector
            .shown
            .iter()
            .map(|s| s.title.as_str())
            .collect::<Vec<_>>(),
        vec!["Duplicate tab", "Close tab"]
    );
    Ok(())
}

#[test]
fn test_empty_tree_shows_nothing() -> anyhow::Result<()> {
    let mut tabs = FakeTabs::new();
    let mut selector = ScriptedSelector::choosing("zsh");
    let mut switcher = TabSwitcher::new(&mut selector, ScriptedPrompt::default());

    let outcome = switcher.show(&mut tabs)?;
    drop(switcher);

    assert!(matches!(outcome, TabOutcome::Empty));
    assert!(selector.shown.is_empty());
    Ok(())
}
