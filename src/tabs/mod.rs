//! Host tab inventory engine
//!
//! Flattens the host's tab tree into a pick list (one entry per leaf of a
//! split container) and brings the chosen tab to the front. The same picker
//! drives the rename, close and duplicate hotkeys.

mod focus;

pub use focus::{DEFAULT_FOCUS_FALLBACK, FocusSequence, FocusState};

use anyhow::Result;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::HotkeyId;
use crate::host::{Prompt, Selector, SelectorOption, non_empty};

/// Selector title for switching tabs.
pub const SWITCH_TITLE: &str = "Switch to tab";

/// The host application's tab tree.
///
/// Handles are cheap identifiers; every query goes back to the host, so the
/// engine never holds on to tab state of its own.
pub trait TabTree {
    /// Identifier of one tab or split container.
    type Handle: Copy + Eq + fmt::Debug;

    /// Top-level tab slots in display order.
    fn top_level(&self) -> Vec<Self::Handle>;
    /// Whether `tab` is a split container.
    fn is_split(&self, tab: Self::Handle) -> bool;
    /// Leaf tabs of a split container, in layout order.
    fn leaves(&self, split: Self::Handle) -> Vec<Self::Handle>;
    /// Title set by the user, if any.
    fn custom_title(&self, tab: Self::Handle) -> Option<String>;
    /// Title the tab gives itself.
    fn title(&self, tab: Self::Handle) -> String;
    /// Icon identifier.
    fn icon(&self, tab: Self::Handle) -> Option<String>;
    /// Accent color.
    fn color(&self, tab: Self::Handle) -> Option<String>;
    /// Container holding `tab`, if any.
    fn parent(&self, tab: Self::Handle) -> Option<Self::Handle>;
    /// Select a top-level slot.
    fn activate(&mut self, tab: Self::Handle);
    /// Focus a tab inside its container.
    fn focus(&mut self, tab: Self::Handle);
    /// Replace the user-set title.
    fn set_custom_title(&mut self, tab: Self::Handle, title: &str);
    /// Close a tab.
    fn close(&mut self, tab: Self::Handle);
    /// Open a copy of a tab.
    fn duplicate(&mut self, tab: Self::Handle);
}

/// One pickable tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabEntry<H> {
    /// Tab handle
    pub handle: H,
    /// Custom title if non-empty, else the tab's own title
    pub title: String,
    /// 1-based position of the top-level slot containing the tab
    pub position: usize,
    /// Icon identifier
    pub icon: Option<String>,
    /// Accent color
    pub color: Option<String>,
}

fn entry<T: TabTree + ?Sized>(tree: &T, handle: T::Handle, position: usize) -> TabEntry<T::Handle> {
    let title = tree
        .custom_title(handle)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| tree.title(handle));
    TabEntry {
        handle,
        title,
        position,
        icon: tree.icon(handle),
        color: tree.color(handle),
    }
}

/// Flatten the tab tree into entries.
///
/// Split containers contribute one entry per leaf, all sharing the
/// container's position; an empty split contributes itself.
pub fn collect_tabs<T: TabTree + ?Sized>(tree: &T) -> Vec<TabEntry<T::Handle>> {
    let mut entries = Vec::new();
    for (slot, tab) in tree.top_level().into_iter().enumerate() {
        let position = slot + 1;
        if tree.is_split(tab) {
            let leaves = tree.leaves(tab);
            if leaves.is_empty() {
                entries.push(entry(tree, tab, position));
            }
            entries.extend(leaves.into_iter().map(|leaf| entry(tree, leaf, position)));
        } else {
            entries.push(entry(tree, tab, position));
        }
    }
    entries
}

/// Selector options for `entries`.
#[must_use]
pub fn tab_options<H: Clone>(entries: &[TabEntry<H>]) -> Vec<SelectorOption<TabEntry<H>>> {
    entries
        .iter()
        .map(|entry| {
            let name = if entry.title.is_empty() {
                format!("Tab {}", entry.position)
            } else {
                entry.title.clone()
            };
            SelectorOption::new(name, entry.clone())
                .with_description(format!("Tab #{}", entry.position))
                .with_icon(entry.icon.clone())
                .with_color(entry.color.clone())
        })
        .collect()
}

/// How a tab action ended.
#[derive(Debug, Clone, Copy)]
pub enum TabOutcome<H> {
    /// The chosen tab is being brought to the front.
    Focusing(FocusSequence<H>),
    /// The action was applied to the chosen tab.
    Applied,
    /// The user dismissed the picker or prompt.
    Cancelled,
    /// There were no tabs to offer.
    Empty,
}

/// Drives the tab actions against host-supplied collaborators.
#[derive(Debug)]
pub struct TabSwitcher<S, P> {
    selector: S,
    prompt: P,
    fallback: Duration,
}

impl<S: Selector, P: Prompt> TabSwitcher<S, P> {
    /// Create an engine with the default focus fallback.
    pub const fn new(selector: S, prompt: P) -> Self {
        Self {
            selector,
            prompt,
            fallback: DEFAULT_FOCUS_FALLBACK,
        }
    }

    /// Replace the delay after which a split child is focused without a
    /// ready signal.
    #[must_use]
    pub const fn with_focus_fallback(mut self, fallback: Duration) -> Self {
        self.fallback = fallback;
        self
    }

    /// Run the action bound to a tab hotkey.
    ///
    /// Returns `Ok(None)` for hotkeys that belong to the tmux engine.
    ///
    /// # Errors
    ///
    /// Propagates selector or prompt failures.
    pub fn handle_hotkey<T: TabTree + ?Sized>(
        &mut self,
        hotkey: HotkeyId,
        tree: &mut T,
    ) -> Result<Option<TabOutcome<T::Handle>>> {
        let outcome = match hotkey {
            HotkeyId::SwitcherShow => self.show(tree)?,
            HotkeyId::SwitcherRename => self.rename(tree)?,
            HotkeyId::SwitcherClose => self.close(tree)?,
            HotkeyId::SwitcherDuplicate => self.duplicate(tree)?,
            HotkeyId::TmuxSwitch
            | HotkeyId::TmuxRename
            | HotkeyId::TmuxKill
            | HotkeyId::TmuxNewSession
            | HotkeyId::TmuxNewWindow => return Ok(None),
        };
        Ok(Some(outcome))
    }

    /// Pick a tab and bring it to the front.
    ///
    /// The returned sequence must be driven with
    /// [`FocusSequence::ready`] or [`FocusSequence::tick`] when the tab sits
    /// inside a split.
    ///
    /// # Errors
    ///
    /// Propagates selector failures.
    pub fn show<T: TabTree + ?Sized>(&mut self, tree: &mut T) -> Result<TabOutcome<T::Handle>> {
        let chosen = match self.pick(tree, SWITCH_TITLE)? {
            Ok(chosen) => chosen,
            Err(outcome) => return Ok(outcome),
        };
        info!(tab = ?chosen.handle, position = chosen.position, "Switching tab");
        Ok(TabOutcome::Focusing(FocusSequence::start(
            tree,
            chosen.handle,
            self.fallback,
            Instant::now(),
        )))
    }

    /// Pick a tab and give it a custom title.
    ///
    /// # Errors
    ///
    /// Propagates selector or prompt failures.
    pub fn rename<T: TabTree + ?Sized>(&mut self, tree: &mut T) -> Result<TabOutcome<T::Handle>> {
        let chosen = match self.pick(tree, "Rename tab")? {
            Ok(chosen) => chosen,
            Err(outcome) => return Ok(outcome),
        };
        let Some(title) = self
            .prompt
            .open("Rename tab", &chosen.title)?
            .as_deref()
            .and_then(non_empty)
        else {
            return Ok(TabOutcome::Cancelled);
        };
        info!(tab = ?chosen.handle, %title, "Renaming tab");
        tree.set_custom_title(chosen.handle, &title);
        Ok(TabOutcome::Applied)
    }

    /// Pick a tab and close it.
    ///
    /// # Errors
    ///
    /// Propagates selector failures.
    pub fn close<T: TabTree + ?Sized>(&mut self, tree: &mut T) -> Result<TabOutcome<T::Handle>> {
        let chosen = match self.pick(tree, "Close tab")? {
            Ok(chosen) => chosen,
            Err(outcome) => return Ok(outcome),
        };
        info!(tab = ?chosen.handle, "Closing tab");
        tree.close(chosen.handle);
        Ok(TabOutcome::Applied)
    }

    /// Pick a tab and duplicate it.
    ///
    /// # Errors
    ///
    /// Propagates selector failures.
    pub fn duplicate<T: TabTree + ?Sized>(
        &mut self,
        tree: &mut T,
    ) -> Result<TabOutcome<T::Handle>> {
        let chosen = match self.pick(tree, "Duplicate tab")? {
            Ok(chosen) => chosen,
            Err(outcome) => return Ok(outcome),
        };
        info!(tab = ?chosen.handle, "Duplicating tab");
        tree.duplicate(chosen.handle);
        Ok(TabOutcome::Applied)
    }

    /// Show the picker; `Err` carries the outcome when nothing was chosen.
    fn pick<T: TabTree + ?Sized>(
        &mut self,
        tree: &T,
        title: &str,
    ) -> Result<Result<TabEntry<T::Handle>, TabOutcome<T::Handle>>> {
        let entries = collect_tabs(tree);
        if entries.is_empty() {
            debug!("No tabs to offer");
            return Ok(Err(TabOutcome::Empty));
        }
        Ok(self
            .selector
            .show(title, tab_options(&entries))?
            .ok_or(TabOutcome::Cancelled))
    }
}
