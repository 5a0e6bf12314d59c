//! Two-phase focus of a tab that lives inside a split container

use std::time::{Duration, Instant};
use tracing::debug;

use super::TabTree;

/// Default wait for the host's ready signal before focusing the child anyway.
pub const DEFAULT_FOCUS_FALLBACK: Duration = Duration::from_millis(50);

/// Where a [`FocusSequence`] currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState<H> {
    /// The parent container was activated; the child still needs focus.
    ActivatingParent {
        /// Container that was activated
        parent: H,
        /// Tab to focus once the container is ready
        child: H,
        /// When the parent was activated
        since: Instant,
    },
    /// The child is being focused.
    FocusingChild {
        /// Tab receiving focus
        child: H,
    },
    /// Nothing left to do.
    Done,
}

/// Brings a chosen tab to the front.
///
/// A tab inside a split cannot be focused until its container has been
/// selected and laid out. The sequence activates the container, then focuses
/// the child on whichever comes first: the host's [`ready`](Self::ready)
/// signal or a [`tick`](Self::tick) after the fallback delay.
#[derive(Debug, Clone, Copy)]
pub struct FocusSequence<H> {
    state: FocusState<H>,
    fallback: Duration,
}

impl<H: Copy + Eq + std::fmt::Debug> FocusSequence<H> {
    /// Start bringing `tab` to the front.
    ///
    /// Tabs without a distinct parent are activated directly and the returned
    /// sequence is already [`FocusState::Done`].
    pub fn start<T>(tree: &mut T, tab: H, fallback: Duration, now: Instant) -> Self
    where
        T: TabTree<Handle = H> + ?Sized,
    {
        match tree.parent(tab) {
            Some(parent) if parent != tab => {
                debug!(?parent, child = ?tab, "Activating parent container");
                tree.activate(parent);
                Self {
                    state: FocusState::ActivatingParent {
                        parent,
                        child: tab,
                        since: now,
                    },
                    fallback,
                }
            }
            _ => {
                debug!(?tab, "Activating tab");
                tree.activate(tab);
                Self {
                    state: FocusState::Done,
                    fallback,
                }
            }
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> FocusState<H> {
        self.state
    }

    /// Whether the sequence has finished.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self.state, FocusState::Done)
    }

    /// Time at which [`tick`](Self::tick) will focus the child on its own.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            FocusState::ActivatingParent { since, .. } => Some(since + self.fallback),
            FocusState::FocusingChild { .. } | FocusState::Done => None,
        }
    }

    /// The host reports that `parent` finished activating.
    ///
    /// Signals for any other container are ignored.
    pub fn ready<T>(&mut self, tree: &mut T, parent: H)
    where
        T: TabTree<Handle = H> + ?Sized,
    {
        if let FocusState::ActivatingParent {
            parent: waiting, ..
        } = self.state
            && waiting == parent
        {
            debug!(?parent, "Parent ready");
            self.focus_child(tree);
        }
    }

    /// Advance on the clock, focusing the child once the fallback elapsed.
    pub fn tick<T>(&mut self, tree: &mut T, now: Instant)
    where
        T: TabTree<Handle = H> + ?Sized,
    {
        if self.deadline().is_some_and(|deadline| now >= deadline) {
            debug!("Focus fallback elapsed");
            self.focus_child(tree);
        }
    }

    fn focus_child<T>(&mut self, tree: &mut T)
    where
        T: TabTree<Handle = H> + ?Sized,
    {
        let FocusState::ActivatingParent { child, .. } = self.state else {
            return;
        };
        self.state = FocusState::FocusingChild { child };
        tree.focus(child);
        self.state = FocusState::Done;
    }
}
