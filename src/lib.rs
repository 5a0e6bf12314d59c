//! tmux-switcher - quick switching between tmux targets and host tabs
//!
//! Two engines share one set of host collaborators ([`host::Selector`],
//! [`host::Prompt`], [`host::Notifier`]):
//!
//! - [`switcher::TmuxSwitcher`] lists tmux sessions, windows and panes,
//!   lets the user pick one and switches to, renames, kills or creates it.
//! - [`tabs::TabSwitcher`] flattens a host's tab tree, split containers
//!   included, and brings the chosen tab to the front.
//!
//! The `tmux-switcher` binary wires both to terminal modals.

mod command;

pub mod config;
pub mod host;
pub mod paths;
pub mod switcher;
pub mod tabs;
pub mod tmux;
pub mod tui;

pub use config::{Config, HotkeyId};
pub use switcher::{Completion, TmuxSwitcher};
pub use tabs::{TabSwitcher, TabTree};
pub use tmux::Target;
