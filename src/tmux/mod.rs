//! Tmux integration module
//!
//! Everything that talks to the tmux binary lives here: the process adapter,
//! the inventory parser, the target model and the argv builders for mutating
//! commands.

mod inventory;
mod request;
mod runner;
mod target;

pub use inventory::{
    FIELD_SEPARATOR, Level, PANE_FORMAT, Pane, ParseError, ParseErrorKind, SESSION_FORMAT,
    Session, WINDOW_FORMAT, Window, list_panes, list_sessions, list_windows, parse_panes,
    parse_sessions, parse_windows,
};
pub use request::Request;
pub use runner::{
    DEFAULT_TIMEOUT, Outcome, Runner, Serialized, SystemRunner, execute, is_available,
};
pub(crate) use runner::log_failure;
pub use target::Target;

use std::ffi::OsString;

/// Environment variable that overrides the tmux program.
pub const TMUX_BIN_ENV: &str = "TMUX_SWITCHER_TMUX_BIN";

fn default_tmux_bin() -> OsString {
    #[cfg(windows)]
    {
        use std::path::PathBuf;

        let msys2_tmux = PathBuf::from(r"C:\msys64\usr\bin\tmux.exe");
        if msys2_tmux.exists() {
            return msys2_tmux.into_os_string();
        }
    }

    OsString::from("tmux")
}

/// Resolve the tmux program to run.
///
/// The environment override wins, then the configured program, then the
/// platform default.
#[must_use]
pub fn tmux_bin(configured: Option<&str>) -> OsString {
    std::env::var_os(TMUX_BIN_ENV)
        .or_else(|| {
            configured
                .filter(|program| !program.trim().is_empty())
                .map(OsString::from)
        })
        .unwrap_or_else(default_tmux_bin)
}
