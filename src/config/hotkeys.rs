//! Hotkey catalogue and default bindings

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every hotkey the switcher registers with its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HotkeyId {
    /// Show the tab switcher
    SwitcherShow,
    /// Rename a tab picked from the switcher
    SwitcherRename,
    /// Close a tab picked from the switcher
    SwitcherClose,
    /// Duplicate a tab picked from the switcher
    SwitcherDuplicate,
    /// Switch tmux session/window/pane
    TmuxSwitch,
    /// Rename a tmux session or window
    TmuxRename,
    /// Kill a tmux session/window/pane
    TmuxKill,
    /// Create a tmux session
    TmuxNewSession,
    /// Create a tmux window
    TmuxNewWindow,
}

/// Which engine a hotkey belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyGroup {
    /// Host tab tree actions
    Tabs,
    /// Tmux actions
    Tmux,
}

impl HotkeyGroup {
    /// Get the display title for this group
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Tabs => "Tabs",
            Self::Tmux => "Tmux",
        }
    }
}

impl HotkeyId {
    /// All hotkeys in registration order.
    pub const ALL: &'static [Self] = &[
        Self::SwitcherShow,
        Self::SwitcherRename,
        Self::SwitcherClose,
        Self::SwitcherDuplicate,
        Self::TmuxSwitch,
        Self::TmuxRename,
        Self::TmuxKill,
        Self::TmuxNewSession,
        Self::TmuxNewWindow,
    ];

    /// The id string the host registers.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::SwitcherShow => "switcher-show",
            Self::SwitcherRename => "switcher-rename",
            Self::SwitcherClose => "switcher-close",
            Self::SwitcherDuplicate => "switcher-duplicate",
            Self::TmuxSwitch => "tmux-switch",
            Self::TmuxRename => "tmux-rename",
            Self::TmuxKill => "tmux-kill",
            Self::TmuxNewSession => "tmux-new-session",
            Self::TmuxNewWindow => "tmux-new-window",
        }
    }

    /// Look up a hotkey by its id string.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|hotkey| hotkey.id() == id)
    }

    /// Get the display description for this hotkey
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::SwitcherShow => "Show the tab switcher",
            Self::SwitcherRename => "Rename a tab (via switcher)",
            Self::SwitcherClose => "Close a tab (via switcher)",
            Self::SwitcherDuplicate => "Duplicate a tab (via switcher)",
            Self::TmuxSwitch => "Switch tmux session/window/pane",
            Self::TmuxRename => "Rename tmux session or window",
            Self::TmuxKill => "Kill tmux session/window/pane",
            Self::TmuxNewSession => "Create new tmux session",
            Self::TmuxNewWindow => "Create new tmux window",
        }
    }

    /// Get the group this hotkey belongs to
    #[must_use]
    pub const fn group(self) -> HotkeyGroup {
        match self {
            Self::SwitcherShow
            | Self::SwitcherRename
            | Self::SwitcherClose
            | Self::SwitcherDuplicate => HotkeyGroup::Tabs,
            Self::TmuxSwitch
            | Self::TmuxRename
            | Self::TmuxKill
            | Self::TmuxNewSession
            | Self::TmuxNewWindow => HotkeyGroup::Tmux,
        }
    }
}

/// Hotkey binding configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hotkeys {
    /// Key strings bound to each hotkey
    bindings: BTreeMap<HotkeyId, Vec<String>>,
}

/// Key that opens the tab switcher on this platform.
#[must_use]
pub const fn default_switcher_key() -> &'static str {
    if cfg!(target_os = "macos") {
        "Cmd-Shift-T"
    } else {
        "Ctrl-Shift-T"
    }
}

impl Default for Hotkeys {
    fn default() -> Self {
        let mut bindings = BTreeMap::new();
        for &hotkey in HotkeyId::ALL {
            bindings.insert(hotkey, Vec::new());
        }
        bindings.insert(
            HotkeyId::SwitcherShow,
            vec![default_switcher_key().to_string()],
        );
        Self { bindings }
    }
}

impl Hotkeys {
    /// Merge in any missing default hotkeys
    ///
    /// Ids added in later releases become available without overwriting what
    /// the user already bound.
    pub fn merge_defaults(&mut self) {
        let defaults = Self::default();
        for (hotkey, keys) in defaults.bindings {
            self.bindings.entry(hotkey).or_insert(keys);
        }
    }

    /// Keys bound to a hotkey.
    #[must_use]
    pub fn keys_for(&self, hotkey: HotkeyId) -> &[String] {
        self.bindings.get(&hotkey).map_or(&[], Vec::as_slice)
    }

    /// Find the hotkey bound to a key string, ignoring ASCII case.
    #[must_use]
    pub fn hotkey_for(&self, key: &str) -> Option<HotkeyId> {
        self.bindings.iter().find_map(|(&hotkey, keys)| {
            keys.iter()
                .any(|bound| bound.eq_ignore_ascii_case(key))
                .then_some(hotkey)
        })
    }

    /// Bind a key, keeping existing keys for the hotkey.
    pub fn bind(&mut self, hotkey: HotkeyId, key: &str) {
        let keys = self.bindings.entry(hotkey).or_default();
        if !keys.iter().any(|bound| bound == key) {
            keys.push(key.to_string());
        }
    }

    /// Generate a formatted help line for a hotkey: "  keys    description"
    #[must_use]
    pub fn help_line(&self, hotkey: HotkeyId) -> String {
        let keys = self.keys_for(hotkey);
        let keys = if keys.is_empty() {
            "-".to_string()
        } else {
            keys.join("/")
        };
        format!("  {:<20} {keys:<14} {}", hotkey.id(), hotkey.description())
    }
}
