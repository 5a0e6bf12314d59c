//! Common test utilities shared across integration tests


pub use fakes::{
    FakeRunner, FakeTabs, RecordingNotifier, ScriptedPrompt, ScriptedSelector, Tab, argv,
};
pub use helpers::{IsolatedServer, skip_if_no_tmux};
