//! Terminal collaborators for the command-line front end
//!
//! [`TerminalSelector`] and [`TerminalPrompt`] draw a modal on the alternate
//! screen for the duration of one question, then hand the terminal back.
//! [`ConsoleNotifier`] prints notices after the modal is gone.

mod colors;
mod input;
mod notifier;
mod picker;
mod prompt;

pub use input::InputState;
pub use notifier::ConsoleNotifier;
pub use picker::{PickerState, Row, render_picker};
pub use prompt::{PromptState, render_prompt};

use anyhow::{Context, Result};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    crossterm::{
        event::{self, Event, KeyEvent, KeyEventKind},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    layout::{Constraint, Direction, Layout, Rect},
};
use std::io::{self, Stdout};
use tracing::{debug, warn};

use crate::host::{Prompt, Selector, SelectorOption};

/// A modal that reacts to keys until it produces an output.
pub trait Modal {
    /// Value produced when the modal closes.
    type Output;

    /// Handle one key press; `Some` closes the modal.
    fn handle_key(&mut self, key: KeyEvent) -> Option<Self::Output>;

    /// Draw the modal.
    fn render(&self, frame: &mut Frame<'_>);
}

/// Create a centered rect with percentage width and absolute height
#[must_use]
pub fn centered_rect_absolute(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical_padding = area.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(vertical_padding),
            Constraint::Length(height),
            Constraint::Length(vertical_padding),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Drive `modal` on `terminal` with events from `next_event` until it closes.
///
/// # Errors
///
/// Returns an error if drawing fails or `next_event` fails.
pub fn run_modal<B, M>(
    terminal: &mut Terminal<B>,
    modal: &mut M,
    mut next_event: impl FnMut() -> Result<Event>,
) -> Result<M::Output>
where
    B: Backend,
    M: Modal,
{
    loop {
        terminal.draw(|frame| modal.render(frame))?;

        if let Event::Key(key) = next_event()?
            && key.kind == KeyEventKind::Press
            && let Some(output) = modal.handle_key(key)
        {
            return Ok(output);
        }
    }
}

/// Undoes one terminal setup step on drop unless disarmed.
///
/// Guards for later steps are dropped first, so a failure part way through
/// setup unwinds in reverse order.
struct SetupGuard<F: FnOnce()> {
    undo: Option<F>,
}

impl<F: FnOnce()> SetupGuard<F> {
    const fn new(undo: F) -> Self {
        Self { undo: Some(undo) }
    }

    fn disarm(mut self) {
        self.undo = None;
    }
}

impl<F: FnOnce()> Drop for SetupGuard<F> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            undo();
        }
    }
}

/// Raw-mode alternate screen, restored on drop.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let raw_mode = SetupGuard::new(|| {
            let _ = disable_raw_mode();
        });

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let alternate_screen = SetupGuard::new(|| {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        });

        let terminal =
            Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")?;

        alternate_screen.disarm();
        raw_mode.disarm();
        Ok(Self { terminal })
    }

    fn run<M: Modal>(&mut self, modal: &mut M) -> Result<M::Output> {
        run_modal(&mut self.terminal, modal, || {
            event::read().context("Failed to read terminal event")
        })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            warn!(error = %err, "Failed to disable raw mode");
        }
        if let Err(err) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            warn!(error = %err, "Failed to leave alternate screen");
        }
        let _ = self.terminal.show_cursor();
    }
}

/// [`Selector`] drawn as a filterable list on the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalSelector;

impl Selector for TerminalSelector {
    fn show<T>(&mut self, title: &str, options: Vec<SelectorOption<T>>) -> Result<Option<T>> {
        debug!(title, count = options.len(), "Showing selector");
        let mut state = PickerState::new(title, options);
        let chosen = TerminalSession::enter()?.run(&mut state)?;
        Ok(chosen.and_then(|index| state.into_result(index)))
    }
}

/// [`Prompt`] drawn as a single-line input on the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn open(&mut self, title: &str, initial: &str) -> Result<Option<String>> {
        debug!(title, "Opening prompt");
        let mut state = PromptState::new(title, initial);
        TerminalSession::enter()?.run(&mut state)
    }
}
