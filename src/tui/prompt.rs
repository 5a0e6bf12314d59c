//! Single-line prompt modal

use ratatui::{
    Frame,
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::input::InputState;
use super::{Modal, centered_rect_absolute, colors};

/// State of an open prompt.
#[derive(Debug)]
pub struct PromptState {
    title: String,
    input: InputState,
}

impl PromptState {
    /// Open a prompt seeded with `initial`.
    #[must_use]
    pub fn new(title: &str, initial: &str) -> Self {
        Self {
            title: title.to_string(),
            input: InputState::with_text(initial),
        }
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.input.buffer
    }
}

impl Modal for PromptState {
    type Output = Option<String>;

    fn handle_key(&mut self, key: KeyEvent) -> Option<Self::Output> {
        match key.code {
            KeyCode::Esc => Some(None),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(None),
            KeyCode::Enter => Some(Some(self.input.buffer.clone())),
            _ => {
                self.input.handle_key(key);
                None
            }
        }
    }

    fn render(&self, frame: &mut Frame<'_>) {
        render_prompt(frame, self);
    }
}

/// Render the prompt overlay
pub fn render_prompt(frame: &mut Frame<'_>, state: &PromptState) {
    // 3 lines of content + 2 for borders
    let area = centered_rect_absolute(55, 5, frame.area());

    let text = vec![
        Line::from(Span::styled(
            state.input.text_with_cursor(),
            Style::default()
                .fg(colors::TEXT_PRIMARY)
                .bg(colors::INPUT_BG)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: submit | ←→: move | Esc: cancel",
            Style::default().fg(colors::TEXT_MUTED),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title(format!(" {} ", state.title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::BORDER)),
        )
        .style(Style::default().bg(colors::MODAL_BG));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}
