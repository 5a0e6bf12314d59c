//! Filterable option list modal

use ratatui::{
    Frame,
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::str::FromStr;

use super::input::InputState;
use super::{Modal, centered_rect_absolute, colors};
use crate::host::SelectorOption;

const MAX_VISIBLE_ROWS: usize = 12;

/// One line of the rendered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row<'a> {
    /// Group heading
    Header(&'a str),
    /// Position within the filtered options
    Option(usize),
}

/// State of an open picker.
#[derive(Debug)]
pub struct PickerState<T> {
    title: String,
    options: Vec<SelectorOption<T>>,
    filter: InputState,
    filtered: Vec<usize>,
    selected: usize,
}

fn matches<T>(option: &SelectorOption<T>, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    option.name.to_lowercase().contains(query)
        || option.description.to_lowercase().contains(query)
        || option
            .group
            .as_deref()
            .is_some_and(|group| group.to_lowercase().contains(query))
}

impl<T> PickerState<T> {
    /// Open a picker over `options`.
    #[must_use]
    pub fn new(title: &str, options: Vec<SelectorOption<T>>) -> Self {
        let filtered = (0..options.len()).collect();
        Self {
            title: title.to_string(),
            options,
            filter: InputState::default(),
            filtered,
            selected: 0,
        }
    }

    /// Current filter text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.filter.buffer
    }

    /// Options that pass the filter, in their original order.
    pub fn visible(&self) -> impl Iterator<Item = &SelectorOption<T>> + '_ {
        self.filtered.iter().map(|&index| &self.options[index])
    }

    /// The highlighted option, if any option passes the filter.
    #[must_use]
    pub fn highlighted(&self) -> Option<&SelectorOption<T>> {
        self.filtered
            .get(self.selected)
            .map(|&index| &self.options[index])
    }

    /// Replace the filter text.
    pub fn set_query(&mut self, query: &str) {
        self.filter = InputState::with_text(query);
        self.refilter();
    }

    fn refilter(&mut self) {
        let query = self.filter.buffer.trim().to_lowercase();
        self.filtered = self
            .options
            .iter()
            .enumerate()
            .filter(|(_, option)| matches(option, &query))
            .map(|(index, _)| index)
            .collect();
        self.selected = 0;
    }

    /// Move the highlight down, wrapping at the end.
    pub fn select_next(&mut self) {
        if !self.filtered.is_empty() {
            self.selected = (self.selected + 1) % self.filtered.len();
        }
    }

    /// Move the highlight up, wrapping at the start.
    pub fn select_prev(&mut self) {
        if !self.filtered.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.filtered.len() - 1);
        }
    }

    /// Remove and return the payload of the option at `index` in the
    /// unfiltered list.
    #[must_use]
    pub fn into_result(mut self, index: usize) -> Option<T> {
        (index < self.options.len()).then(|| self.options.swap_remove(index).result)
    }

    /// Visible rows with a header wherever the group changes.
    #[must_use]
    pub fn rows(&self) -> Vec<Row<'_>> {
        let mut rows = Vec::with_capacity(self.filtered.len());
        let mut current: Option<&str> = None;
        for (position, option) in self.visible().enumerate() {
            let group = option.group.as_deref();
            if let Some(heading) = group
                && current != group
            {
                rows.push(Row::Header(heading));
            }
            current = group;
            rows.push(Row::Option(position));
        }
        rows
    }
}

impl<T> Modal for PickerState<T> {
    type Output = Option<usize>;

    fn handle_key(&mut self, key: KeyEvent) -> Option<Self::Output> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Some(None),
            KeyCode::Char('c') if ctrl => return Some(None),
            KeyCode::Enter => {
                return self.filtered.get(self.selected).map(|&index| Some(index));
            }
            KeyCode::Up | KeyCode::BackTab => self.select_prev(),
            KeyCode::Char('p') if ctrl => self.select_prev(),
            KeyCode::Down | KeyCode::Tab => self.select_next(),
            KeyCode::Char('n') if ctrl => self.select_next(),
            _ => {
                if self.filter.handle_key(key) {
                    self.refilter();
                }
            }
        }
        None
    }

    fn render(&self, frame: &mut Frame<'_>) {
        render_picker(frame, self);
    }
}

fn option_style(color: Option<&str>, selected: bool) -> Style {
    let fg = color
        .and_then(|color| Color::from_str(color).ok())
        .unwrap_or(colors::TEXT_PRIMARY);
    if selected {
        Style::default()
            .fg(fg)
            .bg(colors::SURFACE_HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(fg)
    }
}

/// Render the picker overlay
pub fn render_picker<T>(frame: &mut Frame<'_>, state: &PickerState<T>) {
    let rows = state.rows();
    let visible_count = rows.len().clamp(1, MAX_VISIBLE_ROWS);

    // Filter + blank + list + blank + help
    let content_height = 1u16 + 1u16 + u16::try_from(visible_count).unwrap_or(1) + 1u16 + 1u16;
    let total_height = content_height.saturating_add(2); // borders

    let area = centered_rect_absolute(60, total_height, frame.area());

    let mut lines: Vec<Line<'_>> = Vec::new();
    lines.push(Line::from(vec![
        Span::styled("Filter: ", Style::default().fg(colors::TEXT_DIM)),
        Span::styled(
            state.filter.text_with_cursor(),
            Style::default()
                .fg(colors::TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(""));

    let selected_row = rows
        .iter()
        .position(|row| *row == Row::Option(state.selected))
        .unwrap_or(0);
    let scroll_offset = (selected_row + 1).saturating_sub(MAX_VISIBLE_ROWS);

    if rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "No matches",
            Style::default().fg(colors::TEXT_MUTED),
        )));
    } else {
        for row in rows.iter().skip(scroll_offset).take(MAX_VISIBLE_ROWS) {
            match *row {
                Row::Header(group) => lines.push(Line::from(Span::styled(
                    group.to_string(),
                    Style::default()
                        .fg(colors::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                ))),
                Row::Option(position) => {
                    let option = &state.options[state.filtered[position]];
                    let is_selected = position == state.selected;
                    let prefix = if is_selected { "▶ " } else { "  " };
                    let mut spans = vec![Span::styled(
                        format!("{prefix}{}", option.name),
                        option_style(option.color.as_deref(), is_selected),
                    )];
                    if !option.description.is_empty() {
                        spans.push(Span::styled(
                            format!("  {}", option.description),
                            Style::default().fg(colors::TEXT_MUTED),
                        ));
                    }
                    lines.push(Line::from(spans));
                }
            }
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓ select • Enter choose • Esc cancel • Type to filter",
        Style::default().fg(colors::TEXT_MUTED),
    )));

    let paragraph = Paragraph::new(lines)
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
