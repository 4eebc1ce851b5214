// Settings screen: edit the ZeroTier API token.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Default)]
pub struct SettingsState {
    pub input: String,
}

/// What a key press on the settings screen asks the app to do.
#[derive(Debug, PartialEq, Eq)]
pub enum SettingsAction {
    None,
    /// Save the entered token and return to the dashboard.
    Save(String),
    /// Discard the edit and return to the dashboard.
    Cancel,
}

impl SettingsState {
    pub fn handle_key(&mut self, key: KeyEvent) -> SettingsAction {
        match key.code {
            KeyCode::Char(c) => {
                self.input.push(c);
                SettingsAction::None
            }
            KeyCode::Backspace => {
                self.input.pop();
                SettingsAction::None
            }
            KeyCode::Enter => SettingsAction::Save(self.input.clone()),
            KeyCode::Esc => SettingsAction::Cancel,
            _ => SettingsAction::None,
        }
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &SettingsState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    let input = Paragraph::new(state.input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" ZeroTier Token "),
    );
    frame.render_widget(input, chunks[0]);

    let hint = Paragraph::new(Line::styled(
        "Enter saves the token and returns to the dashboard. Esc discards.",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(hint, chunks[2]);
}
