use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let mode_str = match app.mode {
            Mode::Gallery => "GALLERY",
            Mode::PhotoDetail => "DETAIL",
            Mode::DeleteConfirm => "DELETE?",
        };

        let selection = if app.photos.is_empty() {
            String::from("-/-")
        } else {
            format!("{}/{}", app.selected + 1, app.photos.len())
        };

        let status_text = if let Some(msg) = &app.status_message {
            msg.clone()
        } else {
            format!(" {} | Photo {} ", mode_str, selection)
        };

        let help_hint = " q:quit j/k:scroll Tab:select Enter:view r:shuffle d:delete ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.len())
            .saturating_sub(help_hint.len());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
