use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::photo_detail::centered_rect;
use crate::theme::Theme;

pub struct PopupWidget;

impl PopupWidget {
    /// Render the delete confirmation dialog
    pub fn render_delete_confirm(frame: &mut Frame, photo_title: &str, theme: &Theme) {
        let area = frame.area();

        let popup_width = 50u16.min(area.width.saturating_sub(4));
        let popup_height = 7u16.min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Delete Photo ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error))
            .style(Style::default().bg(theme.bg1));

        let inner_area = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Message
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Hint
            ])
            .split(inner_area);

        let message = Paragraph::new(Line::from(Span::styled(
            format!("Delete \"{}\"?", photo_title),
            Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(message, chunks[0]);

        let hint = Paragraph::new(Line::from(vec![
            Span::styled("[", Style::default().fg(theme.grey1)),
            Span::styled(
                "y",
                Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
            ),
            Span::styled("]es  [", Style::default().fg(theme.grey1)),
            Span::styled(
                "n",
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            ),
            Span::styled("]o", Style::default().fg(theme.grey1)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[2]);
    }
}
