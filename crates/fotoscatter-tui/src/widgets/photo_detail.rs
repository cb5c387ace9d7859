use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use ratatui_image::Image;

use crate::app::App;
use crate::images::ImageState;
use crate::theme::Theme;

pub struct PhotoDetailWidget;

impl PhotoDetailWidget {
    /// Render the photo detail modal over the gallery
    pub fn render(frame: &mut Frame, app: &mut App) {
        let area = frame.area();
        let modal_width = (area.width * 4 / 5).max(30).min(area.width);
        let modal_height = (area.height * 4 / 5).max(10).min(area.height);
        let modal_area = centered_rect(modal_width, modal_height, area);

        let Some(photo) = app.selected_photo() else {
            return;
        };
        let photo = photo.clone();
        let theme = app.theme.clone();

        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .title(format!(" {} ", photo.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        // Image on top, metadata below, key hints at the bottom.
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),
                Constraint::Length(6),
                Constraint::Length(1),
            ])
            .split(inner);

        Self::render_image(frame, chunks[0], app, &photo.url, &theme);
        Self::render_metadata(frame, chunks[1], &photo, &theme);
        Self::render_hints(frame, chunks[2], &theme);
    }

    fn render_image(frame: &mut Frame, area: Rect, app: &mut App, url: &str, theme: &Theme) {
        if !app.config.ui.image_preview {
            Self::render_centered_note(frame, area, "Image preview disabled", theme);
            return;
        }

        match app.images.get_mut(url) {
            Some(ImageState::Loaded(cached)) => {
                if let Some(protocol) = cached.protocol(area) {
                    frame.render_widget(Image::new(protocol), area);
                } else {
                    Self::render_centered_note(frame, area, "Unable to render image", theme);
                }
            }
            Some(ImageState::Loading) => {
                Self::render_centered_note(frame, area, "Loading image...", theme);
            }
            Some(ImageState::Failed(error)) => {
                let message = format!("Image failed: {}", error);
                Self::render_centered_note(frame, area, &message, theme);
            }
            None => {
                Self::render_centered_note(frame, area, "Image not loaded", theme);
            }
        }
    }

    fn render_metadata(
        frame: &mut Frame,
        area: Rect,
        photo: &fotoscatter_core::photo::Photo,
        theme: &Theme,
    ) {
        let tilt = format!("{:+.1}°", photo.rotation);
        let uploaded = photo.created_at.format("%Y-%m-%d %H:%M").to_string();

        let lines = vec![
            Line::from(vec![
                Span::styled("Date:     ", Style::default().fg(theme.grey1)),
                Span::styled(photo.taken_on.clone(), Style::default().fg(theme.fg0)),
            ]),
            Line::from(vec![
                Span::styled("Tilt:     ", Style::default().fg(theme.grey1)),
                Span::styled(tilt, Style::default().fg(theme.fg0)),
                Span::styled("   Uploaded: ", Style::default().fg(theme.grey1)),
                Span::styled(uploaded, Style::default().fg(theme.fg0)),
            ]),
            Line::from(vec![
                Span::styled("URL:      ", Style::default().fg(theme.grey1)),
                Span::styled(
                    photo.url.clone(),
                    Style::default()
                        .fg(theme.blue)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                photo.description.clone(),
                Style::default().fg(theme.fg1),
            )),
        ];

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_hints(frame: &mut Frame, area: Rect, theme: &Theme) {
        let hints = Line::from(vec![
            Span::styled("n/p", Style::default().fg(theme.aqua)),
            Span::styled(" next/prev  ", Style::default().fg(theme.fg0)),
            Span::styled("o", Style::default().fg(theme.aqua)),
            Span::styled(" open in browser  ", Style::default().fg(theme.fg0)),
            Span::styled("d", Style::default().fg(theme.aqua)),
            Span::styled(" delete  ", Style::default().fg(theme.fg0)),
            Span::styled("q/Esc", Style::default().fg(theme.aqua)),
            Span::styled(" close", Style::default().fg(theme.fg0)),
        ]);
        frame.render_widget(Paragraph::new(hints).alignment(Alignment::Center), area);
    }

    fn render_centered_note(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(theme.grey1).add_modifier(Modifier::ITALIC),
        )))
        .alignment(Alignment::Center);

        let centered = Rect {
            x: area.x,
            y: area.y + area.height / 2,
            width: area.width,
            height: 1,
        };
        frame.render_widget(paragraph, centered);
    }
}

/// Center a fixed-size rect within an outer area
pub fn centered_rect(width: u16, height: u16, outer: Rect) -> Rect {
    let x = outer.x + outer.width.saturating_sub(width) / 2;
    let y = outer.y + outer.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(outer.width), height.min(outer.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside_outer() {
        let outer = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(80, 32, outer);
        assert_eq!(rect, Rect::new(10, 4, 80, 32));

        let oversize = centered_rect(200, 80, outer);
        assert!(oversize.width <= outer.width && oversize.height <= outer.height);
    }
}
