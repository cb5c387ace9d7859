use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use fotoscatter_core::photo::Photo;

use crate::app::App;
use crate::theme::Theme;

pub struct GalleryWidget;

impl GalleryWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        // Canvas background
        let background = Block::default()
            .style(Style::default().bg(theme.bg0))
            .borders(Borders::NONE);
        frame.render_widget(background, area);

        if app.photos.is_empty() {
            Self::render_empty_hint(frame, area, theme);
            return;
        }

        let Some(layout) = app.layout else {
            return;
        };

        let cell_w = f64::from(app.config.ui.cell_width_px);
        let cell_h = f64::from(app.config.ui.cell_height_px);
        let card_width = (layout.photo_size() / cell_w).round() as u16;
        let card_height = (layout.photo_size() / cell_h).round() as u16;

        // Draw the selected card last so it sits on top of the pile.
        for (i, photo) in app.photos.iter().enumerate() {
            if i != app.selected {
                Self::render_card(frame, area, app, photo, card_width, card_height, false);
            }
        }
        if let Some(photo) = app.selected_photo() {
            Self::render_card(frame, area, app, photo, card_width, card_height, true);
        }
    }

    fn render_card(
        frame: &mut Frame,
        area: Rect,
        app: &App,
        photo: &Photo,
        card_width: u16,
        card_height: u16,
        selected: bool,
    ) {
        let Some(position) = app.position_of(photo.id) else {
            return;
        };
        let theme = &app.theme;

        let cell_w = f64::from(app.config.ui.cell_width_px);
        let cell_h = f64::from(app.config.ui.cell_height_px);
        let x = i32::from(area.x) + (position.left / cell_w).round() as i32;
        let y = i32::from(area.y) + ((position.top - app.scroll) / cell_h).round() as i32;

        let Some(card_area) = clip_to_area(area, x, y, card_width, card_height) else {
            return;
        };

        let border_style = if selected {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.grey0)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(card_area);
        frame.render_widget(block, card_area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let title_style = if selected {
            Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg1)
        };

        // Polaroid look: picture placeholder on top, caption at the bottom.
        let mut lines: Vec<Line> = Vec::with_capacity(inner.height as usize);
        let caption_rows = 2u16.min(inner.height);
        for _ in 0..inner.height.saturating_sub(caption_rows) {
            lines.push(Line::from(Span::styled(
                "▒".repeat(inner.width as usize),
                Style::default().fg(theme.bg2),
            )));
        }
        if caption_rows >= 1 {
            let tilt = tilt_glyph(photo);
            let title = truncate_to_width(
                &photo.title,
                (inner.width as usize).saturating_sub(tilt.width()),
            );
            lines.push(Line::from(vec![
                Span::styled(tilt, Style::default().fg(theme.grey1)),
                Span::styled(title, title_style),
            ]));
        }
        if caption_rows >= 2 {
            lines.push(Line::from(Span::styled(
                truncate_to_width(&photo.taken_on, inner.width as usize),
                Style::default().fg(theme.grey1),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_empty_hint(frame: &mut Frame, area: Rect, theme: &Theme) {
        let message = Line::from(Span::styled(
            "No photos yet — run `fotoscatter add` or `fotoscatter seed`",
            Style::default().fg(theme.grey1).add_modifier(Modifier::ITALIC),
        ));
        let paragraph = Paragraph::new(message)
            .style(Style::default().bg(theme.bg0))
            .alignment(ratatui::layout::Alignment::Center);

        let centered = Rect {
            x: area.x,
            y: area.y + area.height / 2,
            width: area.width,
            height: 1,
        };
        frame.render_widget(paragraph, centered);
    }
}

/// Glyph hinting at which way the card tilts
fn tilt_glyph(photo: &Photo) -> &'static str {
    if photo.leans_left() {
        "╲ "
    } else if photo.leans_right() {
        "╱ "
    } else {
        ""
    }
}

/// Clip a (possibly off-screen) card rectangle to the canvas area
fn clip_to_area(area: Rect, x: i32, y: i32, width: u16, height: u16) -> Option<Rect> {
    let area_right = i32::from(area.x) + i32::from(area.width);
    let area_bottom = i32::from(area.y) + i32::from(area.height);
    let right = x + i32::from(width);
    let bottom = y + i32::from(height);

    if right <= i32::from(area.x) || bottom <= i32::from(area.y) || x >= area_right || y >= area_bottom
    {
        return None;
    }

    let clipped_x = x.max(i32::from(area.x));
    let clipped_y = y.max(i32::from(area.y));
    let clipped_w = right.min(area_right) - clipped_x;
    let clipped_h = bottom.min(area_bottom) - clipped_y;

    Some(Rect::new(
        clipped_x as u16,
        clipped_y as u16,
        clipped_w as u16,
        clipped_h as u16,
    ))
}

/// Truncate a string to a display width, appending an ellipsis if cut
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            // Swap the last char for an ellipsis when there is room.
            if !out.is_empty() {
                out.pop();
                out.push('…');
            }
            return out;
        }
        width += ch_width;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_keeps_fully_visible_cards() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(
            clip_to_area(area, 10, 5, 22, 11),
            Some(Rect::new(10, 5, 22, 11))
        );
    }

    #[test]
    fn clip_trims_cards_crossing_the_top() {
        let area = Rect::new(0, 2, 100, 40);
        // Card scrolled half off the top of the canvas.
        assert_eq!(
            clip_to_area(area, 10, -3, 22, 11),
            Some(Rect::new(10, 2, 22, 6))
        );
    }

    #[test]
    fn clip_drops_offscreen_cards() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(clip_to_area(area, 10, -20, 22, 11), None);
        assert_eq!(clip_to_area(area, 150, 5, 22, 11), None);
        assert_eq!(clip_to_area(area, 10, 45, 22, 11), None);
    }

    #[test]
    fn truncation_respects_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("a longer title", 7), "a long…");
        assert_eq!(truncate_to_width("anything", 0), "");
    }
}
