use std::collections::HashMap;
use std::sync::Arc;

use ratatui::layout::Rect;
use uuid::Uuid;

use fotoscatter_core::layout::{container_height, Position, ScatterLayout, Viewport};
use fotoscatter_core::photo::Photo;
use fotoscatter_core::AppConfig;

use crate::images::GalleryImageCache;
use crate::theme::Theme;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Scatter gallery view
    Gallery,
    /// Photo detail modal
    PhotoDetail,
    /// Delete confirmation popup
    DeleteConfirm,
}

/// Application state for the gallery TUI
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,

    /// Photos in gallery order (oldest first)
    pub photos: Vec<Photo>,
    /// Computed card positions, keyed by photo id
    pub positions: HashMap<Uuid, Position>,
    /// Grid geometry of the last layout pass
    pub layout: Option<ScatterLayout>,
    /// Viewport of the last layout pass (pixel space)
    pub viewport: Viewport,
    /// Scrollable gallery height in pixels
    pub container_height: f64,
    /// Vertical scroll offset in pixels
    pub scroll: f64,

    pub selected: usize,
    pub mode: Mode,
    pub status_message: Option<String>,
    pub images: GalleryImageCache,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> Self {
        Self {
            config,
            theme,
            photos: Vec::new(),
            positions: HashMap::new(),
            layout: None,
            viewport: Viewport::new(0, 0),
            container_height: fotoscatter_core::layout::MIN_CONTAINER_HEIGHT,
            scroll: 0.0,
            selected: 0,
            mode: Mode::Gallery,
            status_message: None,
            images: GalleryImageCache::new(),
            should_quit: false,
        }
    }

    /// Map a terminal area to the engine's pixel space using the
    /// configured font-cell estimate.
    pub fn viewport_for_area(&self, area: Rect) -> Viewport {
        Viewport::new(
            u32::from(area.width) * u32::from(self.config.ui.cell_width_px),
            u32::from(area.height) * u32::from(self.config.ui.cell_height_px),
        )
    }

    /// Replace the photo list and rescatter
    pub fn set_photos(&mut self, photos: Vec<Photo>) {
        self.photos = photos;
        if self.selected >= self.photos.len() {
            self.selected = self.photos.len().saturating_sub(1);
        }
        self.rescatter();
    }

    /// Adopt a new viewport, rescattering only if the size actually
    /// changed. Unrelated redraws keep the current layout.
    pub fn update_viewport(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.images.invalidate_protocols();
        self.rescatter();
    }

    /// Recompute all positions with fresh jitter
    pub fn rescatter(&mut self) {
        if !self.viewport.is_measured() {
            return;
        }

        let layout = ScatterLayout::new(self.viewport);
        let positions = layout.positions(self.photos.len());

        self.positions = self
            .photos
            .iter()
            .zip(&positions)
            .map(|(photo, position)| (photo.id, *position))
            .collect();
        self.layout = Some(layout);
        self.container_height = container_height(&positions);
        self.clamp_scroll();

        tracing::debug!(
            photos = self.photos.len(),
            cols = layout.cols(),
            container_height = self.container_height,
            "rescattered gallery"
        );
    }

    pub fn position_of(&self, id: Uuid) -> Option<Position> {
        self.positions.get(&id).copied()
    }

    pub fn selected_photo(&self) -> Option<&Photo> {
        self.photos.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.photos.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.photos.len();
        self.scroll_selected_into_view();
    }

    pub fn select_prev(&mut self) {
        if self.photos.is_empty() {
            return;
        }
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(self.photos.len() - 1);
        self.scroll_selected_into_view();
    }

    /// Largest valid scroll offset in pixels
    pub fn max_scroll(&self) -> f64 {
        (self.container_height - f64::from(self.viewport.height)).max(0.0)
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll += delta;
        self.clamp_scroll();
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0.0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.clamp(0.0, self.max_scroll());
    }

    /// Bring the selected card into the visible pixel range
    fn scroll_selected_into_view(&mut self) {
        let Some(photo) = self.photos.get(self.selected) else {
            return;
        };
        let Some(position) = self.positions.get(&photo.id) else {
            return;
        };
        let Some(layout) = self.layout else {
            return;
        };

        let card_top = position.top;
        let card_bottom = position.top + layout.photo_size();
        let view_height = f64::from(self.viewport.height);

        if card_top < self.scroll {
            self.scroll = card_top;
        } else if card_bottom > self.scroll + view_height {
            self.scroll = card_bottom - view_height;
        }
        self.clamp_scroll();
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fotoscatter_core::layout::MIN_CONTAINER_HEIGHT;

    fn test_app() -> App {
        App::new(Arc::new(AppConfig::default()), Theme::default())
    }

    fn test_photo(n: u32) -> Photo {
        Photo {
            id: Uuid::new_v4(),
            title: format!("photo {}", n),
            description: String::new(),
            url: format!("https://example.com/{}.jpg", n),
            taken_on: "May 1, 2023".to_string(),
            rotation: 0.0,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn area_maps_to_pixel_viewport() {
        let app = test_app();
        let viewport = app.viewport_for_area(Rect::new(0, 0, 120, 40));
        assert_eq!(viewport, Viewport::new(960, 640));
    }

    #[test]
    fn unmeasured_viewport_skips_layout() {
        let mut app = test_app();
        app.set_photos(vec![test_photo(1), test_photo(2)]);
        assert!(app.positions.is_empty());

        app.update_viewport(Viewport::new(960, 640));
        assert_eq!(app.positions.len(), 2);
    }

    #[test]
    fn every_photo_gets_a_keyed_position() {
        let mut app = test_app();
        app.update_viewport(Viewport::new(1280, 800));
        let photos: Vec<Photo> = (0..15).map(test_photo).collect();
        let ids: Vec<Uuid> = photos.iter().map(|p| p.id).collect();
        app.set_photos(photos);

        assert_eq!(app.positions.len(), 15);
        assert!(ids.iter().all(|id| app.position_of(*id).is_some()));
    }

    #[test]
    fn unchanged_viewport_keeps_positions() {
        let mut app = test_app();
        app.update_viewport(Viewport::new(1280, 800));
        app.set_photos((0..10).map(test_photo).collect());

        let before: Vec<_> = app
            .photos
            .iter()
            .map(|p| app.position_of(p.id).unwrap())
            .collect();
        app.update_viewport(Viewport::new(1280, 800));
        let after: Vec<_> = app
            .photos
            .iter()
            .map(|p| app.position_of(p.id).unwrap())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn scroll_clamps_to_container() {
        let mut app = test_app();
        app.update_viewport(Viewport::new(960, 640));
        app.set_photos((0..40).map(test_photo).collect());
        assert!(app.container_height >= MIN_CONTAINER_HEIGHT);

        app.scroll_by(-100.0);
        assert_eq!(app.scroll, 0.0);

        app.scroll_by(1_000_000.0);
        assert_eq!(app.scroll, app.max_scroll());
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut app = test_app();
        app.update_viewport(Viewport::new(960, 640));
        app.set_photos((0..3).map(test_photo).collect());

        app.select_prev();
        assert_eq!(app.selected, 2);
        app.select_next();
        assert_eq!(app.selected, 0);
    }
}
