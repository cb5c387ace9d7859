//! Scatter layout engine.
//!
//! Places an arbitrary number of fixed-size square photo cards on a
//! pseudo-grid and jitters each card around its cell, so the gallery
//! looks hand-scattered instead of tabular. Grid cells are spaced at
//! 70% of the card size, which makes neighboring cards overlap their
//! bounding boxes on purpose.
//!
//! Both operations are pure: positions are a function of the photo
//! count, the viewport, and a caller-supplied random source. Production
//! callers use [`ScatterLayout::positions`] (fresh jitter every call);
//! tests pin a seeded RNG through [`ScatterLayout::positions_with`].

use rand::Rng;

/// Viewports at least this wide get the larger card size.
pub const WIDE_BREAKPOINT: u32 = 1024;
/// Card edge length on wide viewports, in pixels.
pub const PHOTO_SIZE_WIDE: f64 = 176.0;
/// Card edge length on narrow viewports, in pixels.
pub const PHOTO_SIZE_NARROW: f64 = 160.0;
/// Horizontal gallery margin, also the left clamp for every card.
pub const MARGIN: f64 = 50.0;
/// Vertical floor for every card.
pub const STARTING_Y: f64 = 50.0;
/// Grid cell pitch as a fraction of the card size.
pub const SPACING_RATIO: f64 = 0.7;
/// Total jitter span as a fraction of the cell pitch (0.4 => +/-20%).
pub const JITTER_RATIO: f64 = 0.4;
/// Floor for the usable width, prevents degenerate single-column grids.
pub const MIN_AVAILABLE_WIDTH: f64 = 600.0;
/// Breathing room below the lowest card.
pub const BOTTOM_MARGIN: f64 = 250.0;
/// Minimum scrollable container height, even for tiny galleries.
pub const MIN_CONTAINER_HEIGHT: f64 = 1200.0;

/// Visible rendering area, in pixels.
///
/// A width of 0 means "not yet measured"; callers must not run the
/// layout in that state (check [`Viewport::is_measured`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether the host environment has reported a real size yet.
    pub fn is_measured(&self) -> bool {
        self.width > 0
    }
}

/// Pixel offset of a card's top-left corner within the gallery container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub left: f64,
    pub top: f64,
}

/// Grid geometry derived from a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterLayout {
    photo_size: f64,
    available_width: f64,
    spacing: f64,
    cols: usize,
}

impl ScatterLayout {
    pub fn new(viewport: Viewport) -> Self {
        let photo_size = if viewport.width >= WIDE_BREAKPOINT {
            PHOTO_SIZE_WIDE
        } else {
            PHOTO_SIZE_NARROW
        };
        let available_width = (f64::from(viewport.width) - 2.0 * MARGIN).max(MIN_AVAILABLE_WIDTH);
        let spacing = photo_size * SPACING_RATIO;
        // Integer floor could yield 0 columns if spacing ever exceeded
        // the usable width; a grid always has at least one column.
        let cols = ((available_width / spacing).floor() as usize).max(1);

        Self {
            photo_size,
            available_width,
            spacing,
            cols,
        }
    }

    /// Card edge length for this viewport, in pixels.
    pub fn photo_size(&self) -> f64 {
        self.photo_size
    }

    /// Number of grid columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of grid rows needed for `count` cards.
    pub fn rows_for(&self, count: usize) -> usize {
        count.div_ceil(self.cols)
    }

    /// Compute one position per card with jitter from `rng`.
    ///
    /// The position at index `i` belongs to the photo at index `i`;
    /// callers zip the two sequences. Horizontal jitter is clamped so
    /// cards stay on screen, vertical jitter is only floored at
    /// [`STARTING_Y`] so rows may drift downward.
    pub fn positions_with<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Position> {
        let max_left = self.available_width - self.photo_size + MARGIN;
        let jitter_span = self.spacing * JITTER_RATIO;

        let mut positions = Vec::with_capacity(count);
        for i in 0..count {
            let col = (i % self.cols) as f64;
            let row = (i / self.cols) as f64;
            let base_x = col * self.spacing + MARGIN;
            let base_y = row * self.spacing + STARTING_Y;

            let offset_x = (rng.gen::<f64>() - 0.5) * jitter_span;
            let offset_y = (rng.gen::<f64>() - 0.5) * jitter_span;

            positions.push(Position {
                left: (base_x + offset_x).clamp(MARGIN, max_left),
                top: (base_y + offset_y).max(STARTING_Y),
            });
        }

        positions
    }

    /// Compute positions with a fresh thread-local random source.
    ///
    /// Deliberately not reproducible: the gallery reshuffles on every
    /// full recompute. Callers that need stable output between redraws
    /// must cache the result and only recompute when the photo list or
    /// viewport actually changes.
    pub fn positions(&self, count: usize) -> Vec<Position> {
        self.positions_with(count, &mut rand::thread_rng())
    }
}

/// Minimum container height that fits every computed position.
///
/// `max(top) + BOTTOM_MARGIN`, floored at [`MIN_CONTAINER_HEIGHT`].
/// An empty gallery still gets the minimum height rather than 0.
pub fn container_height(positions: &[Position]) -> f64 {
    if positions.is_empty() {
        return MIN_CONTAINER_HEIGHT;
    }
    let max_top = positions.iter().map(|p| p.top).fold(f64::MIN, f64::max);
    (max_top + BOTTOM_MARGIN).max(MIN_CONTAINER_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(0x5ca7)
    }

    #[test]
    fn position_count_matches_photo_count() {
        let mut rng = seeded();
        for count in [1usize, 3, 20, 97] {
            let layout = ScatterLayout::new(Viewport::new(1440, 900));
            assert_eq!(layout.positions_with(count, &mut rng).len(), count);
        }
    }

    #[test]
    fn empty_gallery_yields_no_positions_and_default_height() {
        let layout = ScatterLayout::new(Viewport::new(800, 600));
        let positions = layout.positions_with(0, &mut seeded());
        assert!(positions.is_empty());
        assert_eq!(container_height(&positions), 1200.0);
    }

    #[test]
    fn tops_never_rise_above_starting_y() {
        let layout = ScatterLayout::new(Viewport::new(1280, 720));
        for p in layout.positions_with(50, &mut seeded()) {
            assert!(p.top >= STARTING_Y, "top {} above floor", p.top);
        }
    }

    #[test]
    fn lefts_stay_within_horizontal_clamp() {
        let viewport = Viewport::new(1280, 720);
        let layout = ScatterLayout::new(viewport);
        let available_width = (1280.0 - 2.0 * MARGIN).max(MIN_AVAILABLE_WIDTH);
        let max_left = available_width - layout.photo_size() + MARGIN;

        for p in layout.positions_with(50, &mut seeded()) {
            assert!(p.left >= MARGIN, "left {} below margin", p.left);
            assert!(p.left <= max_left, "left {} past right clamp", p.left);
        }
    }

    #[test]
    fn container_height_tracks_lowest_card() {
        let layout = ScatterLayout::new(Viewport::new(1024, 768));
        let positions = layout.positions_with(120, &mut seeded());
        let max_top = positions.iter().map(|p| p.top).fold(f64::MIN, f64::max);

        let height = container_height(&positions);
        assert_eq!(height, (max_top + BOTTOM_MARGIN).max(MIN_CONTAINER_HEIGHT));
        assert!(height >= MIN_CONTAINER_HEIGHT);
    }

    #[test]
    fn small_gallery_height_floors_at_minimum() {
        let layout = ScatterLayout::new(Viewport::new(1200, 800));
        let positions = layout.positions_with(3, &mut seeded());
        assert_eq!(container_height(&positions), MIN_CONTAINER_HEIGHT);
    }

    #[test]
    fn desktop_viewport_grid_dimensions() {
        // 1200px wide: large cards, 1100px usable, spacing 123.2 => 8 cols.
        let layout = ScatterLayout::new(Viewport::new(1200, 800));
        assert_eq!(layout.photo_size(), PHOTO_SIZE_WIDE);
        assert_eq!(layout.cols(), 8);
        assert_eq!(layout.rows_for(20), 3);

        let positions = layout.positions_with(20, &mut seeded());
        assert_eq!(positions.len(), 20);
        let max_left = 1100.0 - PHOTO_SIZE_WIDE + MARGIN;
        for p in &positions {
            assert!(p.top >= STARTING_Y);
            assert!(p.left >= MARGIN && p.left <= max_left);
        }
        assert!(container_height(&positions) >= MIN_CONTAINER_HEIGHT);
    }

    #[test]
    fn narrow_viewport_falls_back_to_minimum_width() {
        // 375px wide: small cards, width floored at 600, spacing 112 => 5 cols,
        // so five photos land in a single row across distinct columns.
        let layout = ScatterLayout::new(Viewport::new(375, 667));
        assert_eq!(layout.photo_size(), PHOTO_SIZE_NARROW);
        assert_eq!(layout.cols(), 5);
        assert_eq!(layout.rows_for(5), 1);

        let positions = layout.positions_with(5, &mut seeded());
        let spacing = PHOTO_SIZE_NARROW * SPACING_RATIO;
        let jitter = spacing * JITTER_RATIO / 2.0;
        for (i, p) in positions.iter().enumerate() {
            // Row 0: base top is STARTING_Y, so tops sit within one jitter of it.
            assert!(p.top <= STARTING_Y + jitter);
            // Each card stays within jitter range of its own column's base.
            let base_x = i as f64 * spacing + MARGIN;
            let max_left = 600.0 - PHOTO_SIZE_NARROW + MARGIN;
            let expected_lo = (base_x - jitter).clamp(MARGIN, max_left);
            let expected_hi = (base_x + jitter).clamp(MARGIN, max_left);
            assert!(p.left >= expected_lo && p.left <= expected_hi);
        }
    }

    #[test]
    fn cols_never_degenerate_to_zero() {
        for width in [0u32, 1, 100, 599, 600, 601] {
            let layout = ScatterLayout::new(Viewport::new(width, 480));
            assert!(layout.cols() >= 1);
        }
    }

    #[test]
    fn seeded_rng_reproduces_layout() {
        let layout = ScatterLayout::new(Viewport::new(1920, 1080));
        let a = layout.positions_with(12, &mut StdRng::seed_from_u64(7));
        let b = layout.positions_with(12, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
