use std::collections::HashMap;

use image::DynamicImage;
use ratatui::layout::Rect;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::Protocol;

use fotoscatter_core::photo::ImageFetcher;

/// A downloaded image with its protocol-specific render state
pub struct CachedImage {
    pub image: DynamicImage,
    /// Protocol data cached per render area
    protocol: Option<Protocol>,
}

impl CachedImage {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image,
            protocol: None,
        }
    }

    /// Get the render protocol, generating it on first use.
    ///
    /// Queries the terminal for the best graphics protocol and falls
    /// back to halfblocks with an 8x16 font estimate if the query fails.
    pub fn protocol(&mut self, area: Rect) -> Option<&Protocol> {
        if self.protocol.is_none() {
            let mut picker =
                Picker::from_query_stdio().unwrap_or_else(|_| Picker::from_fontsize((8, 16)));
            match picker.new_protocol(self.image.clone(), area, ratatui_image::Resize::Fit(None)) {
                Ok(protocol) => self.protocol = Some(protocol),
                Err(e) => {
                    tracing::error!("Failed to build image protocol: {}", e);
                    return None;
                }
            }
        }
        self.protocol.as_ref()
    }

    /// Drop cached protocol data (e.g. after a resize)
    pub fn invalidate(&mut self) {
        self.protocol = None;
    }
}

/// Loading state of a photo's image
pub enum ImageState {
    Loading,
    Loaded(CachedImage),
    Failed(String),
}

/// Per-URL image cache for the gallery session
#[derive(Default)]
pub struct GalleryImageCache {
    states: HashMap<String, ImageState>,
}

impl GalleryImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_mut(&mut self, url: &str) -> Option<&mut ImageState> {
        self.states.get_mut(url)
    }

    pub fn is_loading(&self, url: &str) -> bool {
        matches!(self.states.get(url), Some(ImageState::Loading))
    }

    pub fn is_ready(&self, url: &str) -> bool {
        matches!(self.states.get(url), Some(ImageState::Loaded(_)))
    }

    pub fn start_loading(&mut self, url: &str) {
        self.states.insert(url.to_string(), ImageState::Loading);
    }

    pub fn insert_loaded(&mut self, url: &str, image: DynamicImage) {
        self.states
            .insert(url.to_string(), ImageState::Loaded(CachedImage::new(image)));
    }

    pub fn insert_failed(&mut self, url: &str, error: String) {
        self.states.insert(url.to_string(), ImageState::Failed(error));
    }

    /// Invalidate protocol data for all cached images
    pub fn invalidate_protocols(&mut self) {
        for state in self.states.values_mut() {
            if let ImageState::Loaded(cached) = state {
                cached.invalidate();
            }
        }
    }
}

/// Download and decode a photo image
pub async fn load_image(fetcher: &ImageFetcher, url: &str) -> Result<DynamicImage, String> {
    let bytes = fetcher
        .fetch(url)
        .await
        .map_err(|e| format!("download failed: {}", e))?;
    image::load_from_memory(&bytes).map_err(|e| format!("decode failed: {}", e))
}
