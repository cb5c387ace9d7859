mod fetcher;
mod models;
mod seed;

pub use fetcher::ImageFetcher;
pub use models::{random_rotation, NewPhoto, Photo, MAX_ROTATION_DEGREES};
pub use seed::sample_photos;
