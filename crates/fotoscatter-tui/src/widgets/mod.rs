mod gallery;
mod photo_detail;
mod popup;
mod status_bar;

pub use gallery::GalleryWidget;
pub use photo_detail::PhotoDetailWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
