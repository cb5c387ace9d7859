pub mod config;
pub mod error;
pub mod layout;
pub mod photo;
pub mod storage;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use layout::{Position, ScatterLayout, Viewport};
