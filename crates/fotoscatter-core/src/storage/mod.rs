mod database;
mod photo_repo;
mod retry;

pub use database::Database;
pub use photo_repo::PhotoRepository;
