use anyhow::Result;
use chrono::Local;

use fotoscatter_core::{
    photo::{ImageFetcher, NewPhoto},
    storage::{Database, PhotoRepository},
};

pub async fn run(
    db: &Database,
    title: &str,
    url: &str,
    description: &str,
    date: Option<String>,
    rotation: Option<f64>,
) -> Result<()> {
    let url = ImageFetcher::validate_url(url)?;
    let taken_on = date.unwrap_or_else(|| Local::now().format("%B %-d, %Y").to_string());

    let repo = PhotoRepository::new(db);
    let photo = repo
        .create(&NewPhoto {
            title: title.to_string(),
            description: description.to_string(),
            url,
            taken_on,
            rotation,
        })
        .await?;

    println!("Added photo: {} ({})", photo.title, photo.id);
    println!("  URL:  {}", photo.url);
    println!("  Date: {}", photo.taken_on);
    println!("  Tilt: {:+.1}°", photo.rotation);

    Ok(())
}
