use anyhow::Result;

use fotoscatter_core::storage::{Database, PhotoRepository};

pub async fn run(db: &Database) -> Result<()> {
    let repo = PhotoRepository::new(db);
    let photos = repo.list_all().await?;

    if photos.is_empty() {
        println!("No photos yet.");
        println!("\nTo add a photo, run:");
        println!("  fotoscatter add --title <title> --url <image url>");
        println!("Or seed a demo gallery:");
        println!("  fotoscatter seed");
        return Ok(());
    }

    println!("Photos ({}):\n", photos.len());

    for photo in &photos {
        println!("  {} - {}", photo.id, photo.title);
        println!("    URL: {}", photo.url);
        println!("    Date: {}  Tilt: {:+.1}°", photo.taken_on, photo.rotation);
        if !photo.description.is_empty() {
            println!("    {}", photo.description);
        }
        println!();
    }

    Ok(())
}
