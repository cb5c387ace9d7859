use anyhow::Result;

use fotoscatter_core::photo::sample_photos;
use fotoscatter_core::storage::{Database, PhotoRepository};

pub async fn run(db: &Database, count: usize) -> Result<()> {
    let photos = sample_photos(count, &mut rand::thread_rng());

    let repo = PhotoRepository::new(db);
    let created = repo.create_many(&photos).await?;

    println!("Seeded {} sample photos", created);
    println!("Run `fotoscatter` to browse the gallery.");

    Ok(())
}
