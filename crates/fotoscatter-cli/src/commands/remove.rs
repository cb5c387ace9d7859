use anyhow::{anyhow, Result};
use uuid::Uuid;

use fotoscatter_core::storage::{Database, PhotoRepository};
use fotoscatter_core::Error;

pub async fn run(db: &Database, id: &str) -> Result<()> {
    let id = Uuid::parse_str(id).map_err(|_| anyhow!("Invalid photo id: {}", id))?;

    let repo = PhotoRepository::new(db);
    if !repo.delete(id).await? {
        return Err(Error::PhotoNotFound(id.to_string()).into());
    }

    println!("Removed photo {}", id);
    Ok(())
}
