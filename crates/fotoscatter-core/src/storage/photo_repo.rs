use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::retry::execute_with_retry;
use super::Database;
use crate::photo::{random_rotation, NewPhoto, Photo};
use crate::Result;

/// Repository for photo CRUD operations
pub struct PhotoRepository<'a> {
    db: &'a Database,
}

#[derive(FromRow)]
struct PhotoRow {
    id: String,
    title: String,
    description: String,
    url: String,
    taken_on: String,
    rotation: Option<f64>,
    created_at: DateTime<Utc>,
}

impl PhotoRow {
    fn into_photo(self, rotation: f64) -> Photo {
        Photo {
            id: Uuid::parse_str(&self.id).unwrap_or_default(),
            title: self.title,
            description: self.description,
            url: self.url,
            taken_on: self.taken_on,
            rotation,
            created_at: self.created_at,
        }
    }
}

impl<'a> PhotoRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create a new photo, assigning an id and (if absent) a rotation
    pub async fn create(&self, new_photo: &NewPhoto) -> Result<Photo> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let rotation = new_photo
            .rotation
            .unwrap_or_else(|| random_rotation(&mut rand::thread_rng()));

        execute_with_retry(|| async {
            sqlx::query(
                r#"
                INSERT INTO photos (id, title, description, url, taken_on, rotation, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(id.to_string())
            .bind(&new_photo.title)
            .bind(&new_photo.description)
            .bind(&new_photo.url)
            .bind(&new_photo.taken_on)
            .bind(rotation)
            .bind(now)
            .execute(self.db.pool())
            .await
            .map(|_| ())
        })
        .await?;

        tracing::debug!(photo_id = %id, title = %new_photo.title, "created photo");

        Ok(Photo {
            id,
            title: new_photo.title.clone(),
            description: new_photo.description.clone(),
            url: new_photo.url.clone(),
            taken_on: new_photo.taken_on.clone(),
            rotation,
            created_at: now,
        })
    }

    /// Create multiple photos, returning count created
    pub async fn create_many(&self, photos: &[NewPhoto]) -> Result<u32> {
        let mut created = 0;
        for photo in photos {
            self.create(photo).await?;
            created += 1;
        }
        Ok(created)
    }

    /// Find a photo by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Photo>> {
        let row: Option<PhotoRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, url, taken_on, rotation, created_at
            FROM photos
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(row) => {
                let rotation = match row.rotation {
                    Some(r) => r,
                    None => self.backfill_rotation(&row.id).await?,
                };
                Ok(Some(row.into_photo(rotation)))
            }
            None => Ok(None),
        }
    }

    /// List every photo in gallery order (oldest upload first)
    ///
    /// Photos stored without a rotation get one assigned and persisted
    /// here, so callers always see a stable value.
    pub async fn list_all(&self) -> Result<Vec<Photo>> {
        let rows: Vec<PhotoRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, url, taken_on, rotation, created_at
            FROM photos
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        let mut photos = Vec::with_capacity(rows.len());
        for row in rows {
            let rotation = match row.rotation {
                Some(r) => r,
                None => self.backfill_rotation(&row.id).await?,
            };
            photos.push(row.into_photo(rotation));
        }

        Ok(photos)
    }

    /// Delete a photo, returning whether a row was removed
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM photos WHERE id = ?")
            .bind(id.to_string())
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all photos
    pub async fn count(&self) -> Result<u32> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM photos")
            .fetch_one(self.db.pool())
            .await?;

        Ok(count as u32)
    }

    /// Assign a rotation to a photo that was stored without one.
    ///
    /// The IS NULL guard keeps the assignment one-shot even if two
    /// readers race: whoever loses re-reads the winner's value.
    async fn backfill_rotation(&self, id: &str) -> Result<f64> {
        let rotation = random_rotation(&mut rand::thread_rng());

        let result = sqlx::query(
            "UPDATE photos SET rotation = ? WHERE id = ? AND rotation IS NULL",
        )
        .bind(rotation)
        .bind(id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() > 0 {
            tracing::debug!(photo_id = id, rotation, "assigned missing rotation");
            return Ok(rotation);
        }

        let stored: Option<f64> = sqlx::query_scalar("SELECT rotation FROM photos WHERE id = ?")
            .bind(id)
            .fetch_one(self.db.pool())
            .await?;

        Ok(stored.unwrap_or(rotation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::MAX_ROTATION_DEGREES;

    fn new_photo(title: &str) -> NewPhoto {
        NewPhoto {
            title: title.to_string(),
            description: format!("{} description", title),
            url: format!("https://example.com/{}.jpg", title),
            taken_on: "March 5, 2023".to_string(),
            rotation: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_rotation() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = PhotoRepository::new(&db);

        let photo = repo.create(&new_photo("sunset")).await.unwrap();
        assert!(photo.rotation.abs() <= MAX_ROTATION_DEGREES);

        let found = repo.find_by_id(photo.id).await.unwrap().unwrap();
        assert_eq!(found.title, "sunset");
        assert_eq!(found.rotation, photo.rotation);
    }

    #[tokio::test]
    async fn explicit_rotation_is_kept() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = PhotoRepository::new(&db);

        let photo = repo
            .create(&NewPhoto {
                rotation: Some(13.5),
                ..new_photo("tilted")
            })
            .await
            .unwrap();
        assert_eq!(photo.rotation, 13.5);

        let found = repo.find_by_id(photo.id).await.unwrap().unwrap();
        assert_eq!(found.rotation, 13.5);
    }

    #[tokio::test]
    async fn list_all_orders_by_creation() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = PhotoRepository::new(&db);

        let first = repo.create(&new_photo("first")).await.unwrap();
        let second = repo.create(&new_photo("second")).await.unwrap();

        let photos = repo.list_all().await.unwrap();
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].id, first.id);
        assert_eq!(photos[1].id, second.id);
    }

    #[tokio::test]
    async fn missing_rotation_is_backfilled_once() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = PhotoRepository::new(&db);

        // Simulate an externally inserted row with no rotation.
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO photos (id, title, description, url, taken_on, created_at) \
             VALUES (?, 'bare', '', 'https://example.com/bare.jpg', '', ?)",
        )
        .bind(id.to_string())
        .bind(Utc::now())
        .execute(db.pool())
        .await
        .unwrap();

        let first_load = repo.list_all().await.unwrap();
        let assigned = first_load[0].rotation;
        assert!(assigned.abs() <= MAX_ROTATION_DEGREES);

        // Second load must see the same persisted value.
        let second_load = repo.list_all().await.unwrap();
        assert_eq!(second_load[0].rotation, assigned);
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = PhotoRepository::new(&db);

        let photo = repo.create(&new_photo("gone")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        assert!(repo.delete(photo.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(!repo.delete(photo.id).await.unwrap());
    }
}
