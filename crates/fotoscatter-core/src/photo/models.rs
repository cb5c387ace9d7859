use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Largest tilt (either direction) a card can get, in degrees.
pub const MAX_ROTATION_DEGREES: f64 = 20.0;

/// A photo in the gallery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub url: String,
    /// Display date as entered at upload time (free-form string)
    pub taken_on: String,
    /// Display-only tilt in degrees, assigned once and persisted
    pub rotation: f64,
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new photo
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub title: String,
    pub description: String,
    pub url: String,
    pub taken_on: String,
    /// Tilt in degrees; `None` means "assign a random one at creation"
    pub rotation: Option<f64>,
}

impl Photo {
    /// Whether the card tilts noticeably to either side
    pub fn leans_left(&self) -> bool {
        self.rotation < -5.0
    }

    pub fn leans_right(&self) -> bool {
        self.rotation > 5.0
    }
}

/// Draw a display rotation uniformly from [-20, 20) degrees
pub fn random_rotation<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(-MAX_ROTATION_DEGREES..MAX_ROTATION_DEGREES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rotation_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let r = random_rotation(&mut rng);
            assert!((-MAX_ROTATION_DEGREES..MAX_ROTATION_DEGREES).contains(&r));
        }
    }

    #[test]
    fn lean_thresholds() {
        let base = Photo {
            id: Uuid::new_v4(),
            title: "t".into(),
            description: String::new(),
            url: "https://example.com/p.jpg".into(),
            taken_on: "January 1, 2023".into(),
            rotation: 0.0,
            created_at: chrono::Utc::now(),
        };
        assert!(!base.leans_left() && !base.leans_right());
        assert!(Photo { rotation: -12.0, ..base.clone() }.leans_left());
        assert!(Photo { rotation: 12.0, ..base }.leans_right());
    }
}
