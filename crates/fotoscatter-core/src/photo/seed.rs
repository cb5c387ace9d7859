use chrono::NaiveDate;
use rand::Rng;

use super::NewPhoto;

const SAMPLE_TITLES: &[&str] = &[
    "Sunset Glow",
    "Morning Coffee",
    "Evening Stroll",
    "Garden Flowers",
    "Sleepy Cat",
    "Mountain View",
    "Favorite Meal",
    "Close Friends",
    "Quiet Beach",
    "Blue Sky",
    "Heavy Rain",
    "Rainbow",
    "Good Book",
    "Live Music",
    "Morning Run",
    "Starry Night",
    "Family Dinner",
    "Long Journey",
    "Happy Moment",
    "Fond Memory",
];

/// Generate `count` placeholder photos for seeding a demo gallery.
///
/// URLs point at picsum.photos so every card has a real image; dates
/// are random days in 2023. Rotation is left unset so the repository
/// assigns it at creation, same as a real upload without one.
pub fn sample_photos<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<NewPhoto> {
    (0..count)
        .map(|i| {
            let title = SAMPLE_TITLES[i % SAMPLE_TITLES.len()];
            let month = rng.gen_range(1..=12);
            let day = rng.gen_range(1..=28);
            let date = NaiveDate::from_ymd_opt(2023, month, day)
                .unwrap_or_else(|| NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());

            NewPhoto {
                title: title.to_string(),
                description: format!("A lovely moment: {}.", title.to_lowercase()),
                url: format!(
                    "https://picsum.photos/400/400?random={}",
                    (i % 20) + 1
                ),
                taken_on: date.format("%B %-d, %Y").to_string(),
                rotation: None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generates_requested_count() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample_photos(0, &mut rng).len(), 0);
        assert_eq!(sample_photos(20, &mut rng).len(), 20);
        assert_eq!(sample_photos(45, &mut rng).len(), 45);
    }

    #[test]
    fn titles_cycle_and_rotation_is_unset() {
        let mut rng = StdRng::seed_from_u64(2);
        let photos = sample_photos(25, &mut rng);
        assert_eq!(photos[0].title, photos[20].title);
        assert!(photos.iter().all(|p| p.rotation.is_none()));
        assert!(photos.iter().all(|p| p.url.starts_with("https://picsum.photos/")));
    }
}
