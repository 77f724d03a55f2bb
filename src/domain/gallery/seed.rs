//! Sample images a fresh gallery starts with.

use crate::domain::gallery::model::{Image, ImageSource};
use chrono::{DateTime, TimeZone, Utc};

fn seeded_at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn sample(id: &str, title: &str, description: &str, url: &str, created_at: DateTime<Utc>) -> Image {
    Image {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        url: url.to_string(),
        created_at,
        source: ImageSource::Url,
    }
}

pub fn default_images() -> Vec<Image> {
    vec![
        sample(
            "1",
            "Digital Landscape",
            "Futuristic digital cityscape with neon lights",
            "https://images.unsplash.com/photo-1488590528505-98d2b5aba04b",
            seeded_at(2023, 1, 15),
        ),
        sample(
            "2",
            "Circuit Design",
            "Macro photography of an advanced circuit board",
            "https://images.unsplash.com/photo-1518770660439-4636190af475",
            seeded_at(2023, 2, 20),
        ),
        sample(
            "3",
            "Code Interface",
            "Monitor displaying complex programming code",
            "https://images.unsplash.com/photo-1461749280684-dccba630e2f6",
            seeded_at(2023, 3, 5),
        ),
        sample(
            "4",
            "Tech Workspace",
            "Modern laptop on a minimalist desk surface",
            "https://images.unsplash.com/photo-1531297484001-80022131f5a1",
            seeded_at(2023, 4, 10),
        ),
        sample(
            "5",
            "Software Development",
            "Colorful coding environment on modern display",
            "https://images.unsplash.com/photo-1487058792275-0ad4aaf24ca7",
            seeded_at(2023, 5, 18),
        ),
        sample(
            "6",
            "Developer Setup",
            "Clean workspace with MacBook showing code",
            "https://images.unsplash.com/photo-1498050108023-c5249f4df085",
            seeded_at(2023, 6, 22),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_samples_with_distinct_ids() {
        let images = default_images();
        assert_eq!(images.len(), 6);
        let ids: Vec<&str> = images.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
        assert_eq!(images[0].created_at.to_rfc3339(), "2023-01-15T00:00:00+00:00");
    }
}
