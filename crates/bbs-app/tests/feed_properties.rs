//! Property-based tests for feed shaping.
//!
//! These tests verify:
//! - Entries keep the delivery order and are staggered by position
//! - Entrance progress only grows, stays within [0, 1], and later entries
//!   never run ahead of earlier ones
//! - Dates and times keep their fixed shapes for any instant

use std::time::{Duration, Instant};

use bbs_app::{DisplayZone, Feed, FeedStatus};
use bbs_posts::PostSummary;
use chrono::DateTime;
use proptest::prelude::*;

const STAGGER: Duration = Duration::from_millis(100);
const ENTRANCE: Duration = Duration::from_millis(300);

fn arbitrary_posts() -> impl Strategy<Value = Vec<PostSummary>> {
    prop::collection::vec((0i64..4_000_000_000, "[A-Z ]{1,16}", prop::option::of("/[a-z]{1,8}\\.jpg")), 0..12)
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (secs, title, image_ref))| PostSummary {
                    id: i.to_string(),
                    timestamp: DateTime::from_timestamp(secs, 0).unwrap(),
                    title,
                    body: String::new(),
                    image_ref,
                })
                .collect()
        })
}

fn loaded(posts: Vec<PostSummary>, zone: DisplayZone, at: Instant) -> Feed<Instant> {
    let mut feed = Feed::new(zone, STAGGER, ENTRANCE);
    feed.load(posts, at);
    feed
}

proptest! {
    /// INVARIANT: entries come out in delivery order, entry `i` waits
    /// `i * stagger`.
    #[test]
    fn prop_entries_keep_delivery_order(posts in arbitrary_posts()) {
        let ids: Vec<String> = posts.iter().map(|post| post.id.clone()).collect();
        let feed = loaded(posts, DisplayZone::gmt(), Instant::now());

        prop_assert_eq!(feed.status(), FeedStatus::Ready);
        let shown: Vec<String> = feed.entries().iter().map(|entry| entry.id.clone()).collect();
        prop_assert_eq!(shown, ids);
        for (i, entry) in feed.entries().iter().enumerate() {
            prop_assert_eq!(entry.delay, STAGGER * u32::try_from(i).unwrap());
        }
    }

    /// INVARIANT: progress is monotonic in time, bounded, and ordered by
    /// position.
    #[test]
    fn prop_entrance_progress_monotonic(
        posts in arbitrary_posts(),
        steps in prop::collection::vec(0u64..150, 1..40),
    ) {
        let t0 = Instant::now();
        let feed = loaded(posts, DisplayZone::gmt(), t0);
        let count = feed.entries().len();
        let mut previous = vec![0.0f32; count];

        let mut offset = 0;
        for step in steps {
            offset += step;
            let now = t0 + Duration::from_millis(offset);

            for (index, last) in previous.iter_mut().enumerate() {
                let progress = feed.entrance_progress(index, now);
                prop_assert!((0.0..=1.0).contains(&progress));
                prop_assert!(progress >= *last);
                *last = progress;

                if index > 0 {
                    prop_assert!(progress <= feed.entrance_progress(index - 1, now));
                }
            }
        }

        let settled = t0 + STAGGER * 12 + ENTRANCE;
        prop_assert!(feed.is_settled(settled));
    }

    /// INVARIANT: `DD.MM.YYYY` and `H:MM AM|PM LABEL` for every instant and
    /// offset.
    #[test]
    fn prop_timestamp_shapes(posts in arbitrary_posts(), hours in -12i32..=14) {
        let zone = DisplayZone::from_hours(hours, "LOC").unwrap();
        let feed = loaded(posts, zone, Instant::now());

        for entry in feed.entries() {
            let date: Vec<&str> = entry.date.split('.').collect();
            prop_assert_eq!(date.len(), 3);
            prop_assert_eq!(date[0].len(), 2);
            prop_assert_eq!(date[1].len(), 2);
            prop_assert_eq!(date[2].len(), 4);
            prop_assert!(entry.date.chars().all(|c| c.is_ascii_digit() || c == '.'));

            let parts: Vec<&str> = entry.time.split(' ').collect();
            prop_assert_eq!(parts.len(), 3);
            prop_assert!(parts[1] == "AM" || parts[1] == "PM");
            prop_assert_eq!(parts[2], "LOC");

            let (hour, minute) = parts[0].split_once(':').unwrap();
            let hour: u32 = hour.parse().unwrap();
            prop_assert!((1..=12).contains(&hour));
            prop_assert_eq!(minute.len(), 2);
        }
    }
}
