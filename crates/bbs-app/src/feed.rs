//! Post feed shaping.
//!
//! Turns the posts delivered by the listing collaborator into display
//! entries: formatted dates and times, a placeholder while loading or on
//! failure, and staggered entrance timing by position. Order is preserved as
//! delivered; the feed never re-sorts.

use std::time::Duration;

use bbs_core::Timestamp;
use bbs_posts::PostSummary;
use chrono::{DateTime, Utc};

use crate::{AppConfig, DisplayZone};

/// Shown while the fetch is in flight.
pub const LOADING_MESSAGE: &str = "LOADING POSTS...";

/// Shown when the fetch failed.
pub const ERROR_MESSAGE: &str = "FAILED TO LOAD POSTS";

/// Shown when there are no published posts.
pub const EMPTY_MESSAGE: &str = "NO POSTS YET";

/// `DD.MM.YYYY` in `zone`.
pub fn format_date(ts: DateTime<Utc>, zone: &DisplayZone) -> String {
    ts.with_timezone(&zone.offset()).format("%d.%m.%Y").to_string()
}

/// 12-hour time with AM/PM and the zone label, e.g. `9:00 AM GMT`.
pub fn format_time(ts: DateTime<Utc>, zone: &DisplayZone) -> String {
    let local = ts.with_timezone(&zone.offset()).format("%-I:%M %p");
    format!("{local} {}", zone.label())
}

/// Entrance delay of the entry at `index`.
pub fn stagger_delay(index: usize, stagger: Duration) -> Duration {
    stagger.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

/// Fetch state of the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// Fetch in flight.
    Loading,
    /// Fetch failed. Terminal for this mount; there is no retry.
    Failed,
    /// Posts arrived (possibly none).
    Ready,
}

/// One post, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    /// Post id.
    pub id: String,
    /// `DD.MM.YYYY`.
    pub date: String,
    /// `H:MM AM ZONE`.
    pub time: String,
    /// Headline.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Optional image reference.
    pub image_ref: Option<String>,
    /// Entrance delay after the posts arrived.
    pub delay: Duration,
}

impl FeedEntry {
    /// Format `post` at position `index`.
    pub fn from_summary(post: PostSummary, index: usize, zone: &DisplayZone, stagger: Duration) -> Self {
        Self {
            date: format_date(post.timestamp, zone),
            time: format_time(post.timestamp, zone),
            id: post.id,
            title: post.title,
            body: post.body,
            image_ref: post.image_ref,
            delay: stagger_delay(index, stagger),
        }
    }
}

/// Feed state for one mount of the content screen.
#[derive(Debug, Clone)]
pub struct Feed<I> {
    zone: DisplayZone,
    stagger: Duration,
    entrance: Duration,
    status: FeedStatus,
    entries: Vec<FeedEntry>,
    arrived_at: Option<I>,
    /// Whether the last poll saw an entrance in progress.
    animating: bool,
}

impl<I: Timestamp> Feed<I> {
    /// Empty feed waiting for its fetch.
    pub fn new(zone: DisplayZone, stagger: Duration, entrance: Duration) -> Self {
        Self {
            zone,
            stagger,
            entrance,
            status: FeedStatus::Loading,
            entries: Vec::new(),
            arrived_at: None,
            animating: false,
        }
    }

    /// Feed using the zone and entrance timings of `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.zone.clone(), config.feed_stagger, config.feed_entrance)
    }

    /// Accept the fetched posts at `now`.
    ///
    /// Posts are write-once: a feed that already settled ignores further
    /// deliveries. Returns whether the posts were accepted.
    pub fn load(&mut self, posts: Vec<PostSummary>, now: I) -> bool {
        if self.status != FeedStatus::Loading {
            return false;
        }
        self.entries = posts
            .into_iter()
            .enumerate()
            .map(|(index, post)| FeedEntry::from_summary(post, index, &self.zone, self.stagger))
            .collect();
        self.arrived_at = Some(now);
        self.animating = !self.entries.is_empty();
        self.status = FeedStatus::Ready;
        true
    }

    /// Record a failed fetch. Returns whether the failure was accepted.
    pub fn fail(&mut self) -> bool {
        if self.status != FeedStatus::Loading {
            return false;
        }
        self.status = FeedStatus::Failed;
        true
    }

    /// Advance entrance animations. Returns `true` if a redraw is needed:
    /// while any entrance runs, and once more when the last one ends.
    pub fn poll(&mut self, now: I) -> bool {
        let was_animating = self.animating;
        self.animating = self.status == FeedStatus::Ready && !self.is_settled(now);
        was_animating
    }

    /// Fetch state.
    pub fn status(&self) -> FeedStatus {
        self.status
    }

    /// Formatted entries, in delivery order.
    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    /// Message to show instead of entries. `None` when entries are shown.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self.status {
            FeedStatus::Loading => Some(LOADING_MESSAGE),
            FeedStatus::Failed => Some(ERROR_MESSAGE),
            FeedStatus::Ready if self.entries.is_empty() => Some(EMPTY_MESSAGE),
            FeedStatus::Ready => None,
        }
    }

    /// Entrance progress of the entry at `index`, from 0 (hidden) to 1
    /// (fully shown).
    pub fn entrance_progress(&self, index: usize, now: I) -> f32 {
        let Some(entry) = self.entries.get(index) else {
            return 0.0;
        };
        let elapsed = self.elapsed(now);
        if elapsed < entry.delay {
            return 0.0;
        }
        if self.entrance.is_zero() {
            return 1.0;
        }
        let into = elapsed.saturating_sub(entry.delay);
        (into.as_secs_f32() / self.entrance.as_secs_f32()).min(1.0)
    }

    /// Whether every entrance finished.
    pub fn is_settled(&self, now: I) -> bool {
        match self.entries.last() {
            Some(last) => self.elapsed(now) >= last.delay + self.entrance,
            None => true,
        }
    }

    /// Zone used for timestamps.
    pub fn zone(&self) -> &DisplayZone {
        &self.zone
    }

    fn elapsed(&self, now: I) -> Duration {
        match self.arrived_at {
            Some(at) if now > at => now - at,
            _ => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use chrono::TimeZone;

    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn preview() -> PostSummary {
        PostSummary {
            id: "3".into(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap(),
            title: "TRACK PREVIEW".into(),
            body: "Snippet...".into(),
            image_ref: Some("/images/track-preview.jpg".into()),
        }
    }

    fn feed() -> Feed<Instant> {
        Feed::new(DisplayZone::gmt(), ms(100), ms(300))
    }

    #[test]
    fn formats_date_and_time() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap();
        assert_eq!(format_date(ts, &DisplayZone::gmt()), "05.01.2026");
        assert_eq!(format_time(ts, &DisplayZone::gmt()), "9:00 AM GMT");

        let pm = Utc.with_ymd_and_hms(2026, 1, 2, 15, 30, 0).unwrap();
        assert_eq!(format_time(pm, &DisplayZone::gmt()), "3:30 PM GMT");

        let noon = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(format_time(noon, &DisplayZone::gmt()), "12:00 PM GMT");
    }

    #[test]
    fn zone_offset_can_move_the_date() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 5, 23, 30, 0).unwrap();
        let zone = DisplayZone::from_hours(2, "EET").unwrap();

        assert_eq!(format_date(ts, &zone), "06.01.2026");
        assert_eq!(format_time(ts, &zone), "1:30 AM EET");
    }

    #[test]
    fn placeholders_follow_status() {
        let t0 = Instant::now();

        let mut loading = feed();
        assert_eq!(loading.placeholder(), Some(LOADING_MESSAGE));

        loading.fail();
        assert_eq!(loading.placeholder(), Some(ERROR_MESSAGE));

        let mut empty = feed();
        empty.load(Vec::new(), t0);
        assert_eq!(empty.placeholder(), Some(EMPTY_MESSAGE));

        let mut full = feed();
        full.load(vec![preview()], t0);
        assert_eq!(full.placeholder(), None);
    }

    #[test]
    fn single_post_renders_one_entry() {
        let mut feed = feed();
        feed.load(vec![preview()], Instant::now());

        let [entry] = feed.entries() else {
            panic!("expected one entry");
        };
        assert_eq!(entry.date, "05.01.2026");
        assert!(entry.time.ends_with(" GMT"));
        assert_eq!(entry.delay, Duration::ZERO);
    }

    #[test]
    fn entries_stagger_by_index() {
        let t0 = Instant::now();
        let mut feed = feed();
        feed.load(vec![preview(), preview(), preview()], t0);

        let delays: Vec<_> = feed.entries().iter().map(|e| e.delay).collect();
        assert_eq!(delays, [ms(0), ms(100), ms(200)]);

        assert_eq!(feed.entrance_progress(1, t0 + ms(50)), 0.0);
        assert!((feed.entrance_progress(1, t0 + ms(250)) - 0.5).abs() < 1e-3);
        assert_eq!(feed.entrance_progress(2, t0 + ms(500)), 1.0);
        assert!(!feed.is_settled(t0 + ms(499)));
        assert!(feed.is_settled(t0 + ms(500)));
    }

    #[test]
    fn feed_is_write_once() {
        let t0 = Instant::now();
        let mut feed = feed();
        assert!(feed.load(vec![preview()], t0));

        assert!(!feed.load(Vec::new(), t0));
        assert!(!feed.fail());
        assert_eq!(feed.entries().len(), 1);
    }

    #[test]
    fn poll_requests_one_redraw_after_settling() {
        let t0 = Instant::now();
        let mut feed = feed();
        feed.load(vec![preview()], t0);

        assert!(feed.poll(t0 + ms(100)));
        assert!(feed.poll(t0 + ms(300)));
        assert!(!feed.poll(t0 + ms(400)));
    }
}
