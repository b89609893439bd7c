//! Sample feed shipped with the terminal.

use chrono::{DateTime, TimeZone, Utc};

use crate::Post;

const FILLER: &str = "Lorem ipsum dolor sit amet, I haven't fully memorized this filler text my \
                      fault. Pictures could also live in these posts but kinda blog/ tumblr style \
                      is the energy.";

/// The three published sample posts, oldest first.
pub fn sample_posts() -> Vec<Post> {
    vec![
        sample("1", at(1, 12, 0), "POST NAME", FILLER, None),
        sample(
            "2",
            at(2, 15, 30),
            "ANOTHER POST",
            "More content here. The vibe is very much old-school BBS meets modern album \
             rollout. Exclusive content, behind the scenes, etc.",
            None,
        ),
        sample(
            "3",
            at(5, 9, 0),
            "TRACK PREVIEW",
            "Snippet of upcoming track. More to come...",
            Some("/images/track-preview.jpg"),
        ),
    ]
}

fn sample(id: &str, when: DateTime<Utc>, title: &str, content: &str, image: Option<&str>) -> Post {
    Post {
        id: id.to_owned(),
        created_at: when,
        updated_at: when,
        title: title.to_owned(),
        content: content.to_owned(),
        image_url: image.map(str::to_owned),
        published: true,
        published_at: Some(when),
        author_id: None,
    }
}

/// January 2026, UTC.
fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, day, hour, minute, 0).single().unwrap_or_default()
}
