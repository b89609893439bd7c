//! Store behavior shared by every `PostStore` implementation.
//!
//! Each scenario runs against the in-memory store and the JSON file store.

use bbs_posts::{
    FilePostStore, MemoryPostStore, PostDraft, PostPatch, PostStore, StoreError, sample_posts,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use tempfile::TempDir;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap()
}

fn stores() -> Vec<(&'static str, Box<dyn PostStore>, Option<TempDir>)> {
    let dir = tempfile::tempdir().unwrap();
    let file = FilePostStore::open(dir.path().join("posts.json")).unwrap();
    vec![
        ("memory", Box::new(MemoryPostStore::new()), None),
        ("file", Box::new(file), Some(dir)),
    ]
}

#[test]
fn create_assigns_fresh_ids() {
    for (name, store, _dir) in stores() {
        let a = store.create(PostDraft::new("A", "a"), t0()).unwrap();
        let b = store.create(PostDraft::new("B", "b"), t0()).unwrap();

        assert_ne!(a.id, b.id, "{name}");
        assert_eq!(a.id.len(), 36, "{name}: uuid string");
        assert_eq!(store.get(&a.id).unwrap(), Some(a), "{name}");
    }
}

#[test]
fn unpublished_posts_stay_out_of_feed() {
    for (name, store, _dir) in stores() {
        store.create(PostDraft::new("draft", ""), t0()).unwrap();
        let live = store.create(PostDraft::new("live", "").published(), t0()).unwrap();

        let feed = store.list_published().unwrap();
        assert_eq!(feed.len(), 1, "{name}");
        assert_eq!(feed[0].id, live.id, "{name}");
        assert_eq!(store.list_all().unwrap().len(), 2, "{name}");
    }
}

#[test]
fn published_listing_is_newest_first() {
    for (name, store, _dir) in stores() {
        let old = store.create(PostDraft::new("old", ""), t0()).unwrap();
        let new = store.create(PostDraft::new("new", ""), t0() + Duration::hours(1)).unwrap();

        // Publishing the older post later moves it to the top.
        store.set_published(&new.id, true, t0() + Duration::hours(2)).unwrap();
        store.set_published(&old.id, true, t0() + Duration::hours(3)).unwrap();

        let ids: Vec<_> = store.list_published().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![old.id.clone(), new.id.clone()], "{name}");

        let ids: Vec<_> = store.list_all().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![new.id, old.id], "{name}");
    }
}

#[test]
fn set_published_toggles_publish_time() {
    for (name, store, _dir) in stores() {
        let post = store.create(PostDraft::new("x", ""), t0()).unwrap();

        let later = t0() + Duration::minutes(5);
        let published = store.set_published(&post.id, true, later).unwrap();
        assert_eq!(published.published_at, Some(later), "{name}");
        assert_eq!(published.updated_at, later, "{name}");

        let hidden = store.set_published(&post.id, false, later).unwrap();
        assert!(!hidden.published, "{name}");
        assert_eq!(hidden.published_at, None, "{name}");
    }
}

#[test]
fn update_missing_post_is_not_found() {
    for (name, store, _dir) in stores() {
        let err = store.update("nope", PostPatch::default(), t0()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { ref id } if id == "nope"), "{name}");
    }
}

#[test]
fn blank_title_is_rejected_without_writing() {
    for (name, store, _dir) in stores() {
        let err = store.create(PostDraft::new(" ", "body"), t0()).unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)), "{name}");
        assert!(store.list_all().unwrap().is_empty(), "{name}");
    }
}

#[test]
fn delete_is_idempotent() {
    for (name, store, _dir) in stores() {
        let post = store.create(PostDraft::new("x", ""), t0()).unwrap();
        store.delete(&post.id).unwrap();
        store.delete(&post.id).unwrap();

        assert_eq!(store.get(&post.id).unwrap(), None, "{name}");
    }
}

#[test]
fn seeded_feed_matches_sample_posts() {
    let store = MemoryPostStore::seeded();
    let feed = store.list_published().unwrap();

    let titles: Vec<_> = feed.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["TRACK PREVIEW", "ANOTHER POST", "POST NAME"]);

    let preview = feed[0].summary();
    assert_eq!(preview.id, "3");
    assert_eq!(preview.timestamp, Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap());
    assert_eq!(preview.image_ref.as_deref(), Some("/images/track-preview.jpg"));
}

#[test]
fn memory_clones_share_rows() {
    let store = MemoryPostStore::new();
    let clone = store.clone();
    clone.create(PostDraft::new("shared", ""), t0()).unwrap();

    assert_eq!(store.len().unwrap(), 1);
}

#[test]
fn file_store_persists_across_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("posts.json");

    let store = FilePostStore::open_or_seed(&path, sample_posts()).unwrap();
    let created = store.create(PostDraft::new("fresh", "").published(), t0()).unwrap();

    let reopened = FilePostStore::open(&path).unwrap();
    let feed = reopened.list_published().unwrap();
    assert_eq!(feed.len(), 4);
    assert_eq!(feed[0].id, created.id);
}

#[test]
fn open_or_seed_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posts.json");
    std::fs::write(&path, "[]").unwrap();

    let store = FilePostStore::open_or_seed(&path, sample_posts()).unwrap();
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn corrupt_file_is_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posts.json");
    std::fs::write(&path, "{ not a list").unwrap();

    assert!(matches!(FilePostStore::open(&path), Err(StoreError::Format(_))));
}

#[test]
fn file_writes_swap_whole_documents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posts.json");
    let store = FilePostStore::open_or_seed(&path, sample_posts()).unwrap();

    let before = std::fs::read_to_string(&path).unwrap();
    assert!(matches!(
        store.update("missing", PostPatch::default(), t0()),
        Err(StoreError::NotFound { .. })
    ));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);

    store.create(PostDraft::new("one", ""), t0()).unwrap();
    store.delete("1").unwrap();

    // No staging files are left next to the document.
    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("posts.json")]);
    assert_eq!(FilePostStore::open(&path).unwrap().list_all().unwrap().len(), 3);
}
