use std::path::{Path, PathBuf};
use std::time::Duration;

use super::debouncer::{ChangeKind, DEBOUNCE_MS, Debouncer, is_vcs_metadata};

fn make_event(paths: Vec<&str>, kind: notify::EventKind) -> notify::Event {
    notify::Event {
        kind,
        paths: paths.into_iter().map(PathBuf::from).collect(),
        attrs: Default::default(),
    }
}

fn modify_kind() -> notify::EventKind {
    notify::EventKind::Modify(notify::event::ModifyKind::Data(
        notify::event::DataChange::Any,
    ))
}

fn create_kind() -> notify::EventKind {
    notify::EventKind::Create(notify::event::CreateKind::File)
}

fn remove_kind() -> notify::EventKind {
    notify::EventKind::Remove(notify::event::RemoveKind::File)
}

fn rename_kind() -> notify::EventKind {
    notify::EventKind::Modify(notify::event::ModifyKind::Name(
        notify::event::RenameMode::Any,
    ))
}

fn metadata_kind() -> notify::EventKind {
    notify::EventKind::Modify(notify::event::ModifyKind::Metadata(
        notify::event::MetadataKind::Any,
    ))
}

#[test]
fn test_debouncer_empty() {
    let debouncer = Debouncer::new();
    assert!(!debouncer.is_ready());
}

#[test]
fn test_event_routing_by_kind() {
    let mut debouncer = Debouncer::new();

    debouncer.add_event(&make_event(vec!["/deck/a.html"], create_kind()));
    debouncer.add_event(&make_event(vec!["/deck/b.html"], modify_kind()));
    debouncer.add_event(&make_event(vec!["/deck/c.html"], remove_kind()));
    debouncer.add_event(&make_event(vec!["/deck/d.html"], rename_kind()));

    assert_eq!(debouncer.changes.len(), 4);
    assert_eq!(
        debouncer.changes[&PathBuf::from("/deck/a.html")],
        ChangeKind::Created
    );
    assert_eq!(
        debouncer.changes[&PathBuf::from("/deck/b.html")],
        ChangeKind::Written
    );
    assert_eq!(
        debouncer.changes[&PathBuf::from("/deck/c.html")],
        ChangeKind::Removed
    );
    assert_eq!(
        debouncer.changes[&PathBuf::from("/deck/d.html")],
        ChangeKind::Renamed
    );
}

#[test]
fn test_metadata_noise_ignored() {
    let mut debouncer = Debouncer::new();
    debouncer.add_event(&make_event(vec!["/deck/a.html"], metadata_kind()));
    assert!(debouncer.changes.is_empty());
    assert!(debouncer.last_event.is_none());
}

#[test]
fn test_vcs_metadata_excluded() {
    let mut debouncer = Debouncer::new();

    debouncer.add_event(&make_event(vec!["/deck/.git/index"], modify_kind()));
    debouncer.add_event(&make_event(
        vec!["/deck/.git/objects/ab/cdef"],
        create_kind(),
    ));
    assert!(debouncer.changes.is_empty());

    // Only a literal .git component counts
    assert!(is_vcs_metadata(Path::new("/deck/.git/config")));
    assert!(!is_vcs_metadata(Path::new("/deck/gitter/page.html")));
}

#[test]
fn test_burst_coalesces_to_one_notification() {
    // Several low-level events for one path within the debounce window
    // must produce exactly one forwarded change
    let mut debouncer = Debouncer::new();

    debouncer.add_event(&make_event(vec!["/deck/new.html"], create_kind()));
    debouncer.add_event(&make_event(vec!["/deck/new.html"], modify_kind()));
    debouncer.add_event(&make_event(vec!["/deck/new.html"], modify_kind()));

    assert_eq!(debouncer.changes.len(), 1);
    assert_eq!(
        debouncer.changes[&PathBuf::from("/deck/new.html")],
        ChangeKind::Created
    );

    std::thread::sleep(Duration::from_millis(DEBOUNCE_MS + 20));
    let changes = debouncer.take_if_ready().unwrap();
    assert_eq!(changes.len(), 1);
    assert!(debouncer.changes.is_empty());
}

#[test]
fn test_dedup_same_event() {
    let mut debouncer = Debouncer::new();
    debouncer.add_event(&make_event(
        vec!["/deck/a.html", "/deck/a.html"],
        modify_kind(),
    ));
    assert_eq!(debouncer.changes.len(), 1);
}

#[test]
fn test_not_ready_inside_window() {
    let mut debouncer = Debouncer::new();
    debouncer.add_event(&make_event(vec!["/deck/a.html"], modify_kind()));
    assert!(!debouncer.is_ready());
    assert!(debouncer.take_if_ready().is_none());
}

#[test]
fn test_sleep_duration_no_events() {
    let debouncer = Debouncer::new();
    assert!(debouncer.sleep_duration() >= Duration::from_secs(3600));
}

#[test]
fn test_sleep_duration_after_event() {
    let mut debouncer = Debouncer::new();
    debouncer.last_event = Some(std::time::Instant::now());

    let dur = debouncer.sleep_duration();
    assert!(dur >= Duration::from_millis(DEBOUNCE_MS - 10));
    assert!(dur <= Duration::from_millis(DEBOUNCE_MS + 10));
}

#[test]
fn test_remove_then_create_restores() {
    let mut debouncer = Debouncer::new();

    debouncer.add_event(&make_event(vec!["/deck/a.html"], remove_kind()));
    debouncer.add_event(&make_event(vec!["/deck/a.html"], create_kind()));

    assert_eq!(debouncer.changes.len(), 1);
    assert_eq!(
        debouncer.changes[&PathBuf::from("/deck/a.html")],
        ChangeKind::Created
    );
}

#[test]
fn test_create_then_remove_discards() {
    let mut debouncer = Debouncer::new();

    debouncer.add_event(&make_event(vec!["/deck/a.html"], create_kind()));
    debouncer.add_event(&make_event(vec!["/deck/a.html"], remove_kind()));
    assert!(
        debouncer.changes.is_empty(),
        "created+removed should discard"
    );
}

#[test]
fn test_write_then_remove_upgrades() {
    let mut debouncer = Debouncer::new();

    debouncer.add_event(&make_event(vec!["/deck/a.html"], modify_kind()));
    debouncer.add_event(&make_event(vec!["/deck/a.html"], remove_kind()));
    assert_eq!(debouncer.changes.len(), 1);
    assert_eq!(
        debouncer.changes[&PathBuf::from("/deck/a.html")],
        ChangeKind::Removed
    );
}
