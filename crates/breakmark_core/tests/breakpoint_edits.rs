use breakmark_core::{
    BreakpointRecord, BreakpointRepository, BreakpointService, BreakpointState,
    FileBreakpointRepository, ServiceError, ToggleOutcome,
};
use std::path::PathBuf;

fn setup() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved-breakpoints");
    (dir, path)
}

fn rendered_list(service: &BreakpointService<FileBreakpointRepository>) -> Vec<String> {
    service
        .list()
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn list_example_is_deterministic() {
    let (_dir, path) = setup();
    let repo = FileBreakpointRepository::new(&path);
    repo.save(&[
        BreakpointRecord::new("/a.py", 20).with_condition(Some("x>1")),
        BreakpointRecord::new("/a.py", 10),
    ])
    .unwrap();

    let service = BreakpointService::new(repo);
    assert_eq!(rendered_list(&service), vec!["/a.py:10", "/a.py:20:x>1"]);
}

#[test]
fn destructive_toggle_drops_condition() {
    let (_dir, path) = setup();
    let repo = FileBreakpointRepository::new(&path);
    repo.save(&[
        BreakpointRecord::new("/a.py", 10).with_condition(Some("x")),
        BreakpointRecord::new("/a.py", 20).with_condition(Some("x>1")),
    ])
    .unwrap();
    let service = BreakpointService::new(repo);

    let removed = service.toggle("/a.py", 10).unwrap();
    assert!(matches!(removed, ToggleOutcome::Removed(ref r) if r.condition.as_deref() == Some("x")));
    assert_eq!(rendered_list(&service), vec!["/a.py:20:x>1"]);

    let added = service.toggle("/a.py", 10).unwrap();
    assert!(added.is_added());
    assert_eq!(rendered_list(&service), vec!["/a.py:10", "/a.py:20:x>1"]);
    assert_eq!(
        service.get("/a.py", 10).unwrap(),
        Some(BreakpointRecord::new("/a.py", 10))
    );
}

#[test]
fn toggle_twice_round_trips_every_key() {
    let (_dir, path) = setup();
    let repo = FileBreakpointRepository::new(&path);
    repo.save(&[
        BreakpointRecord::new("/a.py", 1),
        BreakpointRecord::new("/b.py", 2),
    ])
    .unwrap();
    let service = BreakpointService::new(repo.clone());
    let before = repo.load().unwrap();

    for (file, line) in [("/a.py", 1), ("/b.py", 2), ("/c.py", 3)] {
        service.toggle(file, line).unwrap();
        service.toggle(file, line).unwrap();
    }

    let mut after = repo.load().unwrap();
    after.sort_by_key(BreakpointRecord::key);
    assert_eq!(after, before);
}

#[test]
fn edit_condition_state_machine() {
    let (_dir, path) = setup();
    let service = BreakpointService::new(FileBreakpointRepository::new(&path));

    let created = service.edit_condition("/a.py", 5, "n > 3").unwrap();
    assert_eq!(created.previous, BreakpointState::Absent);
    assert_eq!(created.current, BreakpointState::Conditional);

    let replaced = service.edit_condition("/a.py", 5, "n > 4").unwrap();
    assert_eq!(replaced.previous, BreakpointState::Conditional);
    assert_eq!(replaced.record.condition.as_deref(), Some("n > 4"));

    let again = service.edit_condition("/a.py", 5, "n > 4").unwrap();
    assert!(!again.changed);

    let cleared = service.edit_condition("/a.py", 5, "").unwrap();
    assert_eq!(cleared.current, BreakpointState::Unconditional);
    assert_eq!(rendered_list(&service), vec!["/a.py:5"]);
}

#[test]
fn edit_condition_keeps_passthrough_fields_from_file() {
    let (_dir, path) = setup();
    std::fs::write(
        &path,
        "{\"file\":\"/a.py\",\"line\":5,\"temporary\":true,\"function_name\":\"main\"}\n",
    )
    .unwrap();
    let service = BreakpointService::new(FileBreakpointRepository::new(&path));

    service.edit_condition("/a.py", 5, "flag").unwrap();
    let record = service.get("/a.py", 5).unwrap().unwrap();
    assert!(record.temporary);
    assert_eq!(record.function_name.as_deref(), Some("main"));
    assert_eq!(record.condition.as_deref(), Some("flag"));
}

#[test]
fn clear_all_then_list_is_empty() {
    let (_dir, path) = setup();
    let service = BreakpointService::new(FileBreakpointRepository::new(&path));
    service.toggle("/a.py", 1).unwrap();
    service.edit_condition("/b.py", 2, "y").unwrap();

    assert_eq!(service.clear_all().unwrap(), 2);
    assert!(service.list().unwrap().is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn save_of_load_is_a_fixed_point() {
    let (_dir, path) = setup();
    std::fs::write(
        &path,
        concat!(
            "{\"file\":\"/a.py\",\"line\":10}\n",
            "{\"file\":\"/a.py\",\"line\":20,\"temporary\":true,\"condition\":\"x>1\",\"function_name\":\"go\"}\n",
            "{\"file\":\"/b.py\",\"line\":3,\"condition\":\"a:b, c\"}\n",
        ),
    )
    .unwrap();
    let repo = FileBreakpointRepository::new(&path);

    let first = repo.load().unwrap();
    repo.save(&first).unwrap();
    let second = repo.load().unwrap();
    assert_eq!(first, second);

    let text = std::fs::read_to_string(&path).unwrap();
    repo.save(&second).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
}

#[test]
fn malformed_and_duplicate_entries_degrade_gracefully() {
    let (_dir, path) = setup();
    std::fs::write(
        &path,
        concat!(
            "{\"file\":\"/a.py\",\"line\":1,\"condition\":\"old\"}\n",
            "garbage\n",
            "{\"file\":\"/a.py\",\"line\":1,\"condition\":\"new\"}\n",
            "b /legacy.py:7\n",
        ),
    )
    .unwrap();
    let service = BreakpointService::new(FileBreakpointRepository::new(&path));

    assert_eq!(
        rendered_list(&service),
        vec!["/a.py:1:new", "/legacy.py:7"]
    );

    service.toggle("/z.py", 1).unwrap();
    let rewritten = std::fs::read_to_string(&path).unwrap();
    assert_eq!(rewritten.lines().count(), 3);
    assert!(!rewritten.contains("garbage"));
}

#[test]
fn unreadable_store_aborts_operation() {
    let (dir, _path) = setup();
    // A directory cannot be read as the store file.
    let service = BreakpointService::new(FileBreakpointRepository::new(dir.path()));

    let err = service.toggle("/a.py", 1).unwrap_err();
    assert!(matches!(err, ServiceError::Persist(_)));
    assert!(service.list().is_err());
}
