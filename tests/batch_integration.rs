//! End-to-end batch tests against files on disk and a recording store.

use long_literal_fixer::{
    BatchCoordinator, ContentStore, FileStore, FixError, FixStatus, Strategy, ViolationPosition,
};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DEMO: &str = include_str!("../demos/Test.java");

/// In-memory store that records every write.
#[derive(Default)]
struct RecordingStore {
    files: HashMap<PathBuf, String>,
    writes: Vec<PathBuf>,
    fail_writes: bool,
}

impl RecordingStore {
    fn with_file(path: &str, content: &str) -> Self {
        let mut store = Self::default();
        store.files.insert(PathBuf::from(path), content.to_string());
        store
    }
}

impl ContentStore for RecordingStore {
    fn load(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn persist(&mut self, path: &Path, content: &str) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        self.writes.push(path.to_path_buf());
        self.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

fn positions(coords: &[(usize, usize)]) -> BTreeSet<ViolationPosition> {
    coords
        .iter()
        .map(|&(l, c)| ViolationPosition::new(l, c).unwrap())
        .collect()
}

fn demo_workspace() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("Test.java");
    fs::write(&file, DEMO).unwrap();
    (dir, file)
}

#[test]
fn coordinate_fix_on_disk() {
    let (_dir, file) = demo_workspace();
    let mut coordinator = BatchCoordinator::new(FileStore);

    let fix = coordinator
        .fix_file(&file, &positions(&[(6, 50), (13, 25)]), Strategy::Coordinate)
        .unwrap();

    assert_eq!(fix.report.fixed_count(), 2);
    assert!(fix.persisted);

    let updated = fs::read_to_string(&file).unwrap();
    assert!(updated.contains("BAD_STYLE = 1000000L;"));
    assert!(updated.contains("long value1 = 42L;"));
    // unreported literal untouched
    assert!(updated.contains("long value2 = 123l;"));
    assert_eq!(updated.len(), DEMO.len());
}

#[test]
fn range_fix_matches_coordinate_fix() {
    let (_dir, coordinate_file) = demo_workspace();
    let (_dir2, range_file) = demo_workspace();
    let set = positions(&[(6, 50), (13, 25)]);
    let mut coordinator = BatchCoordinator::new(FileStore);

    coordinator
        .fix_file(&coordinate_file, &set, Strategy::Coordinate)
        .unwrap();
    let fix = coordinator
        .fix_file(&range_file, &set, Strategy::Range)
        .unwrap();

    assert_eq!(fix.report.fixed_count(), 2);
    assert_eq!(
        fs::read_to_string(&coordinate_file).unwrap(),
        fs::read_to_string(&range_file).unwrap()
    );
}

#[test]
fn range_rejects_position_inside_token() {
    let mut store = RecordingStore::with_file("Test.java", DEMO);
    let mut coordinator = BatchCoordinator::new(&mut store);

    // one column short of the suffix of `42l`
    let fix = coordinator
        .fix_file(Path::new("Test.java"), &positions(&[(13, 24)]), Strategy::Range)
        .unwrap();

    assert_eq!(fix.report.fixed_count(), 0);
    assert!(!fix.persisted);
    assert!(store.writes.is_empty());
}

#[test]
fn second_run_is_a_no_op() {
    let (_dir, file) = demo_workspace();
    let set = positions(&[(6, 50), (13, 25)]);
    let mut coordinator = BatchCoordinator::new(FileStore);

    coordinator.fix_file(&file, &set, Strategy::Coordinate).unwrap();
    let after_first = fs::read_to_string(&file).unwrap();

    for strategy in [Strategy::Coordinate, Strategy::Range] {
        let fix = coordinator.fix_file(&file, &set, strategy).unwrap();
        assert_eq!(fix.report.fixed_count(), 0);
        assert!(!fix.persisted);
        assert_eq!(fs::read_to_string(&file).unwrap(), after_first);
    }
}

#[test]
fn zero_fixes_never_write() {
    let mut store = RecordingStore::with_file("Test.java", DEMO);
    let mut coordinator = BatchCoordinator::new(&mut store);

    let fix = coordinator
        .fix_file(
            Path::new("Test.java"),
            &positions(&[(500, 1), (6, 1), (6, 999)]),
            Strategy::Coordinate,
        )
        .unwrap();

    assert_eq!(fix.report.fixed_count(), 0);
    assert!(matches!(
        fix.report.outcomes[0].status,
        FixStatus::NoMatch { .. }
    ));
    assert!(store.writes.is_empty());
    assert_eq!(store.files[Path::new("Test.java")], DEMO);
}

#[test]
fn one_fix_writes_once() {
    let mut store = RecordingStore::with_file("Test.java", DEMO);
    let mut coordinator = BatchCoordinator::new(&mut store);

    coordinator
        .fix_file(
            Path::new("Test.java"),
            &positions(&[(6, 50), (500, 1)]),
            Strategy::Coordinate,
        )
        .unwrap();

    assert_eq!(store.writes, vec![PathBuf::from("Test.java")]);
}

#[test]
fn preview_never_writes() {
    let mut store = RecordingStore::with_file("Test.java", DEMO);
    let coordinator = BatchCoordinator::new(&mut store);

    let fix = coordinator
        .preview_file(Path::new("Test.java"), &positions(&[(6, 50)]), Strategy::Range)
        .unwrap();

    assert_eq!(fix.report.fixed_count(), 1);
    assert!(fix.updated.contains("1000000L"));
    assert!(!fix.persisted);
    assert!(store.writes.is_empty());
}

#[test]
fn empty_position_set_fails_fast() {
    let mut coordinator = BatchCoordinator::new(RecordingStore::with_file("Test.java", DEMO));
    let err = coordinator
        .fix_file(Path::new("Test.java"), &BTreeSet::new(), Strategy::Coordinate)
        .unwrap_err();
    assert!(matches!(err, FixError::EmptyViolationSet));
}

#[test]
fn missing_file_is_reported() {
    let mut coordinator = BatchCoordinator::new(RecordingStore::default());
    let err = coordinator
        .fix_file(Path::new("Nope.java"), &positions(&[(1, 1)]), Strategy::Coordinate)
        .unwrap_err();
    assert!(matches!(err, FixError::MissingTarget(p) if p == Path::new("Nope.java")));
}

#[test]
fn persistence_failure_propagates() {
    let mut store = RecordingStore::with_file("Test.java", DEMO);
    store.fail_writes = true;
    let mut coordinator = BatchCoordinator::new(store);

    let err = coordinator
        .fix_file(Path::new("Test.java"), &positions(&[(6, 50)]), Strategy::Coordinate)
        .unwrap_err();
    assert!(matches!(err, FixError::Persist { .. }));
    assert_eq!(
        coordinator.store().files[Path::new("Test.java")],
        DEMO,
        "failed write must leave content as it was"
    );
}

#[test]
fn crlf_files_keep_their_line_endings() {
    let crlf = DEMO.replace('\n', "\r\n");
    let mut store = RecordingStore::with_file("Test.java", &crlf);
    let mut coordinator = BatchCoordinator::new(&mut store);

    coordinator
        .fix_file(
            Path::new("Test.java"),
            &positions(&[(6, 50), (13, 25)]),
            Strategy::Range,
        )
        .unwrap();

    let expected = crlf
        .replace("1000000l;", "1000000L;")
        .replace("42l;", "42L;");
    assert_eq!(store.files[Path::new("Test.java")], expected);
}
