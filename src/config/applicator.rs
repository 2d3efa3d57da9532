//! Report applicator - runs the batch coordinator for every file in a report
//!
//! Files are processed independently: one file failing (missing, unreadable,
//! unparsable) never stops the others.

use crate::batch::{BatchCoordinator, FileFix, FixError};
use crate::config::schema::ViolationReport;
use crate::position::ViolationPosition;
use crate::store::ContentStore;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Apply a violation report, writing back every file that changed.
pub fn apply_report<S: ContentStore>(
    report: &ViolationReport,
    workspace_root: &Path,
    coordinator: &mut BatchCoordinator<S>,
) -> Vec<(PathBuf, Result<FileFix, FixError>)> {
    run_report(report, workspace_root, |path, positions| {
        coordinator.fix_file(path, positions, report.meta.strategy)
    })
}

/// Same as [`apply_report`] without writing anything.
pub fn check_report<S: ContentStore>(
    report: &ViolationReport,
    workspace_root: &Path,
    coordinator: &BatchCoordinator<S>,
) -> Vec<(PathBuf, Result<FileFix, FixError>)> {
    run_report(report, workspace_root, |path, positions| {
        coordinator.preview_file(path, positions, report.meta.strategy)
    })
}

fn run_report<F>(
    report: &ViolationReport,
    workspace_root: &Path,
    mut run: F,
) -> Vec<(PathBuf, Result<FileFix, FixError>)>
where
    F: FnMut(&Path, &BTreeSet<ViolationPosition>) -> Result<FileFix, FixError>,
{
    report
        .grouped(workspace_root)
        .into_iter()
        .map(|(path, positions)| {
            let result = run(&path, &positions);
            if let Err(e) = &result {
                warn!(path = %path.display(), "failed to fix file: {e}");
            }
            (path, result)
        })
        .collect()
}
