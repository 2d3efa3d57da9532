//! Batch application of violation fixes.
//!
//! [`fix_content`] runs a [`Locator`] and the edit primitive over every
//! reported position of one in-memory file. [`BatchCoordinator`] wraps that
//! with loading, structural validation, and the at-least-one-change gate that
//! decides whether the file is written back.

use crate::content::LineIndexedContent;
use crate::locator::{AddressingError, LocateOutcome, Locator, UnsupportedReason};
use crate::patch::EditResult;
use crate::position::ViolationPosition;
use crate::store::ContentStore;
use crate::ts::{extract_literals, validate_structure, TreeSitterError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Which locator a file-level run uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Inspect the text at each raw coordinate
    #[default]
    Coordinate,
    /// Match coordinates against parsed literal token spans
    Range,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Coordinate => write!(f, "coordinate"),
            Strategy::Range => write!(f, "range"),
        }
    }
}

#[derive(Error, Debug)]
pub enum FixError {
    #[error("violation positions cannot be empty")]
    EmptyViolationSet,

    #[error("file not found: {0}")]
    MissingTarget(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write fixes to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("token stream unavailable for {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: TreeSitterError,
    },

    #[error("rewrite of {path} rejected: {source}")]
    Structure {
        path: PathBuf,
        #[source]
        source: TreeSitterError,
    },
}

/// What happened to one reported position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixStatus {
    Fixed,
    OutOfBounds(AddressingError),
    NoMatch { found: Option<char> },
    Unsupported(UnsupportedReason),
}

impl fmt::Display for FixStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixStatus::Fixed => write!(f, "fixed"),
            FixStatus::OutOfBounds(e) => write!(f, "out of bounds ({e})"),
            FixStatus::NoMatch { found: Some(c) } => write!(f, "no match (found {c:?})"),
            FixStatus::NoMatch { found: None } => write!(f, "no match"),
            FixStatus::Unsupported(reason) => write!(f, "unsupported ({reason})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationOutcome {
    pub position: ViolationPosition,
    pub status: FixStatus,
}

/// Per-position outcomes of one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixReport {
    pub outcomes: Vec<ViolationOutcome>,
}

impl FixReport {
    pub fn fixed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == FixStatus::Fixed)
            .count()
    }

    /// Whether at least one fix was applied.
    pub fn changed(&self) -> bool {
        self.fixed_count() > 0
    }

    pub fn skipped(&self) -> impl Iterator<Item = &ViolationOutcome> {
        self.outcomes.iter().filter(|o| o.status != FixStatus::Fixed)
    }
}

/// Apply every position in `positions` to `content` using `locator`.
///
/// Per-position problems never abort the batch: they are recorded in the
/// report and processing continues. A report with zero fixes is a normal
/// outcome. Only an empty position set is an error.
pub fn fix_content(
    content: &mut LineIndexedContent,
    positions: &BTreeSet<ViolationPosition>,
    locator: &Locator<'_>,
) -> Result<FixReport, FixError> {
    if positions.is_empty() {
        return Err(FixError::EmptyViolationSet);
    }

    let mut report = FixReport::default();
    for &position in positions {
        let status = fix_position(content, position, locator);
        report.outcomes.push(ViolationOutcome { position, status });
    }

    let fixed = report.fixed_count();
    if fixed > 0 {
        info!(fixed, total = positions.len(), "fixed lowercase long suffixes");
    } else {
        info!(total = positions.len(), "no violations fixed at specified positions");
    }

    Ok(report)
}

fn fix_position(
    content: &mut LineIndexedContent,
    position: ViolationPosition,
    locator: &Locator<'_>,
) -> FixStatus {
    let edit = match locator.locate(content, position) {
        LocateOutcome::Valid(edit) => edit,
        LocateOutcome::OutOfBounds(e) => {
            warn!(%position, locator = locator.name(), "skipping violation: {e}");
            return FixStatus::OutOfBounds(e);
        }
        LocateOutcome::NoMatch { found } => {
            debug!(%position, ?found, locator = locator.name(), "no lowercase suffix at position");
            return FixStatus::NoMatch { found };
        }
        LocateOutcome::Unsupported(reason) => {
            warn!(%position, locator = locator.name(), "skipping violation: {reason}");
            return FixStatus::Unsupported(reason);
        }
    };

    match edit.apply(content) {
        Ok(EditResult::Applied { .. }) => {
            info!(%position, locator = locator.name(), "fixed lowercase 'l'");
            FixStatus::Fixed
        }
        Ok(EditResult::AlreadyApplied { .. }) => {
            debug!(%position, "suffix already uppercase");
            FixStatus::NoMatch { found: None }
        }
        Err(e) => {
            // Token text no longer matches the content it was parsed from
            warn!(%position, locator = locator.name(), "stale target: {e}");
            FixStatus::NoMatch { found: None }
        }
    }
}

/// Outcome of running a batch against one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFix {
    pub path: PathBuf,
    pub strategy: Strategy,
    pub report: FixReport,
    pub original: String,
    pub updated: String,
    /// Whether the updated content was written back
    pub persisted: bool,
}

/// Loads a file, fixes the reported positions, and writes the result back
/// only when something changed.
pub struct BatchCoordinator<S> {
    store: S,
}

impl<S: ContentStore> BatchCoordinator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run the batch without writing anything (dry run).
    pub fn preview_file(
        &self,
        path: &Path,
        positions: &BTreeSet<ViolationPosition>,
        strategy: Strategy,
    ) -> Result<FileFix, FixError> {
        if positions.is_empty() {
            return Err(FixError::EmptyViolationSet);
        }

        let original = self.store.load(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                FixError::MissingTarget(path.to_path_buf())
            } else {
                FixError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let mut content = LineIndexedContent::parse(&original);
        let report = match strategy {
            Strategy::Coordinate => fix_content(&mut content, positions, &Locator::coordinate())?,
            Strategy::Range => {
                let tokens = extract_literals(&original).map_err(|source| FixError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
                debug!(path = %path.display(), tokens = tokens.len(), "extracted literal tokens");
                fix_content(&mut content, positions, &Locator::range(&tokens))?
            }
        };

        let updated = content.render();
        if strategy == Strategy::Range && report.changed() {
            validate_structure(&original, &updated).map_err(|source| FixError::Structure {
                path: path.to_path_buf(),
                source,
            })?;
        }

        Ok(FileFix {
            path: path.to_path_buf(),
            strategy,
            report,
            original,
            updated,
            persisted: false,
        })
    }

    /// Fix the reported positions and persist iff at least one fix applied.
    pub fn fix_file(
        &mut self,
        path: &Path,
        positions: &BTreeSet<ViolationPosition>,
        strategy: Strategy,
    ) -> Result<FileFix, FixError> {
        let mut fix = self.preview_file(path, positions, strategy)?;

        if !fix.report.changed() {
            info!(path = %path.display(), "no violations fixed; file left untouched");
            return Ok(fix);
        }

        self.store
            .persist(path, &fix.updated)
            .map_err(|source| FixError::Persist {
                path: path.to_path_buf(),
                source,
            })?;
        fix.persisted = true;
        info!(
            path = %path.display(),
            fixed = fix.report.fixed_count(),
            "file updated with fixes at specified positions"
        );

        Ok(fix)
    }
}
