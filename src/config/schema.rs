use crate::batch::Strategy;
use crate::position::{PositionError, ViolationPosition};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

/// A violation report: which positions of which files to fix.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ViolationReport {
    #[serde(default)]
    pub meta: Metadata,
    #[serde(default)]
    pub violations: Vec<ViolationEntry>,
}

impl ViolationReport {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.violations.is_empty() {
            issues.push(ValidationIssue::EmptyViolationList);
        }

        for (index, entry) in self.violations.iter().enumerate() {
            if entry.file.trim().is_empty() {
                issues.push(ValidationIssue::MissingFile { index });
            }
            if let Err(source) = entry.position() {
                issues.push(ValidationIssue::InvalidPosition {
                    index,
                    file: entry.file.clone(),
                    source,
                });
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Positions grouped per target file, duplicates collapsed.
    ///
    /// Relative paths are resolved against `workspace` when the report is
    /// marked `workspace_relative`. Entries with invalid positions are
    /// skipped; [`validate`](Self::validate) reports them.
    pub fn grouped(&self, workspace: &Path) -> BTreeMap<PathBuf, BTreeSet<ViolationPosition>> {
        let mut groups: BTreeMap<PathBuf, BTreeSet<ViolationPosition>> = BTreeMap::new();
        for entry in &self.violations {
            let Ok(position) = entry.position() else {
                continue;
            };
            let path = if self.meta.workspace_relative {
                workspace.join(&entry.file)
            } else {
                PathBuf::from(&entry.file)
            };
            groups.entry(path).or_default().insert(position);
        }
        groups
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub workspace_relative: bool,
}

/// One reported violation, 1-based `line:column`.
#[derive(Debug, Deserialize, Clone)]
pub struct ViolationEntry {
    pub file: String,
    pub line: usize,
    pub column: usize,
}

impl ViolationEntry {
    pub fn position(&self) -> Result<ViolationPosition, PositionError> {
        ViolationPosition::new(self.line, self.column)
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone)]
pub enum ValidationIssue {
    EmptyViolationList,
    MissingFile {
        index: usize,
    },
    InvalidPosition {
        index: usize,
        file: String,
        source: PositionError,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyViolationList => write!(f, "report contains no violations"),
            ValidationIssue::MissingFile { index } => {
                write!(f, "violation #{index} missing required field 'file'")
            }
            ValidationIssue::InvalidPosition {
                index,
                file,
                source,
            } => write!(f, "violation #{index} in '{file}' has invalid position: {source}"),
        }
    }
}
