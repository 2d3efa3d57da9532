//! Long Literal Fixer: position-addressed repair of lowercase `l` long suffixes
//!
//! Rewrites Java integer literals such as `1000000l` to the canonical
//! `1000000L` at positions reported by an external linter.
//!
//! # Architecture
//!
//! Every fix compiles down to a single primitive: [`LineEdit`], a verified
//! character-range replacement inside one line. Intelligence lives in the
//! [`Locator`] that produces it:
//!
//! - [`CoordinateLocator`] checks the raw text at a reported `line:column`.
//! - [`RangeLocator`] matches the coordinate against literal token spans
//!   parsed with tree-sitter.
//!
//! [`fix_content`] applies a locator over a whole set of positions, and
//! [`BatchCoordinator`] adds loading, structural validation, and the
//! write-only-when-changed gate.
//!
//! # Safety
//!
//! - Edits verify the expected before-text before applying
//! - A stale or mis-reported coordinate is skipped, never forced
//! - Atomic file writes (tempfile + fsync + rename)
//! - Re-running on fixed content is a no-op
//!
//! # Example
//!
//! ```
//! use long_literal_fixer::{fix_content, LineIndexedContent, Locator, ViolationPosition};
//! use std::collections::BTreeSet;
//!
//! let mut content = LineIndexedContent::from_lines(["long y = 42l;"]);
//! let positions: BTreeSet<_> = [ViolationPosition::new(1, 12).unwrap()].into();
//!
//! let report = fix_content(&mut content, &positions, &Locator::coordinate()).unwrap();
//! assert_eq!(report.fixed_count(), 1);
//! assert_eq!(content.line(0), Some("long y = 42L;"));
//! ```

pub mod batch;
pub mod config;
pub mod content;
pub mod locator;
pub mod patch;
pub mod pool;
pub mod position;
pub mod store;
pub mod ts;

// Re-exports
pub use batch::{
    fix_content, BatchCoordinator, FileFix, FixError, FixReport, FixStatus, Strategy,
    ViolationOutcome,
};
pub use config::{
    apply_report, check_report, load_from_path, load_from_str, ConfigError, ViolationReport,
};
pub use content::{LineEnding, LineIndexedContent};
pub use locator::{
    is_lowercase_long_literal, AddressingError, CoordinateLocator, LocateOutcome, Locator,
    RangeLocator, TokenRewrite, UnsupportedReason,
};
pub use patch::{uppercase_suffix, EditError, EditResult, LineEdit, PatchResult};
pub use position::{PositionError, SourceSpan, ViolationPosition};
pub use store::{ContentStore, FileStore};
pub use ts::{extract_literals, LiteralKind, LiteralToken, TreeSitterError};
