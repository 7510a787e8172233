// src/contents/mod.rs

//! Contents-index tables
//!
//! This module turns the decoded text of a Debian `Contents` index into two
//! complementary lookup tables:
//! - file path -> packages providing it (the index's own direction)
//! - package -> file paths it provides (the inversion)
//!
//! and derives a descending ranking of packages by file count. Everything
//! here is a pure in-memory transformation; retrieval lives in [`crate::mirror`].

pub mod invert;
pub mod parser;
pub mod rank;

pub use invert::invert;
pub use parser::parse;
pub use rank::rank;

use crate::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;

/// Mapping of file path to the packages that provide it.
///
/// Keyed by the full path; the package list preserves source order with
/// within-line duplicates removed. BTreeMap keeps iteration deterministic.
pub type FileToPackages = BTreeMap<String, Vec<String>>;

/// Mapping of package to the file paths it provides.
///
/// Derived from [`FileToPackages`] by exploding each entry into one
/// (package, path) association per package and grouping by package.
pub type PackageToFiles = BTreeMap<String, Vec<String>>;

/// One row of the package ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    /// Package identifier, section prefix included unless stripped at parse time
    pub package: String,
    /// Number of file paths the package provides
    pub file_count: usize,
}

/// A line excluded from the tables under the skip policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the decoded input
    pub number: usize,
    /// The offending line, verbatim
    pub text: String,
}

/// What to do with a line that cannot be split into path and package fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedLinePolicy {
    /// Exclude the line and report it in [`ParseOutcome::skipped`]
    #[default]
    Skip,
    /// Fail the whole parse with [`crate::Error::MalformedLine`]
    Fail,
}

/// What to do when the same path appears on more than one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePathPolicy {
    /// Later lines replace earlier entries
    #[default]
    LastWins,
    /// Fail the whole parse with [`crate::Error::DuplicatePath`]
    Fail,
}

/// Parser configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub malformed: MalformedLinePolicy,
    pub duplicates: DuplicatePathPolicy,
    /// Strip `section/` prefixes from package identifiers
    pub strip_sections: bool,
}

/// Result of one parse call: the table plus everything that was excluded
///
/// Skipped lines ride along explicitly so callers can decide whether to warn
/// or abort; the parser never swallows data loss silently.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub files: FileToPackages,
    pub skipped: Vec<SkippedLine>,
}

/// Both tables built from one decoded Contents index
#[derive(Debug, Clone, Default)]
pub struct ContentsTables {
    pub files: FileToPackages,
    pub packages: PackageToFiles,
    pub skipped: Vec<SkippedLine>,
}

/// Parse the decoded text of a Contents index and invert the result
///
/// This is the parse-then-invert pipeline in one call. The skipped-line
/// report from the parser is carried through unchanged.
pub fn build_tables(text: &str, options: ParseOptions) -> Result<ContentsTables> {
    let outcome = parse(text, options)?;
    let packages = invert(&outcome.files);

    Ok(ContentsTables {
        files: outcome.files,
        packages,
        skipped: outcome.skipped,
    })
}
