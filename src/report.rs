// src/report.rs

//! Ranking presentation and JSON export

use crate::contents::{PackageToFiles, RankingEntry};
use crate::error::Result;
use std::fs;
use std::path::Path;
use tracing::info;

/// Render ranking entries as a left-justified two-column table
///
/// Column one is the package identifier padded to the widest name, column
/// two the file count. One line per entry, highest count first. An empty
/// ranking renders as an empty string.
pub fn format_table(entries: &[RankingEntry]) -> String {
    let width = entries.iter().map(|e| e.package.len()).max().unwrap_or(0);

    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!("{:<width$}  {}\n", entry.package, entry.file_count));
    }

    out
}

/// Serialize the package-to-files table as pretty-printed JSON
///
/// The result is a single object mapping each package identifier to the
/// sorted-insertion list of paths it ships.
pub fn to_json(packages: &PackageToFiles) -> Result<String> {
    Ok(serde_json::to_string_pretty(packages)?)
}

/// Write the package-to-files table as JSON to the given path
pub fn write_json(packages: &PackageToFiles, path: &Path) -> Result<()> {
    fs::write(path, to_json(packages)?)?;
    info!("Exported {} packages to {}", packages.len(), path.display());

    Ok(())
}

/// Serialize ranking entries as pretty-printed JSON
pub fn ranking_to_json(entries: &[RankingEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}
