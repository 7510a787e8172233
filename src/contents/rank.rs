// src/contents/rank.rs

//! Package ranking by file count

use super::{PackageToFiles, RankingEntry};

/// Rank packages by the number of files they provide, largest first
///
/// Ties are broken by ascending package name so the output is a total order
/// independent of table iteration details. `top == 0` returns an empty
/// vector; a `top` larger than the number of known packages returns them
/// all, which is shorter than requested but not an error.
pub fn rank(packages: &PackageToFiles, top: usize) -> Vec<RankingEntry> {
    if top == 0 {
        return Vec::new();
    }

    let mut entries: Vec<RankingEntry> = packages
        .iter()
        .map(|(package, files)| RankingEntry {
            package: package.clone(),
            file_count: files.len(),
        })
        .collect();

    entries.sort_by(|a, b| {
        b.file_count
            .cmp(&a.file_count)
            .then_with(|| a.package.cmp(&b.package))
    });
    entries.truncate(top);

    entries
}
