// src/contents/invert.rs

//! Index inversion
//!
//! Turns the file -> packages table around into package -> files by
//! exploding each entry into one (package, path) association per package and
//! grouping the associations by package.

use super::{FileToPackages, PackageToFiles};

/// Invert a file -> packages table into package -> files
///
/// Every package appearing anywhere in the input appears exactly once as an
/// output key, and the association multiset is preserved exactly: no loss,
/// no duplication. File lists are built in the order paths are encountered,
/// which is the (sorted) iteration order of the input table, so the result
/// is deterministic for a given input.
pub fn invert(files: &FileToPackages) -> PackageToFiles {
    let mut packages = PackageToFiles::new();

    for (path, names) in files {
        for name in names {
            packages
                .entry(name.clone())
                .or_default()
                .push(path.clone());
        }
    }

    packages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FileToPackages {
        let mut files = FileToPackages::new();
        files.insert("bin/ls".to_string(), vec!["admin/coreutils".to_string()]);
        files.insert(
            "usr/share/doc/readme.txt".to_string(),
            vec!["docs/manual".to_string(), "docs/manual-extra".to_string()],
        );
        files.insert(
            "usr/bin/sort".to_string(),
            vec!["admin/coreutils".to_string()],
        );
        files
    }

    #[test]
    fn test_invert_groups_paths_by_package() {
        let packages = invert(&sample());

        assert_eq!(packages.len(), 3);
        assert_eq!(packages["admin/coreutils"], vec!["bin/ls", "usr/bin/sort"]);
        assert_eq!(packages["docs/manual"], vec!["usr/share/doc/readme.txt"]);
        assert_eq!(
            packages["docs/manual-extra"],
            vec!["usr/share/doc/readme.txt"]
        );
    }

    #[test]
    fn test_invert_preserves_association_multiset() {
        let files = sample();
        let packages = invert(&files);

        let mut original: Vec<(String, String)> = files
            .iter()
            .flat_map(|(path, names)| {
                names
                    .iter()
                    .map(|name| (name.clone(), path.clone()))
                    .collect::<Vec<_>>()
            })
            .collect();
        let mut recovered: Vec<(String, String)> = packages
            .iter()
            .flat_map(|(name, paths)| {
                paths
                    .iter()
                    .map(|path| (name.clone(), path.clone()))
                    .collect::<Vec<_>>()
            })
            .collect();

        original.sort();
        recovered.sort();
        assert_eq!(original, recovered);
    }

    #[test]
    fn test_invert_is_deterministic() {
        let files = sample();
        assert_eq!(invert(&files), invert(&files));
    }

    #[test]
    fn test_invert_empty_table() {
        let packages = invert(&FileToPackages::new());
        assert!(packages.is_empty());
    }
}
