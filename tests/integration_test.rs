// tests/integration_test.rs

//! Integration tests for debstat
//!
//! These tests verify end-to-end functionality across modules.

use debstat::Error;
use debstat::contents::{self, DuplicatePathPolicy, MalformedLinePolicy, ParseOptions};
use debstat::mirror::{Directory, MirrorClient, contents_filename};
use debstat::report;

/// A small Contents index covering the interesting cases: shared paths,
/// a duplicate path, an embedded-space path, sections, a malformed line.
const SAMPLE_INDEX: &str = r"bin/ls                                          utils/coreutils
bin/ls                                          shell/alt-ls
bin/sort                                        utils/coreutils
bin/bash                                        shells/bash
usr/bin/gcc-12                                  devel/gcc-12
usr/lib/gcc/x86_64-linux-gnu/12/cc1             devel/gcc-12
usr/share/doc/gcc-12/README                     devel/gcc-12
usr/local/my program                            tools/runner
orphan-line-without-package-field
usr/share/man/man1/ls.1.gz                      utils/coreutils,manpages/man-db
";

const LISTING: &str = r#"<html><body><pre><a href="../">../</a>
<a href="Contents-amd64.gz">Contents-amd64.gz</a>      14-Jun-2025 09:21     12578343
<a href="Contents-arm64.gz">Contents-arm64.gz</a>      14-Jun-2025 09:21     12099371
<a href="Contents-udeb-amd64.gz">Contents-udeb-amd64.gz</a>  14-Jun-2025 09:21   36699
<a href="binary-amd64/">binary-amd64/</a>              14-Jun-2025 09:18        -
<a href="Release">Release</a>                          14-Jun-2025 09:18      982
</pre></body></html>
"#;

#[test]
fn test_pipeline_builds_both_tables() {
    let tables = contents::build_tables(SAMPLE_INDEX, ParseOptions::default()).unwrap();

    // Ten lines: the malformed one is skipped and the duplicate bin/ls
    // collapses, leaving eight paths.
    assert_eq!(tables.files.len(), 8);
    assert_eq!(tables.packages.len(), 6);

    // Last write wins for the duplicated path.
    assert_eq!(tables.files["bin/ls"], vec!["shell/alt-ls"]);

    // The shared man page belongs to both of its packages.
    assert_eq!(
        tables.files["usr/share/man/man1/ls.1.gz"],
        vec!["utils/coreutils", "manpages/man-db"]
    );

    // Inverted view groups paths under each package.
    assert_eq!(
        tables.packages["devel/gcc-12"],
        vec![
            "usr/bin/gcc-12",
            "usr/lib/gcc/x86_64-linux-gnu/12/cc1",
            "usr/share/doc/gcc-12/README",
        ]
    );
    assert_eq!(
        tables.packages["utils/coreutils"],
        vec!["bin/sort", "usr/share/man/man1/ls.1.gz"]
    );
}

#[test]
fn test_path_with_spaces_survives_the_pipeline() {
    let tables = contents::build_tables(SAMPLE_INDEX, ParseOptions::default()).unwrap();

    assert!(tables.files.contains_key("usr/local/my program"));
    assert_eq!(tables.packages["tools/runner"], vec!["usr/local/my program"]);
}

#[test]
fn test_skipped_lines_are_reported() {
    let tables = contents::build_tables(SAMPLE_INDEX, ParseOptions::default()).unwrap();

    assert_eq!(tables.skipped.len(), 1);
    assert_eq!(tables.skipped[0].number, 9);
    assert!(tables.skipped[0].text.contains("orphan-line"));
}

#[test]
fn test_strict_mode_fails_on_malformed_line() {
    let options = ParseOptions {
        malformed: MalformedLinePolicy::Fail,
        ..ParseOptions::default()
    };

    let err = contents::build_tables(SAMPLE_INDEX, options).unwrap_err();
    match err {
        Error::MalformedLine { number, .. } => assert_eq!(number, 9),
        other => panic!("expected MalformedLine, got: {other}"),
    }
}

#[test]
fn test_duplicate_path_policy_fail() {
    let options = ParseOptions {
        duplicates: DuplicatePathPolicy::Fail,
        ..ParseOptions::default()
    };

    let err = contents::build_tables(SAMPLE_INDEX, options).unwrap_err();
    assert!(matches!(err, Error::DuplicatePath(path) if path == "bin/ls"));
}

#[test]
fn test_strip_sections_changes_package_identifiers() {
    let options = ParseOptions {
        strip_sections: true,
        ..ParseOptions::default()
    };

    let tables = contents::build_tables(SAMPLE_INDEX, options).unwrap();

    assert!(tables.packages.contains_key("gcc-12"));
    assert!(tables.packages.contains_key("coreutils"));
    assert!(!tables.packages.contains_key("devel/gcc-12"));
}

#[test]
fn test_ranking_order_and_truncation() {
    let tables = contents::build_tables(SAMPLE_INDEX, ParseOptions::default()).unwrap();
    let ranking = contents::rank(&tables.packages, 3);

    assert_eq!(ranking.len(), 3);
    assert_eq!(ranking[0].package, "devel/gcc-12");
    assert_eq!(ranking[0].file_count, 3);
    assert_eq!(ranking[1].package, "utils/coreutils");
    assert_eq!(ranking[1].file_count, 2);
    // Four packages tie at one file; the lexicographically first wins.
    assert_eq!(ranking[2].package, "manpages/man-db");
}

#[test]
fn test_ranking_is_deterministic() {
    let first = contents::build_tables(SAMPLE_INDEX, ParseOptions::default()).unwrap();
    let second = contents::build_tables(SAMPLE_INDEX, ParseOptions::default()).unwrap();

    assert_eq!(
        contents::rank(&first.packages, 10),
        contents::rank(&second.packages, 10)
    );
}

#[test]
fn test_every_association_survives_inversion() {
    let tables = contents::build_tables(SAMPLE_INDEX, ParseOptions::default()).unwrap();

    let mut from_files: Vec<(String, String)> = tables
        .files
        .iter()
        .flat_map(|(path, packages)| {
            packages
                .iter()
                .map(|package| (package.clone(), path.clone()))
                .collect::<Vec<_>>()
        })
        .collect();
    from_files.sort();

    let mut from_packages: Vec<(String, String)> = tables
        .packages
        .iter()
        .flat_map(|(package, paths)| {
            paths
                .iter()
                .map(|path| (package.clone(), path.clone()))
                .collect::<Vec<_>>()
        })
        .collect();
    from_packages.sort();

    assert_eq!(from_files, from_packages);
}

#[test]
fn test_json_export_writes_readable_file() {
    let tables = contents::build_tables(SAMPLE_INDEX, ParseOptions::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("packages.json");
    report::write_json(&tables.packages, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["devel/gcc-12"].as_array().unwrap().len(), 3);
    assert_eq!(value["tools/runner"][0], "usr/local/my program");
}

#[test]
fn test_ranking_json_export() {
    let tables = contents::build_tables(SAMPLE_INDEX, ParseOptions::default()).unwrap();
    let ranking = contents::rank(&tables.packages, 2);

    let json = report::ranking_to_json(&ranking).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value[0]["package"], "devel/gcc-12");
    assert_eq!(value[0]["file_count"], 3);
    assert_eq!(value[1]["package"], "utils/coreutils");
}

#[test]
fn test_directory_snapshot_lists_architectures() {
    let directory = Directory::from_listing(LISTING);

    assert_eq!(directory.architectures(), vec!["amd64", "arm64"]);
    assert!(directory.contains(&contents_filename("amd64")));
    assert!(!directory.contains(&contents_filename("s390x")));
}

#[test]
fn test_missing_index_fails_before_any_download() {
    // Unroutable base URL: the directory check must short circuit first.
    let client = MirrorClient::new("http://127.0.0.1:1").unwrap();
    let directory = Directory::from_listing(LISTING);

    let err = client
        .fetch_and_decode(&directory, &contents_filename("s390x"))
        .unwrap_err();

    match err {
        Error::NotFound { filename, available } => {
            assert_eq!(filename, "Contents-s390x.gz");
            assert!(available.contains(&"Contents-amd64.gz".to_string()));
        }
        other => panic!("expected NotFound, got: {other}"),
    }
}

#[test]
fn test_gzipped_index_decodes_end_to_end() {
    use flate2::Compression;
    use flate2::read::GzDecoder;
    use flate2::write::GzEncoder;
    use std::io::{Read, Write};

    // Compress the sample and decode it the way the client does.
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(SAMPLE_INDEX.as_bytes()).unwrap();
    let compressed = encoder.finish().unwrap();

    let mut decoder = GzDecoder::new(compressed.as_slice());
    let mut text = String::new();
    decoder.read_to_string(&mut text).unwrap();

    let tables = contents::build_tables(&text, ParseOptions::default()).unwrap();
    assert_eq!(tables.files.len(), 8);
}
