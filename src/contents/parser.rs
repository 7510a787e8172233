// src/contents/parser.rs

//! Contents-index line parser
//!
//! A Contents index holds one record per line: a file path, a run of
//! whitespace, and a comma-separated list of the packages providing that
//! path. Paths may themselves contain spaces, so the **last** whitespace
//! delimited token is taken as the package field and everything before it is
//! rejoined to rebuild the path.

use super::{
    DuplicatePathPolicy, FileToPackages, MalformedLinePolicy, ParseOptions, ParseOutcome,
    SkippedLine,
};
use crate::error::{Error, Result};
use tracing::debug;

/// Parse the decoded text of a Contents index into a file -> packages table
///
/// Empty and whitespace-only lines are discarded. A line that cannot be
/// split into a path and a non-empty package field is handled according to
/// `options.malformed`; a path that repeats across lines is handled
/// according to `options.duplicates`. No I/O happens here: the input is the
/// whole decoded text and the output is an in-memory table plus the list of
/// lines the skip policy excluded.
pub fn parse(text: &str, options: ParseOptions) -> Result<ParseOutcome> {
    let mut files = FileToPackages::new();
    let mut skipped = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let number = index + 1;

        let (path, packages) = match parse_line(line, options.strip_sections) {
            Some(entry) => entry,
            None => match options.malformed {
                MalformedLinePolicy::Skip => {
                    skipped.push(SkippedLine {
                        number,
                        text: line.to_string(),
                    });
                    continue;
                }
                MalformedLinePolicy::Fail => {
                    return Err(Error::MalformedLine {
                        number,
                        line: line.to_string(),
                    });
                }
            },
        };

        if options.duplicates == DuplicatePathPolicy::Fail && files.contains_key(&path) {
            return Err(Error::DuplicatePath(path));
        }

        // Last write wins on duplicate paths.
        files.insert(path, packages);
    }

    debug!(
        "Parsed {} paths ({} lines skipped)",
        files.len(),
        skipped.len()
    );

    Ok(ParseOutcome { files, skipped })
}

/// Split one Contents line into its path and package list
///
/// The last whitespace-delimited token is the package field; all earlier
/// tokens are rejoined with single spaces to reconstruct the path. Package
/// tokens are kept verbatim (section prefix included) unless
/// `strip_sections` is set, which removes everything up to and including the
/// first `/`. Repeated package tokens keep their first occurrence only.
///
/// Returns `None` when no path/package split exists or the package field
/// contains no package names.
fn parse_line(line: &str, strip_sections: bool) -> Option<(String, Vec<String>)> {
    let tokens: Vec<&str> = line.split_ascii_whitespace().collect();
    let (field, path_tokens) = tokens.split_last()?;
    if path_tokens.is_empty() {
        return None;
    }
    let path = path_tokens.join(" ");

    let mut packages: Vec<String> = Vec::new();
    for token in field.split(',') {
        let name = if strip_sections {
            match token.split_once('/') {
                Some((_, rest)) => rest,
                None => token,
            }
        } else {
            token
        };
        if name.is_empty() {
            continue;
        }
        if !packages.iter().any(|p| p == name) {
            packages.push(name.to_string());
        }
    }
    if packages.is_empty() {
        return None;
    }

    Some((path, packages))
}
