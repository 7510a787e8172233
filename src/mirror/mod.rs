// src/mirror/mod.rs

//! Mirror directory resolution and Contents index retrieval
//!
//! This module provides functionality for:
//! - Fetching a mirror's directory listing page
//! - Snapshotting the available filenames with their download counts
//! - Listing the architectures that have a `Contents-<arch>.gz` index
//! - Downloading a named index file and decoding it (gunzip + UTF-8)
//!
//! The [`Directory`] snapshot is immutable and explicitly passed around:
//! callers fetch it once and hand it to [`MirrorClient::fetch_and_decode`],
//! which verifies the filename against the snapshot before touching the
//! network. There is no hidden cache to go stale.

use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Default mirror directory holding per-architecture Contents indices
pub const DEFAULT_MIRROR: &str = "http://ftp.uk.debian.org/debian/dists/stable/main";

/// Default timeout for HTTP requests (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Matches plain-file hrefs on the listing page; subdirectory hrefs contain `/`
static RE_HREF: Lazy<Regex> = Lazy::new(|| Regex::new(r#"href="([^"/]+)""#).unwrap());

/// Matches the download count, the rightmost integer on a listing line
static RE_COUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*$").unwrap());

/// Filename of the gzipped Contents index for an architecture
pub fn contents_filename(arch: &str) -> String {
    format!("Contents-{}.gz", arch)
}

/// Debian architecture identifier for the machine running this process
///
/// Maps the compile-time target architecture onto Debian's naming; unknown
/// values pass through lowercased and the mirror check reports the valid set.
pub fn host_architecture() -> String {
    match std::env::consts::ARCH {
        "x86_64" => "amd64".to_string(),
        "aarch64" => "arm64".to_string(),
        "x86" => "i386".to_string(),
        "arm" => "armhf".to_string(),
        "powerpc64" => "ppc64el".to_string(),
        "mips64" => "mips64el".to_string(),
        other => other.to_ascii_lowercase(),
    }
}

/// Immutable snapshot of a mirror's directory listing
///
/// Maps each available filename to its download count. Built once per
/// invocation by [`MirrorClient::fetch_directory`] and passed explicitly to
/// whoever needs it; refreshing means fetching a new snapshot.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    entries: BTreeMap<String, u64>,
}

impl Directory {
    /// Extract filenames and download counts from a directory listing page
    ///
    /// Each line naming a plain file in an `href` attribute contributes one
    /// entry; the download count is the trailing integer on that line, or 0
    /// when the line carries none. Subdirectory and query-string links are
    /// ignored.
    pub fn from_listing(html: &str) -> Self {
        let mut entries = BTreeMap::new();

        for line in html.lines() {
            let filename = match RE_HREF.captures(line) {
                Some(capture) => capture[1].to_string(),
                None => continue,
            };
            // Sort/query links on index pages, not files.
            if filename.starts_with('?') || filename.starts_with('#') {
                continue;
            }

            let count = RE_COUNT
                .captures(line)
                .and_then(|capture| capture[1].parse().ok())
                .unwrap_or(0);

            entries.insert(filename, count);
        }

        Directory { entries }
    }

    /// Whether the named file is present on the mirror
    pub fn contains(&self, filename: &str) -> bool {
        self.entries.contains_key(filename)
    }

    /// Download count for the named file, if present
    pub fn download_count(&self, filename: &str) -> Option<u64> {
        self.entries.get(filename).copied()
    }

    /// All available filenames, sorted
    pub fn filenames(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Architectures with a Contents index on this mirror, sorted
    pub fn architectures(&self) -> Vec<String> {
        self.entries
            .keys()
            .filter_map(|name| architecture_of(name))
            .map(str::to_string)
            .collect()
    }

    /// Number of files in the listing
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the listing is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Extract the architecture from a `Contents-<arch>.gz` filename
///
/// The middle part must be alphanumeric or underscore, so installer variants
/// like `Contents-udeb-amd64.gz` do not count as architectures.
fn architecture_of(filename: &str) -> Option<&str> {
    let arch = filename
        .strip_prefix("Contents-")?
        .strip_suffix(".gz")?;

    if !arch.is_empty() && arch.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Some(arch)
    } else {
        None
    }
}

/// HTTP client bound to one mirror directory URL
pub struct MirrorClient {
    client: Client,
    base_url: String,
}

impl MirrorClient {
    /// Create a client for the given mirror directory URL
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::Download(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the mirror's listing page and snapshot its directory
    pub fn fetch_directory(&self) -> Result<Directory> {
        let url = format!("{}/", self.base_url);
        info!("Fetching mirror directory from {}", url);

        let html = self.get_text(&url)?;
        let directory = Directory::from_listing(&html);
        debug!("Mirror directory lists {} files", directory.len());

        Ok(directory)
    }

    /// Download a named file and return its decoded text
    ///
    /// Fails with [`Error::NotFound`] when the filename is absent from the
    /// directory snapshot, before any network request is made. Files whose
    /// name ends in `.gz` are decompressed transparently; everything is
    /// decoded as UTF-8.
    pub fn fetch_and_decode(&self, directory: &Directory, filename: &str) -> Result<String> {
        if !directory.contains(filename) {
            return Err(Error::NotFound {
                filename: filename.to_string(),
                available: directory.filenames(),
            });
        }

        let url = format!("{}/{}", self.base_url, filename);
        info!("Downloading {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| Error::Download(format!("Failed to download {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "Failed to download {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| Error::Download(format!("Failed to read response: {}", e)))?;

        let text = if filename.ends_with(".gz") {
            let mut gz = GzDecoder::new(bytes.as_ref());
            let mut decompressed = String::new();
            gz.read_to_string(&mut decompressed).map_err(|e| {
                Error::Decode(format!("Failed to decompress {}: {}", filename, e))
            })?;
            decompressed
        } else {
            String::from_utf8(bytes.to_vec())
                .map_err(|e| Error::Decode(format!("{} is not valid UTF-8: {}", filename, e)))?
        };

        debug!("Decoded {}: {} bytes", filename, text.len());
        Ok(text)
    }

    /// Download and decode a file, also saving the decoded text locally
    pub fn fetch_and_decode_to(
        &self,
        directory: &Directory,
        filename: &str,
        path: &Path,
    ) -> Result<String> {
        let text = self.fetch_and_decode(directory, filename)?;
        fs::write(path, &text)?;
        info!("Saved decoded {} to {}", filename, path.display());

        Ok(text)
    }

    /// GET a URL and return the response body as text
    fn get_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::Download(format!("Failed to fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "Failed to fetch {}: HTTP {}",
                url,
                response.status()
            )));
        }

        response
            .text()
            .map_err(|e| Error::Decode(format!("Failed to decode {}: {}", url, e)))
    }
}
