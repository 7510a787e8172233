// src/lib.rs

//! Debstat
//!
//! Ranks Debian packages by the number of files they ship, using the
//! per-architecture `Contents` indices published on package mirrors.
//!
//! # Architecture
//!
//! - Directory snapshots: the mirror listing is fetched once, immutable after
//! - Pure core: parsing, inversion and ranking take text in, tables out
//! - Dual tables: path-to-packages and its exploded package-to-paths inverse
//! - Explicit policies: malformed lines and duplicate paths skip or fail,
//!   never silently drop
//!
//! The pipeline is composed by the caller: fetch a [`mirror::Directory`],
//! download and decode the index, then [`contents::build_tables`] and
//! [`contents::rank`]. No I/O happens inside the core.

pub mod contents;
mod error;
pub mod mirror;
pub mod report;

pub use error::{Error, Result};
