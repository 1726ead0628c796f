//! Loading the search store a static site generator writes out.
//!
//! Generators emit either a plain JSON array or a small script such as
//! `var store = [{ "title": ..., "url": ... }, ...]`. Both are accepted.

use crate::error::{Error, Result};
use crate::DocumentRecord;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;

lazy_static! {
    static ref ASSIGNMENT: Regex =
        Regex::new(r"^(?:(?:var|let|const)\s+)?[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*\s*=\s*").expect("valid regex");
}

/// Parse store contents into raw records, in file order.
pub fn parse_store(source: &str) -> Result<Vec<DocumentRecord>> {
    let trimmed = source.trim_start_matches('\u{feff}').trim();
    let body = match ASSIGNMENT.find(trimmed) {
        Some(m) => trimmed[m.end()..].trim_end().trim_end_matches(';').trim_end(),
        None => trimmed,
    };
    if !body.starts_with('[') {
        return Err(Error::Parse("expected a JSON array of documents".into()));
    }
    let records: Vec<DocumentRecord> = serde_json::from_str(body)?;
    tracing::debug!(records = records.len(), "parsed search store");
    Ok(records)
}

pub fn load_store<P: AsRef<Path>>(path: P) -> Result<Vec<DocumentRecord>> {
    let source = fs::read_to_string(path.as_ref())?;
    parse_store(&source)
}
