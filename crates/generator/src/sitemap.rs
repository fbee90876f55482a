//! Sitemap module patcher.
//!
//! The consuming site builds its XML sitemap from a `sitemap_entries()`
//! function in a plain Rust source file. New pages are appended as one
//! struct literal per line just before the closing bracket; lines already
//! present are never rewritten, so the original `last_modified` date of an
//! existing URL is stable across reruns.

use crate::emitter::write_atomic;
use chrono::NaiveDate;
use landing_kit_core::{Error, Result, SitemapEntry};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const ENTRIES_ANCHOR: &str = "fn sitemap_entries";
const VEC_OPEN: &str = "vec![";

const SITEMAP_SCAFFOLD: &str = r#"// Generated by landing-kit. Sitemap records for the generated landing pages.
// Lines added by hand are preserved on regeneration.

/// One record per page exposed through the XML sitemap.
pub struct SitemapEntry {
    pub url: &'static str,
    pub last_modified: &'static str,
    pub change_frequency: &'static str,
    pub priority: f32,
}

pub fn sitemap_entries() -> Vec<SitemapEntry> {
    vec![
    ]
}
"#;

/// Result of one sitemap patch.
#[derive(Debug, Clone)]
pub struct SitemapPatch {
    pub path: PathBuf,
    pub added: usize,
    pub total: usize,
    pub changed: bool,
}

/// Write a fresh sitemap module with an empty entry list.
pub fn seed_sitemap(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, SITEMAP_SCAFFOLD)?;
    Ok(())
}

/// URLs currently recorded in the sitemap module, in file order.
pub fn read_sitemap_urls(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let (start, end) = entries_span(&content, path)?;
    Ok(content[start..end]
        .lines()
        .filter_map(line_url)
        .map(|url| url.to_string())
        .collect())
}

/// Append entries for any of `urls` not yet present, dated `today`.
/// Existing lines keep their bytes, so a URL's original date survives.
pub fn patch_sitemap(path: &Path, urls: &[String], today: NaiveDate) -> Result<SitemapPatch> {
    let content = fs::read_to_string(path)?;
    let (start, end) = entries_span(&content, path)?;
    let span = &content[start..end];

    let mut known: HashSet<&str> = span.lines().filter_map(line_url).collect();
    let existing_count = known.len();

    let mut block = String::new();
    let mut added = 0;
    for url in urls {
        if known.insert(url.as_str()) {
            let entry = SitemapEntry::page(url.clone(), today);
            block.push_str(&entry.to_source_line());
            block.push('\n');
            added += 1;
        }
    }

    if added == 0 {
        return Ok(SitemapPatch {
            path: path.to_path_buf(),
            added: 0,
            total: existing_count,
            changed: false,
        });
    }

    let mut rebuilt = String::with_capacity(content.len() + block.len());
    match span.rfind('\n') {
        Some(rel) => {
            // Insert before the line holding the closing bracket.
            let insert_at = start + rel + 1;
            rebuilt.push_str(&content[..insert_at]);
            rebuilt.push_str(&block);
            rebuilt.push_str(&content[insert_at..]);
        }
        None => {
            // Single-line `vec![]`; break it open.
            rebuilt.push_str(&content[..start]);
            rebuilt.push('\n');
            rebuilt.push_str(&block);
            rebuilt.push_str("    ");
            rebuilt.push_str(&content[end..]);
        }
    }

    write_atomic(path, &rebuilt)?;

    Ok(SitemapPatch {
        path: path.to_path_buf(),
        added,
        total: existing_count + added,
        changed: true,
    })
}

/// Byte range of the vec contents, exclusive of `vec![` and `]`.
fn entries_span(content: &str, path: &Path) -> Result<(usize, usize)> {
    let anchor = content
        .find(ENTRIES_ANCHOR)
        .ok_or_else(|| missing_anchor(path, ENTRIES_ANCHOR))?;
    let open = content[anchor..]
        .find(VEC_OPEN)
        .map(|rel| anchor + rel + VEC_OPEN.len())
        .ok_or_else(|| missing_anchor(path, VEC_OPEN))?;
    let close = content[open..]
        .find(']')
        .map(|rel| open + rel)
        .ok_or_else(|| missing_anchor(path, "]"))?;
    Ok((open, close))
}

fn missing_anchor(path: &Path, pattern: &str) -> Error {
    Error::MissingAnchor {
        path: path.to_path_buf(),
        pattern: pattern.to_string(),
    }
}

/// Extract the url literal from one entry line, if any.
fn line_url(line: &str) -> Option<&str> {
    let rest = &line[line.find("url:")? + 4..];
    let rest = &rest[rest.find('"')? + 1..];
    Some(&rest[..rest.find('"')?])
}
