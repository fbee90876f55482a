//! Route slug registry patcher.
//!
//! The consuming site keeps its landing page routes in a plain Rust source
//! file exposing a `SEO_SLUGS` array. Patching is textual: locate the array
//! through anchors, union the new slugs into whatever is already there and
//! rewrite only the span between the brackets. Everything outside the
//! brackets, including hand-written entries inside them, survives.

use crate::emitter::write_atomic;
use landing_kit_core::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const SLUGS_ANCHOR: &str = "pub const SEO_SLUGS";
const ARRAY_OPEN: &str = "&[";

const REGISTRY_SCAFFOLD: &str = r#"// Generated by landing-kit. Route slugs for the programmatic landing pages.
// Entries added by hand are preserved on regeneration.

pub const SEO_SLUGS: &[&str] = &[
];
"#;

/// Result of one registry patch.
#[derive(Debug, Clone)]
pub struct RegistryPatch {
    pub path: PathBuf,
    pub added: usize,
    pub total: usize,
    pub changed: bool,
}

/// Write a fresh registry file with an empty slug array.
pub fn seed_route_registry(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, REGISTRY_SCAFFOLD)?;
    Ok(())
}

/// Slugs currently listed in the registry file, in file order.
pub fn read_registry_slugs(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let (start, end) = array_span(&content, path)?;
    Ok(parse_slug_items(&content[start..end]))
}

/// Union `slugs` into the registry, keeping existing entries first and in
/// their original relative order. When nothing new shows up the file is
/// left byte-for-byte untouched.
pub fn patch_route_registry(path: &Path, slugs: &[String]) -> Result<RegistryPatch> {
    let content = fs::read_to_string(path)?;
    let (start, end) = array_span(&content, path)?;
    let existing = parse_slug_items(&content[start..end]);

    let mut seen: HashSet<&str> = existing.iter().map(String::as_str).collect();
    let mut merged = existing.clone();
    let mut added = 0;
    for slug in slugs {
        if seen.insert(slug.as_str()) {
            merged.push(slug.clone());
            added += 1;
        }
    }

    if added == 0 {
        return Ok(RegistryPatch {
            path: path.to_path_buf(),
            added: 0,
            total: merged.len(),
            changed: false,
        });
    }

    let mut rebuilt = String::with_capacity(content.len() + added * 32);
    rebuilt.push_str(&content[..start]);
    rebuilt.push('\n');
    for slug in &merged {
        rebuilt.push_str("    \"");
        rebuilt.push_str(slug);
        rebuilt.push_str("\",\n");
    }
    rebuilt.push_str(&content[end..]);

    write_atomic(path, &rebuilt)?;

    Ok(RegistryPatch {
        path: path.to_path_buf(),
        added,
        total: merged.len(),
        changed: true,
    })
}

/// Byte range of the array contents, exclusive of the brackets.
fn array_span(content: &str, path: &Path) -> Result<(usize, usize)> {
    let anchor = content
        .find(SLUGS_ANCHOR)
        .ok_or_else(|| missing_anchor(path, SLUGS_ANCHOR))?;
    // Skip past the `=` first, otherwise the `&[` in the type annotation
    // would be taken for the initializer.
    let eq = content[anchor..]
        .find('=')
        .map(|rel| anchor + rel)
        .ok_or_else(|| missing_anchor(path, "="))?;
    let open = content[eq..]
        .find(ARRAY_OPEN)
        .map(|rel| eq + rel + ARRAY_OPEN.len())
        .ok_or_else(|| missing_anchor(path, ARRAY_OPEN))?;
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

/// Pull quoted items out of the array span. Tolerates trailing commas,
/// several items per line and stray whitespace; anything unquoted is
/// ignored. Duplicates collapse to the first occurrence.
fn parse_slug_items(span: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    span.split(',')
        .map(str::trim)
        .filter_map(|piece| piece.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')))
        .filter(|item| seen.insert(item.to_string()))
        .map(|item| item.to_string())
        .collect()
}
