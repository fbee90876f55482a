//! Page file emission.
//!
//! Pages are always regenerated in memory; the emitter only touches disk
//! when the content digest actually changed, so reruns leave mtimes and
//! bytes alone.

use landing_kit_core::Result;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// What happened to a page file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
    Unchanged,
}

impl WriteOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteOutcome::Created => "created",
            WriteOutcome::Updated => "updated",
            WriteOutcome::Unchanged => "unchanged",
        }
    }
}

/// Write one page at `<pages_dir>/<slug>/index.html`, creating directories
/// as needed. Returns the final path and what changed.
pub fn write_page(pages_dir: &Path, slug: &str, html: &str) -> Result<(PathBuf, WriteOutcome)> {
    let page_dir = pages_dir.join(slug);
    fs::create_dir_all(&page_dir)?;
    let path = page_dir.join("index.html");

    let new_digest = Sha256::digest(html.as_bytes());
    let outcome = match fs::read(&path) {
        Ok(existing) => {
            if Sha256::digest(&existing) == new_digest {
                WriteOutcome::Unchanged
            } else {
                fs::write(&path, html)?;
                WriteOutcome::Updated
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::write(&path, html)?;
            WriteOutcome::Created
        }
        Err(e) => return Err(e.into()),
    };

    Ok((path, outcome))
}

/// Replace `path` atomically: write to a tempfile in the same directory,
/// then rename over the target. Used for the registry files, which are
/// hand-editable source files we must never leave half-written.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
