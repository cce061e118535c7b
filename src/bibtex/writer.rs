//! Appending records to the bibliography file.
//!
//! Each batch is written with a single open/append/close and no locking. If
//! the listener handles two saves at the same time, their bytes may
//! interleave in the file. The file is never read back.

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Context;
use tracing::info;

#[derive(Debug, Clone)]
pub struct BibliographyWriter {
    path: PathBuf,
}

impl BibliographyWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        BibliographyWriter { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append records, separated by blank lines, in one write.
    pub fn append(&self, records: &[String]) -> anyhow::Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        let mut chunk = records.join("\n\n");
        chunk.push('\n');
        file.write_all(chunk.as_bytes())
            .with_context(|| format!("failed to append to {}", self.path.display()))?;

        info!(records = records.len(), path = %self.path.display(), "appended records");
        Ok(())
    }
}
