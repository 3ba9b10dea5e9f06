//! Line-addressed text file.
//!
//! Each line-level edit reads the whole file, edits the line list in memory
//! and writes the whole file back. Lines are indexed from 0.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AgendaError, Result};

/// A text file edited one line at a time.
#[derive(Debug, Clone)]
pub struct LineFile {
    path: PathBuf,
}

impl LineFile {
    /// Open `path`, creating missing parent directories and an empty file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        if !path.exists() {
            debug!(path = %path.display(), "creating empty line file");
            fs::write(&path, "")?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All lines, without their terminators.
    pub fn read_lines(&self) -> Result<Vec<String>> {
        let content = fs::read_to_string(&self.path)?;
        Ok(content.lines().map(str::to_string).collect())
    }

    pub fn line_count(&self) -> Result<usize> {
        Ok(self.read_lines()?.len())
    }

    /// Replace the whole content with `lines`.
    pub fn write_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<()> {
        let mut content = String::new();
        for line in lines {
            content.push_str(line.as_ref());
            content.push('\n');
        }
        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), lines = lines.len(), "rewrote line file");
        Ok(())
    }

    pub fn append_line(&self, line: &str) -> Result<()> {
        let mut lines = self.read_lines()?;
        lines.push(line.to_string());
        self.write_lines(&lines)
    }

    /// Insert `line` before `index`; an index past the end appends.
    pub fn insert_line(&self, index: usize, line: &str) -> Result<()> {
        let mut lines = self.read_lines()?;
        let index = index.min(lines.len());
        lines.insert(index, line.to_string());
        self.write_lines(&lines)
    }

    pub fn replace_line(&self, index: usize, line: &str) -> Result<()> {
        let mut lines = self.read_lines()?;
        let len = lines.len();
        let slot = lines
            .get_mut(index)
            .ok_or(AgendaError::IndexOutOfRange { index, len })?;
        *slot = line.to_string();
        self.write_lines(&lines)
    }

    /// Remove the line at `index` and return it.
    pub fn delete_line(&self, index: usize) -> Result<String> {
        let mut lines = self.read_lines()?;
        if index >= lines.len() {
            return Err(AgendaError::IndexOutOfRange {
                index,
                len: lines.len(),
            });
        }
        let removed = lines.remove(index);
        self.write_lines(&lines)?;
        Ok(removed)
    }
}
