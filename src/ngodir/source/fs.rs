use super::{normalize, DataSource, SourceData};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads the directory from a JSON document on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for FileSource {
    fn load(&self) -> Result<SourceData> {
        let content = fs::read_to_string(&self.path)?;
        let data = normalize::parse_document(&content)?;
        tracing::debug!(
            path = %self.path.display(),
            records = data.records.len(),
            "parsed directory file"
        );
        Ok(data)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
