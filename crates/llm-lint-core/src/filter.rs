use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

pub const DEFAULT_EXTENSION: &str = ".go";
pub const DEFAULT_MAX_CHARS: usize = 8000;
pub const DEFAULT_MAX_FILES: usize = 20;

/// Decides which of the files handed to the hook are sent for review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    extension: String,
    max_chars: usize,
    max_files: usize,
}

impl Default for FileFilter {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            max_chars: DEFAULT_MAX_CHARS,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

impl FileFilter {
    pub fn new(extension: impl Into<String>, max_chars: usize, max_files: usize) -> Self {
        Self {
            extension: extension.into(),
            max_chars,
            max_files,
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    /// Reject the whole batch before any file is touched.
    ///
    /// The count covers every path passed in, source or not.
    pub fn admit_batch(&self, count: usize) -> Result<(), BatchRejection> {
        if count == 0 {
            return Err(BatchRejection::Empty);
        }
        if count > self.max_files {
            return Err(BatchRejection::TooMany {
                count,
                limit: self.max_files,
            });
        }
        Ok(())
    }

    /// Suffix match on the path exactly as it was given.
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.as_os_str()
            .to_string_lossy()
            .ends_with(self.extension.as_str())
    }

    /// Load an eligible file, or `None` when its extension does not match.
    pub fn load(&self, path: &Path) -> Result<Option<SourceFile>, FilterError> {
        if !self.matches_extension(path) {
            return Ok(None);
        }
        let bytes = fs::read(path).map_err(|source| FilterError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let chars = char_count(&bytes);
        let content = String::from_utf8_lossy(&bytes).into_owned();
        if chars > self.max_chars {
            return Err(FilterError::Oversized {
                path: path.to_path_buf(),
                chars,
                limit: self.max_chars,
            });
        }
        Ok(Some(SourceFile {
            path: path.to_path_buf(),
            content,
        }))
    }
}

/// Characters in `bytes`, counting every byte of an invalid sequence as one.
fn char_count(bytes: &[u8]) -> usize {
    bytes
        .utf8_chunks()
        .map(|chunk| chunk.valid().chars().count() + chunk.invalid().len())
        .sum()
}

/// An eligible file with its decoded contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

impl SourceFile {
    pub fn name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Reasons for skipping an entire batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BatchRejection {
    #[error("No files provided for the hook.")]
    Empty,
    #[error("Skipping as analysing more than {limit} files would take too long")]
    TooMany { count: usize, limit: usize },
}

/// Per-file reasons for not sending a file to the model.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Error reading file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Skipping file {} as it has more than {limit} characters", path.display())]
    Oversized {
        path: PathBuf,
        chars: usize,
        limit: usize,
    },
}
