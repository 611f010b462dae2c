//! Asset path resolution
//!
//! Turns a logical name or path from the command line into an absolute path
//! to an existing regular file, searching the working directory first and
//! then each configured asset root.

use std::path::{Path, PathBuf};

use glob::glob;

use crate::error::TransformError;

/// Resolves asset names against a list of search roots.
#[derive(Debug, Clone, Default)]
pub struct AssetResolver {
    roots: Vec<PathBuf>,
}

/// Check if a string contains glob metacharacters.
pub fn is_pattern(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

impl AssetResolver {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Places `name` could refer to, in search order.
    fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let path = Path::new(name);
        if path.is_absolute() {
            return vec![path.to_path_buf()];
        }
        std::iter::once(path.to_path_buf()).chain(self.roots.iter().map(|r| r.join(path))).collect()
    }

    /// Resolve `name` to an absolute path of an existing regular file.
    ///
    /// The first existing candidate wins; if it is a directory the lookup
    /// fails with [`TransformError::NotAFile`] rather than searching further.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, TransformError> {
        for candidate in self.candidates(name) {
            if !candidate.exists() {
                continue;
            }
            if !candidate.is_file() {
                return Err(TransformError::NotAFile(candidate));
            }
            return candidate.canonicalize().map_err(|_| TransformError::AssetNotFound(candidate));
        }
        Err(TransformError::AssetNotFound(PathBuf::from(name)))
    }

    /// Resolve a name or glob pattern to one or more files.
    ///
    /// Patterns are matched relative to the working directory and every root;
    /// the matches are returned sorted. A pattern matching nothing fails with
    /// [`TransformError::AssetNotFound`].
    pub fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>, TransformError> {
        if !is_pattern(pattern) {
            return self.resolve(pattern).map(|p| vec![p]);
        }

        let mut files = Vec::new();
        for candidate in self.candidates(pattern) {
            let candidate = candidate.display().to_string();
            let paths = glob(&candidate).map_err(|e| {
                TransformError::validation(format!("invalid pattern '{pattern}': {e}"))
            })?;
            for path in paths.filter_map(Result::ok).filter(|p| p.is_file()) {
                if let Ok(abs) = path.canonicalize() {
                    files.push(abs);
                }
            }
            if !files.is_empty() {
                break;
            }
        }

        if files.is_empty() {
            return Err(TransformError::AssetNotFound(PathBuf::from(pattern)));
        }
        files.sort();
        files.dedup();
        Ok(files)
    }
}
