//! Directory-backed cue selection

use crate::{AudioError, Result, DEFAULT_CUE_EXTENSIONS};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};

/// A directory of interchangeable cues, e.g. every "sad" clip.
#[derive(Debug, Clone)]
pub struct CueLibrary {
    dir: PathBuf,
    extensions: Vec<String>,
}

impl CueLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extensions: DEFAULT_CUE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Replace the accepted extensions (without the leading dot, case-sensitive).
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Regular files in the directory whose extension is accepted, sorted by path.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.dir).map_err(|source| AudioError::Directory {
            dir: self.dir.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| AudioError::Directory {
                    dir: self.dir.clone(),
                    source,
                })?
                .path();
            if path.is_file() && self.accepts(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Pick one eligible cue uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PathBuf> {
        let files = self.scan()?;
        files.choose(rng).cloned().ok_or_else(|| AudioError::NoCues {
            dir: self.dir.clone(),
            extensions: self.extensions.clone(),
        })
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|allowed| allowed == ext))
            .unwrap_or(false)
    }
}
