//! # Local Filesystem Accessor

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::backend::FileAccessor;
use super::errors::{FileError, FileResult};

/// Containment applied to requested names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathPolicy {
    /// Names are joined onto the root as given; `..` and absolute paths
    /// reach anywhere the process can read
    #[default]
    Unrestricted,
    /// Names must stay beneath the root
    Contained,
}

/// File access configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    /// Containment mode (default: unrestricted)
    #[serde(default)]
    pub mode: PathPolicy,

    /// Directory names are resolved against (default: ".")
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            mode: PathPolicy::default(),
            root: default_root(),
        }
    }
}

/// Local filesystem accessor
#[derive(Debug)]
pub struct LocalFileAccessor {
    root: PathBuf,
    policy: PathPolicy,
}

impl LocalFileAccessor {
    /// Create a new local accessor
    pub fn new(root: PathBuf, policy: PathPolicy) -> Self {
        Self { root, policy }
    }

    pub fn from_config(config: &FileConfig) -> Self {
        Self::new(config.root.clone(), config.mode)
    }

    fn full_path(&self, name: &str) -> FileResult<PathBuf> {
        if self.policy == PathPolicy::Contained && !is_contained(Path::new(name)) {
            return Err(FileError::OutsideRoot(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

/// True when every component is a plain name or `.`
fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

impl FileAccessor for LocalFileAccessor {
    fn read(&self, name: &str) -> FileResult<Vec<u8>> {
        let full_path = match self.full_path(name) {
            Ok(path) => path,
            Err(e) => {
                warn!(name, "file request outside root rejected");
                return Err(e);
            }
        };

        info!(path = %full_path.display(), "reading file");
        Ok(fs::read(&full_path)?)
    }
}
