//! # File Accessor Trait

use super::errors::FileResult;

/// Reads whole files by caller-supplied name
pub trait FileAccessor: Send + Sync + std::fmt::Debug {
    /// Read every byte of `name`
    fn read(&self, name: &str) -> FileResult<Vec<u8>>;
}
