//! # File Storage Module
//!
//! Raw file retrieval behind the [`FileAccessor`] trait, with a containment
//! policy chosen by configuration.

pub mod errors;
pub mod backend;
pub mod local;

pub use errors::{FileError, FileResult};
pub use backend::FileAccessor;
pub use local::{FileConfig, LocalFileAccessor, PathPolicy};
