//! Requirement list loading for package builds
//!
//! Dependency specifiers are read from a plain-text `requirements.txt`, one
//! per line, and handed to a packaging tool alongside the package metadata.

pub mod domain;
pub use domain::{
    Config, ConfigError, Line, PackageInfo, PackageMetadata, Requirement, RequirementList,
};

/// Filesystem access for requirement files.
pub mod storage;
pub use storage::LoadError;
