//! Domain models for requirement lists.
//!
//! This module contains the core domain types including requirement entries,
//! the ordered requirement list, package metadata, and configuration.

/// Requirement entries and list parsing.
pub mod requirement;
pub use requirement::{EDITABLE_MARKER, Line, Requirement, RequirementList};

mod config;
pub use config::{Config, ConfigError};

/// Package metadata handed to the packaging tool.
pub mod metadata;
pub use metadata::{PackageInfo, PackageMetadata};
