#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for papermc
//!
//! This crate provides the data model shared by the metadata client, the
//! release resolver and the CLI: projects and version groups, builds and
//! their artifacts, and the ordering rules for version identifiers.

pub mod build;
pub mod download;
pub mod project;
pub mod query;
pub mod version;

// Re-export commonly used types
pub use build::{
    Artifact, ArtifactList, Build, Channel, Checksums, Commit, ParseChannelError,
    DEFAULT_ARTIFACT_KEY,
};
pub use download::DownloadResult;
pub use project::{
    Project, ProjectDetail, ProjectList, SupportInfo, VersionDetail, VersionGroups, VersionInfo,
};
pub use query::QueryOptions;
pub use version::{compare_versions, is_prerelease, ReleaseVersion};
