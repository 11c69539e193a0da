#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Release resolution for papermc
//!
//! Turns a project's unordered version groups into an ordered catalog,
//! applies the latest / recommended / promoted selection policies and picks
//! the artifact to download. Everything here talks to the metadata service
//! through [`papermc_net::MetadataSource`].

mod artifact;
mod catalog;
mod matrix;
mod selector;

pub use artifact::{
    default_artifact, named_artifact, resolve_artifact, resolve_target, ResolvedArtifact,
};
pub use catalog::{flatten, flatten_ids};
pub use matrix::{build_matrix, GithubMatrix, MatrixEntry};
pub use selector::{
    find_promoted_build, find_promoted_build_with, latest_build, latest_version,
    project_versions, recommended_version, select_latest, select_recommended,
    PromotionStrategy,
};
