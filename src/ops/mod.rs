//! High-level operations.
//!
//! This module contains the implementation of slipway commands.

pub mod package_id;
pub mod pipeline;
pub mod prune;

pub use package_id::package_id;
pub use pipeline::{evaluate, package, Evaluation, PackageOptions, PackageResult};
pub use prune::prune_install_tree;
