//! Component graphs and metadata emission.
//!
//! This module turns a resolved configuration into what consumers read:
//! the validated component graph, the package metadata record, generated
//! CMake shim files, and configure-time CMake definitions.

pub mod cmake;
pub mod graph;
pub mod metadata;
pub mod shim;

pub use cmake::CMakeDefinitions;
pub use graph::ComponentGraph;
pub use metadata::{MetadataEmitter, PackageMetadata, RenderedPackage};
pub use shim::{render_variables_module, ShimInput, ShimSpec};
