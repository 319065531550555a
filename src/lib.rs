//! slipway - package metadata recipes for C++ libraries
//!
//! A recipe describes how one upstream library is packaged: its options,
//! the host configurations it rejects, the packages it depends on, and
//! how the installed files split into components. This crate resolves a
//! request against a recipe and emits the metadata consumers read.

pub mod builder;
pub mod core;
pub mod ops;
pub mod recipes;
pub mod resolver;
pub mod util;

/// Test fixtures for slipway unit tests.
#[cfg(test)]
pub mod test_support;

pub use core::{Configuration, HostProfile, OptionMap, Recipe, Requirement};
pub use recipes::RecipeRegistry;
pub use resolver::errors::RecipeError;
pub use resolver::{ResolveRequest, Resolver};
pub use util::context::GlobalContext;
