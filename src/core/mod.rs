//! Core data structures for slipway.
//!
//! This module contains the foundational types used throughout slipway:
//! - Host profiles and option maps (the resolver's inputs)
//! - Requirements on upstream packages
//! - Components and the Recipe trait

pub mod component;
pub mod configuration;
pub mod options;
pub mod platform;
pub mod recipe;
pub mod requirement;

pub use component::{Component, ComponentRef};
pub use configuration::Configuration;
pub use options::{OptionDecl, OptionMap, OptionValue, UpstreamOptions};
pub use platform::{Arch, BuildType, Compiler, CompilerFamily, CppStandard, HostProfile, Os};
pub use recipe::{Generator, PackageNames, Recipe, RecipeInfo, SystemLibRule};
pub use requirement::{Requirement, RequirementSet, VersionPin};
