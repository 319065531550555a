//! The Recipe trait.
//!
//! A recipe describes one upstream C++ library: which options it has,
//! which host configurations it rejects, which packages it needs, and how
//! the installed libraries are split into components. Recipes are pure
//! descriptions; every method receives the resolved configuration and
//! returns data.

use std::fmt;

use semver::VersionReq;
use serde::Serialize;

use crate::builder::cmake::CMakeDefinitions;
use crate::builder::shim::ShimSpec;
use crate::core::component::Component;
use crate::core::configuration::Configuration;
use crate::core::options::{OptionDecl, FPIC};
use crate::core::platform::Os;
use crate::core::requirement::RequirementSet;
use crate::resolver::compiler::CompilerConstraint;
use crate::resolver::errors::RecipeError;
use crate::resolver::rules::{self, OptionRule};
use crate::resolver::upstream::UpstreamFeature;

/// Descriptive recipe metadata.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub license: &'static str,
    pub homepage: &'static str,
    pub topics: &'static [&'static str],
    /// Header-only packages produce one binary for every host profile
    pub header_only: bool,
}

/// Consumer-side generators that read package metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Generator {
    CmakeFindPackage,
    CmakeFindPackageMulti,
    CmakePaths,
}

impl Generator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Generator::CmakeFindPackage => "cmake_find_package",
            Generator::CmakeFindPackageMulti => "cmake_find_package_multi",
            Generator::CmakePaths => "cmake_paths",
        }
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Package-level names exposed to consumer build systems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageNames {
    /// Name used by `find_package()`
    pub find_name: String,
    /// Base name of the generated config file, if it differs
    pub cmake_file_name: Option<String>,
    /// Generators the names apply to
    pub generators: Vec<Generator>,
}

impl PackageNames {
    /// Names for the two `find_package` generators.
    pub fn find_package(name: impl Into<String>) -> Self {
        PackageNames {
            find_name: name.into(),
            cmake_file_name: None,
            generators: vec![Generator::CmakeFindPackage, Generator::CmakeFindPackageMulti],
        }
    }

    pub fn with_cmake_file_name(mut self, name: impl Into<String>) -> Self {
        self.cmake_file_name = Some(name.into());
        self
    }

    pub fn with_generator(mut self, generator: Generator) -> Self {
        if !self.generators.contains(&generator) {
            self.generators.push(generator);
        }
        self
    }
}

/// System libraries appended to every component on one OS.
#[derive(Debug, Clone)]
pub struct SystemLibRule {
    pub os: Os,
    pub libs: &'static [&'static str],
}

impl SystemLibRule {
    pub fn new(os: Os, libs: &'static [&'static str]) -> Self {
        SystemLibRule { os, libs }
    }
}

/// A package-build recipe.
pub trait Recipe: Send + Sync {
    fn info(&self) -> &RecipeInfo;

    fn name(&self) -> &'static str {
        self.info().name
    }

    /// Upstream versions this recipe knows how to package.
    fn supported_versions(&self) -> VersionReq {
        VersionReq::STAR
    }

    fn options(&self) -> Vec<OptionDecl> {
        Vec::new()
    }

    /// Platform- and option-conditional option rules, applied in order.
    ///
    /// Recipes declaring `fPIC` get the standard rules: removed on Windows
    /// and removed when `shared` is set.
    fn option_rules(&self) -> Vec<OptionRule> {
        if self.options().iter().any(|decl| decl.name == FPIC) {
            rules::fpic_rules()
        } else {
            Vec::new()
        }
    }

    fn compiler_constraints(&self) -> Vec<CompilerConstraint> {
        Vec::new()
    }

    /// Options that upstream packages must have been built with.
    fn upstream_features(&self) -> Vec<UpstreamFeature> {
        Vec::new()
    }

    /// Declare upstream requirements for a configuration.
    fn requirements(&self, config: &Configuration) -> Result<RequirementSet, RecipeError>;

    /// Describe the installed components.
    fn components(&self, config: &Configuration) -> Vec<Component>;

    fn package_names(&self, config: &Configuration) -> PackageNames;

    fn system_libs(&self) -> Vec<SystemLibRule> {
        Vec::new()
    }

    /// Generated CMake variables module, if any.
    fn shim(&self, _config: &Configuration) -> Option<ShimSpec> {
        None
    }

    /// CMake cache definitions passed at configure time.
    fn cmake_definitions(&self, _config: &Configuration) -> CMakeDefinitions {
        CMakeDefinitions::new()
    }

    /// Install-relative glob patterns removed after install.
    fn prune_patterns(&self, _config: &Configuration) -> Vec<String> {
        vec!["lib/pkgconfig".to_string()]
    }
}

impl fmt::Debug for dyn Recipe + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recipe").field("name", &self.name()).finish()
    }
}
