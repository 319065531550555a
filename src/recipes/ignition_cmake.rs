//! ignition-cmake: CMake modules shared by the Ignition robotics libraries.
//!
//! Header-only from the package manager's point of view. Everything is
//! named after the major version so that `ignition-cmake0`, `1` and `2`
//! can be installed side by side.

use crate::builder::cmake::CMakeDefinitions;
use crate::builder::shim::ShimSpec;
use crate::core::recipe::{PackageNames, Recipe, RecipeInfo};
use crate::core::{Component, Configuration, RequirementSet};
use crate::resolver::errors::RecipeError;

static INFO: RecipeInfo = RecipeInfo {
    name: "ignition-cmake",
    description: "A set of CMake modules that are used by the C++-based Ignition projects.",
    license: "Apache-2.0",
    homepage: "https://github.com/ignitionrobotics/ign-cmake",
    topics: &["ignition", "robotics", "cmake"],
    header_only: true,
};

pub struct IgnitionCmake;

impl IgnitionCmake {
    fn cmake_name(major: u64) -> String {
        format!("ignition-cmake{}", major)
    }

    fn config_dir(major: u64) -> String {
        format!("lib/cmake/{}", Self::cmake_name(major))
    }
}

impl Recipe for IgnitionCmake {
    fn info(&self) -> &RecipeInfo {
        &INFO
    }

    fn requirements(&self, _config: &Configuration) -> Result<RequirementSet, RecipeError> {
        Ok(RequirementSet::new())
    }

    fn components(&self, config: &Configuration) -> Vec<Component> {
        let major = config.major();
        let config_dir = Self::config_dir(major);
        let modules_dir = format!("{}/cmake{}", config_dir, major);

        vec![Component::new(Self::cmake_name(major))
            .include_dir(format!("include/ignition/cmake{}", major))
            .lib_dir(modules_dir.clone())
            .build_dir(config_dir)
            .build_dir(modules_dir)]
    }

    fn package_names(&self, config: &Configuration) -> PackageNames {
        PackageNames::find_package(Self::cmake_name(config.major()))
    }

    fn shim(&self, config: &Configuration) -> Option<ShimSpec> {
        let major = config.major();
        Some(ShimSpec::new(
            format!(
                "{}/slipway-ignition-cmake-variables.cmake",
                Self::config_dir(major)
            ),
            "IGNITION_CMAKE_PREFIX_DIR",
            format!("IGNITION_CMAKE{}", major),
        )
        .path_var(
            "IGNITION_CMAKE_MODULES_DIR",
            format!("{}/cmake{}", Self::config_dir(major), major),
        ))
    }

    fn cmake_definitions(&self, _config: &Configuration) -> CMakeDefinitions {
        let mut defs = CMakeDefinitions::new();
        defs.define("CMAKE_INSTALL_DATAROOTDIR", "lib")
            .define("SKIP_component_name", false);
        defs
    }

    fn prune_patterns(&self, config: &Configuration) -> Vec<String> {
        // Upstream config files are replaced by generated metadata
        vec![
            "lib/pkgconfig".to_string(),
            format!("{}/*.cmake", Self::config_dir(config.major())),
        ]
    }
}
