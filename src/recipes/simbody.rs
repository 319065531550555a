//! Simbody: multibody dynamics toolkit.

use crate::builder::shim::ShimSpec;
use crate::core::options::{FPIC, SHARED};
use crate::core::recipe::{PackageNames, Recipe, RecipeInfo};
use crate::core::{Component, Configuration, OptionDecl, RequirementSet};
use crate::resolver::errors::RecipeError;
use crate::resolver::upstream::UpstreamFeature;

static INFO: RecipeInfo = RecipeInfo {
    name: "simbody",
    description: "High-performance, open-source toolkit for science- and engineering-quality simulation",
    license: "Apache-2.0",
    homepage: "https://github.com/simbody/simbody",
    topics: &["high-performance", "science", "simulation"],
    header_only: false,
};

pub struct Simbody;

impl Simbody {
    fn cmake_name(major: u64) -> String {
        format!("simbody{}", major)
    }
}

impl Recipe for Simbody {
    fn info(&self) -> &RecipeInfo {
        &INFO
    }

    fn options(&self) -> Vec<OptionDecl> {
        vec![
            OptionDecl::boolean(SHARED, false, "Build shared libraries"),
            OptionDecl::boolean(FPIC, true, "Build position-independent code"),
        ]
    }

    fn upstream_features(&self) -> Vec<UpstreamFeature> {
        vec![UpstreamFeature::new("openblas", "build_lapack", true)]
    }

    fn requirements(&self, _config: &Configuration) -> Result<RequirementSet, RecipeError> {
        let mut reqs = RequirementSet::new();
        reqs.require("openblas/0.3.17")?;
        reqs.require("opengl/system")?;
        Ok(reqs)
    }

    fn components(&self, config: &Configuration) -> Vec<Component> {
        let major = config.major();
        let name = Self::cmake_name(major);
        let build_dir = format!("lib/cmake/{}/cmake{}", name, major);

        vec![Component::new(name)
            .build_dir(build_dir)
            .requires(["openblas::openblas", "opengl::opengl"])]
    }

    fn package_names(&self, config: &Configuration) -> PackageNames {
        PackageNames::find_package(Self::cmake_name(config.major()))
    }

    fn shim(&self, config: &Configuration) -> Option<ShimSpec> {
        let major = config.major();
        Some(ShimSpec::new(
            format!(
                "lib/cmake/{}/slipway-simbody-variables.cmake",
                Self::cmake_name(major)
            ),
            "SIMBODY_PREFIX_DIR",
            format!("SIMBODY{}", major),
        ))
    }
}
