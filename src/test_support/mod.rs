//! Test fixtures for slipway unit tests.
//!
//! Host profiles, upstream option sets, fake install trees, and a recipe
//! with a deliberately broken component graph.

use std::path::Path;

use tempfile::TempDir;

use crate::core::options::UpstreamOptions;
use crate::core::platform::{Compiler, HostProfile};
use crate::core::recipe::{PackageNames, Recipe, RecipeInfo};
use crate::core::{Component, Configuration, RequirementSet};
use crate::resolver::errors::RecipeError;

/// A host profile from string descriptors, e.g. `profile("linux", "gcc", "8")`.
pub fn profile(os: &str, compiler: &str, version: &str) -> HostProfile {
    let os = os.parse().expect("valid os");
    let compiler = Compiler::parse(compiler, version).expect("valid compiler");
    HostProfile::new(os, compiler)
}

/// Linux with the given gcc major version.
pub fn linux_gcc(version: &str) -> HostProfile {
    profile("linux", "gcc", version)
}

/// Upstream options satisfying simbody's lapack requirement.
pub fn openblas_with_lapack() -> UpstreamOptions {
    UpstreamOptions::new().with("openblas", "build_lapack", true)
}

/// A temporary install tree containing the given (empty) files.
pub fn install_tree(files: &[&str]) -> TempDir {
    let tmp = TempDir::new().expect("failed to create temp dir");
    for file in files {
        let path = tmp.path().join(file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create dirs");
        }
        std::fs::write(&path, "").expect("failed to write file");
    }
    tmp
}

/// Relative paths of every file under `root`, sorted.
pub fn list_files(root: &Path) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(root, &path, out);
            } else if let Ok(rel) = path.strip_prefix(root) {
                out.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }

    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}

static BROKEN_INFO: RecipeInfo = RecipeInfo {
    name: "broken",
    description: "A recipe whose components reference an undeclared package",
    license: "MIT",
    homepage: "https://example.invalid",
    topics: &[],
    header_only: false,
};

/// A recipe whose component graph does not validate.
pub struct BrokenRecipe;

impl Recipe for BrokenRecipe {
    fn info(&self) -> &RecipeInfo {
        &BROKEN_INFO
    }

    fn requirements(&self, _config: &Configuration) -> Result<RequirementSet, RecipeError> {
        let mut reqs = RequirementSet::new();
        reqs.require("zlib/1.2.12")?;
        Ok(reqs)
    }

    fn components(&self, _config: &Configuration) -> Vec<Component> {
        vec![
            Component::new("core").requires(["zlib::zlib"]),
            Component::new("extras").requires(["core", "png::png"]),
        ]
    }

    fn package_names(&self, _config: &Configuration) -> PackageNames {
        PackageNames::find_package("broken")
    }
}
