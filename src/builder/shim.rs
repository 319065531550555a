//! Generated CMake variables modules.
//!
//! A shim is a small `.cmake` file installed next to the package that
//! exposes the version triple and a few install-relative directories to
//! consumers. Rendering is a pure function of [`ShimInput`]; writing the
//! file is the emitter's job.

use std::fmt::Write as _;
use std::path::{Component as PathComponent, Path};

use semver::Version;

/// How a recipe lays out its variables module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimSpec {
    /// Install-relative path of the module (`lib/cmake/foo-variables.cmake`)
    pub rel_path: String,
    /// Variable holding the install prefix (`OGRE_PREFIX_DIR`)
    pub prefix_var: String,
    /// Stem of the version variables (`OGRE1` → `OGRE1_VERSION_MAJOR`)
    pub version_stem: String,
    /// `(variable, prefix-relative path)` pairs
    pub path_vars: Vec<(String, String)>,
}

impl ShimSpec {
    pub fn new(
        rel_path: impl Into<String>,
        prefix_var: impl Into<String>,
        version_stem: impl Into<String>,
    ) -> Self {
        ShimSpec {
            rel_path: rel_path.into(),
            prefix_var: prefix_var.into(),
            version_stem: version_stem.into(),
            path_vars: Vec::new(),
        }
    }

    pub fn path_var(mut self, var: impl Into<String>, path: impl Into<String>) -> Self {
        self.path_vars.push((var.into(), path.into()));
        self
    }

    /// Resolve this layout for a concrete version.
    pub fn input(&self, version: &Version) -> ShimInput {
        let module_dir = Path::new(&self.rel_path)
            .parent()
            .unwrap_or_else(|| Path::new(""));

        ShimInput {
            prefix_var: self.prefix_var.clone(),
            prefix_from_module: relative_to_prefix(module_dir),
            version_stem: self.version_stem.clone(),
            major: version.major,
            minor: version.minor,
            patch: version.patch,
            path_vars: self.path_vars.clone(),
        }
    }
}

/// Everything the rendered module depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShimInput {
    pub prefix_var: String,
    /// Path from the module's directory back to the install prefix (`../..`)
    pub prefix_from_module: String,
    pub version_stem: String,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub path_vars: Vec<(String, String)>,
}

/// Render a CMake variables module.
///
/// Output is byte-stable for equal inputs and always ends in a newline.
pub fn render_variables_module(input: &ShimInput) -> String {
    let mut out = String::new();
    let stem = &input.version_stem;

    if input.prefix_from_module.is_empty() {
        let _ = writeln!(out, "set({} ${{CMAKE_CURRENT_LIST_DIR}})", input.prefix_var);
    } else {
        let _ = writeln!(
            out,
            "set({} ${{CMAKE_CURRENT_LIST_DIR}}/{})",
            input.prefix_var, input.prefix_from_module
        );
    }
    let _ = writeln!(out, "set({}_VERSION_MAJOR {})", stem, input.major);
    let _ = writeln!(out, "set({}_VERSION_MINOR {})", stem, input.minor);
    let _ = writeln!(out, "set({}_VERSION_PATCH {})", stem, input.patch);
    let _ = writeln!(
        out,
        "set({}_VERSION_STRING \"{}.{}.{}\")",
        stem, input.major, input.minor, input.patch
    );

    if !input.path_vars.is_empty() {
        out.push('\n');
        for (var, path) in &input.path_vars {
            let _ = writeln!(out, "set({} \"${{{}}}/{}\")", var, input.prefix_var, path);
        }
    }

    out
}

/// Forward-slash path climbing from `dir` back to the prefix.
fn relative_to_prefix(dir: &Path) -> String {
    let rel = pathdiff::diff_paths(Path::new(""), dir).unwrap_or_default();
    rel.components()
        .filter_map(|c| match c {
            PathComponent::ParentDir => Some(".."),
            PathComponent::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
