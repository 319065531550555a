//! Package metadata emission.
//!
//! The emitter renders everything in memory first ([`RenderedPackage`]),
//! then writes shim files and finally the metadata record. Nothing touches
//! the install tree until every component has been rendered.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::builder::graph::ComponentGraph;
use crate::builder::shim::render_variables_module;
use crate::core::recipe::Generator;
use crate::core::{Configuration, Recipe, Requirement};
use crate::resolver::version::triple;
use crate::util::fs::write_atomic;
use crate::util::hash::sha256_str;

/// File name of the metadata record at the install root.
pub const METADATA_FILE: &str = "slipway-metadata.json";

/// Metadata for one component, as consumed by downstream build systems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentMetadata {
    pub name: String,
    /// Imported CMake target
    pub target: String,
    /// Component name per generator
    pub names: BTreeMap<Generator, String>,
    pub libraries: Vec<String>,
    pub include_dirs: Vec<String>,
    pub lib_dirs: Vec<String>,
    pub build_dirs: Vec<String>,
    /// Local components and `package::component` references
    pub requires: Vec<String>,
    pub system_libs: Vec<String>,
    /// CMake modules included by consumers, per generator
    pub build_modules: BTreeMap<Generator, Vec<String>>,
}

/// A generated file and its content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShimRecord {
    /// Install-relative path
    pub path: String,
    pub sha256: String,
}

/// The package metadata record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    /// Package name per generator
    pub names: BTreeMap<Generator, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmake_file_name: Option<String>,
    pub requirements: Vec<Requirement>,
    pub components: BTreeMap<String, ComponentMetadata>,
    pub shims: Vec<ShimRecord>,
}

/// A file rendered in memory, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub rel_path: String,
    pub contents: String,
}

/// Output of [`MetadataEmitter::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPackage {
    pub metadata: PackageMetadata,
    pub files: Vec<RenderedFile>,
}

impl RenderedPackage {
    /// Write shim files, then the metadata record, under `install_root`.
    ///
    /// Each file is written atomically; the record goes last so a reader
    /// that finds it also finds every file it references.
    pub fn write(&self, install_root: &Path) -> Result<PathBuf> {
        for file in &self.files {
            let path = install_root.join(&file.rel_path);
            write_atomic(&path, &file.contents)?;
            tracing::debug!("wrote {}", path.display());
        }

        let record = install_root.join(METADATA_FILE);
        let json = serde_json::to_string_pretty(&self.metadata)
            .context("failed to serialize package metadata")?;
        write_atomic(&record, &format!("{}\n", json))?;

        tracing::info!(
            "emitted metadata for {} {} ({} components)",
            self.metadata.name,
            self.metadata.version,
            self.metadata.components.len()
        );

        Ok(record)
    }
}

/// Emits package metadata for one resolved configuration.
pub struct MetadataEmitter<'a> {
    recipe: &'a dyn Recipe,
    config: &'a Configuration,
}

impl<'a> MetadataEmitter<'a> {
    pub fn new(recipe: &'a dyn Recipe, config: &'a Configuration) -> Self {
        MetadataEmitter { recipe, config }
    }

    /// Render the metadata record and all generated files.
    pub fn render(
        &self,
        graph: &ComponentGraph,
        requirements: &[Requirement],
    ) -> RenderedPackage {
        let names = self.recipe.package_names(self.config);
        let system_libs = self.system_libs();

        let mut files = Vec::new();
        let mut shims = Vec::new();
        if let Some(spec) = self.recipe.shim(self.config) {
            let contents = render_variables_module(&spec.input(self.config.version()));
            shims.push(ShimRecord {
                path: spec.rel_path.clone(),
                sha256: sha256_str(&contents),
            });
            files.push(RenderedFile {
                rel_path: spec.rel_path,
                contents,
            });
        }

        let build_modules: Vec<String> = shims.iter().map(|s| s.path.clone()).collect();

        let components = graph
            .topological_order()
            .into_iter()
            .map(|component| {
                let metadata = ComponentMetadata {
                    name: component.name.clone(),
                    target: component.target.clone(),
                    names: names
                        .generators
                        .iter()
                        .map(|g| (*g, component.name.clone()))
                        .collect(),
                    libraries: component.libs.clone(),
                    include_dirs: component.include_dirs.clone(),
                    lib_dirs: component.lib_dirs.clone(),
                    build_dirs: component.build_dirs.clone(),
                    requires: component.requires.iter().map(ToString::to_string).collect(),
                    system_libs: system_libs.clone(),
                    build_modules: if build_modules.is_empty() {
                        BTreeMap::new()
                    } else {
                        names
                            .generators
                            .iter()
                            .map(|g| (*g, build_modules.clone()))
                            .collect()
                    },
                };
                (component.name.clone(), metadata)
            })
            .collect();

        let metadata = PackageMetadata {
            name: self.recipe.name().to_string(),
            version: triple(self.config.version()),
            names: names
                .generators
                .iter()
                .map(|g| (*g, names.find_name.clone()))
                .collect(),
            cmake_file_name: names.cmake_file_name.clone(),
            requirements: requirements.to_vec(),
            components,
            shims,
        };

        RenderedPackage { metadata, files }
    }

    /// System libraries for the configuration's OS, in rule order.
    fn system_libs(&self) -> Vec<String> {
        let os = self.config.host().os;
        let mut libs: Vec<String> = Vec::new();
        for rule in self.recipe.system_libs() {
            if rule.os != os {
                continue;
            }
            for lib in rule.libs {
                if !libs.iter().any(|l| l == *lib) {
                    libs.push(lib.to_string());
                }
            }
        }
        libs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::Ogre;
    use crate::resolver::{ResolveRequest, Resolver};
    use crate::test_support::{linux_gcc, profile};
    use tempfile::TempDir;

    fn render_ogre(host: crate::core::HostProfile) -> RenderedPackage {
        let recipe = Ogre;
        let config = Resolver::new(&recipe)
            .resolve(&ResolveRequest::new("1.10.2", host))
            .unwrap();
        let requirements = recipe.requirements(&config).unwrap().into_vec();
        let graph = ComponentGraph::build(recipe.components(&config), &requirements).unwrap();
        MetadataEmitter::new(&recipe, &config).render(&graph, &requirements)
    }

    #[test]
    fn test_linux_components_get_pthread() {
        let rendered = render_ogre(linux_gcc("8"));
        for component in rendered.metadata.components.values() {
            assert_eq!(component.system_libs, vec!["pthread"], "{}", component.name);
        }
    }

    #[test]
    fn test_windows_components_have_no_system_libs() {
        let rendered = render_ogre(profile("windows", "msvc", "191"));
        assert!(rendered
            .metadata
            .components
            .values()
            .all(|c| c.system_libs.is_empty()));
    }

    #[test]
    fn test_build_modules_reference_the_shim() {
        let rendered = render_ogre(linux_gcc("8"));
        let main = &rendered.metadata.components["OgreMain"];
        let modules = &main.build_modules[&Generator::CmakeFindPackage];

        assert_eq!(modules, &vec!["lib/cmake/conan-official-ogre-variables.cmake".to_string()]);
        assert_eq!(rendered.files.len(), 1);
        assert_eq!(rendered.metadata.shims[0].path, rendered.files[0].rel_path);
        assert_eq!(rendered.metadata.shims[0].sha256, sha256_str(&rendered.files[0].contents));
    }

    #[test]
    fn test_write_creates_shim_and_record() {
        let tmp = TempDir::new().unwrap();
        let rendered = render_ogre(linux_gcc("8"));

        let record = rendered.write(tmp.path()).unwrap();

        assert_eq!(record, tmp.path().join(METADATA_FILE));
        let shim = tmp
            .path()
            .join("lib/cmake/conan-official-ogre-variables.cmake");
        let contents = std::fs::read_to_string(shim).unwrap();
        assert!(contents.contains("set(OGRE1_VERSION_STRING \"1.10.2\")"));

        let json = std::fs::read_to_string(record).unwrap();
        assert!(json.contains("\"OGRE::OgreMain\""));
        assert!(json.contains("\"cmake_find_package_multi\""));
    }
}
