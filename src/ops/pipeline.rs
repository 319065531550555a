//! The packaging pipeline.
//!
//! `evaluate` runs every stage in memory: resolve, declare, build the
//! component graph, render metadata. `package` then writes the rendered
//! files and, if asked, prunes the install tree. Any recipe error surfaces
//! from `evaluate`, so a failed run never touches the install tree, and a
//! failed write leaves it unpruned.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::builder::cmake::CMakeDefinitions;
use crate::builder::graph::ComponentGraph;
use crate::builder::metadata::{MetadataEmitter, RenderedPackage};
use crate::core::{Configuration, Recipe, Requirement};
use crate::ops::package_id::package_id;
use crate::ops::prune::prune_install_tree;
use crate::resolver::errors::RecipeError;
use crate::resolver::{ResolveRequest, Resolver};

/// Everything derived from one request, before anything is written.
#[derive(Debug)]
pub struct Evaluation {
    pub config: Configuration,
    pub requirements: Vec<Requirement>,
    pub graph: ComponentGraph,
    pub definitions: CMakeDefinitions,
    pub package_id: String,
    pub rendered: RenderedPackage,
}

/// Run the pipeline in memory.
pub fn evaluate(recipe: &dyn Recipe, request: &ResolveRequest) -> Result<Evaluation, RecipeError> {
    let config = Resolver::new(recipe).resolve(request)?;
    tracing::debug!("resolved {} {}: {}", recipe.name(), config.version(), config.options());

    let requirements = recipe.requirements(&config)?.into_vec();
    tracing::debug!("declared {} requirements", requirements.len());

    let graph = ComponentGraph::build(recipe.components(&config), &requirements)?;
    tracing::debug!("built component graph with {} components", graph.len());

    let rendered = MetadataEmitter::new(recipe, &config).render(&graph, &requirements);

    Ok(Evaluation {
        definitions: recipe.cmake_definitions(&config),
        package_id: package_id(recipe, &config),
        config,
        requirements,
        graph,
        rendered,
    })
}

/// Options for [`package`].
#[derive(Debug, Clone)]
pub struct PackageOptions {
    /// Install prefix the metadata describes
    pub prefix: PathBuf,
    /// Remove the recipe's prune patterns after emitting
    pub prune: bool,
}

impl PackageOptions {
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        PackageOptions {
            prefix: prefix.into(),
            prune: false,
        }
    }

    pub fn with_prune(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }
}

/// Result of a successful [`package`] run.
#[derive(Debug)]
pub struct PackageResult {
    pub evaluation: Evaluation,
    /// Path of the written metadata record
    pub metadata_path: PathBuf,
    /// Paths removed by pruning
    pub pruned: Vec<PathBuf>,
}

/// Run the full pipeline and emit metadata into `opts.prefix`.
///
/// Pruning runs only once every file is written, and never removes the
/// files just emitted.
pub fn package(
    recipe: &dyn Recipe,
    request: &ResolveRequest,
    opts: &PackageOptions,
) -> Result<PackageResult> {
    let evaluation = evaluate(recipe, request)?;

    let metadata_path = write_rendered(&evaluation.rendered, &opts.prefix)?;

    let pruned = if opts.prune {
        let mut keep: Vec<PathBuf> = evaluation
            .rendered
            .files
            .iter()
            .map(|file| opts.prefix.join(&file.rel_path))
            .collect();
        keep.push(metadata_path.clone());

        let patterns = recipe.prune_patterns(&evaluation.config);
        prune_install_tree(&opts.prefix, &patterns, &keep)?
    } else {
        Vec::new()
    };

    Ok(PackageResult {
        evaluation,
        metadata_path,
        pruned,
    })
}

fn write_rendered(rendered: &RenderedPackage, prefix: &Path) -> Result<PathBuf> {
    tracing::info!("writing metadata to {}", prefix.display());
    rendered.write(prefix)
}
