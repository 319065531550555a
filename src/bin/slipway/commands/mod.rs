//! Command implementations

pub mod completions;
pub mod definitions;
pub mod graph;
pub mod list;
pub mod package;
pub mod package_id;
pub mod requirements;
pub mod resolve;

use anyhow::Result;

use crate::cli::RecipeArgs;
use slipway::ops::{evaluate, Evaluation};
use slipway::{GlobalContext, Recipe, RecipeRegistry, ResolveRequest};

/// Look up the recipe and build its request from flags and config files.
pub fn prepare<'r>(
    registry: &'r RecipeRegistry,
    args: &RecipeArgs,
) -> Result<(&'r dyn Recipe, ResolveRequest)> {
    let ctx = GlobalContext::new()?;
    let recipe = registry.find(&args.recipe)?;
    let request = args.to_request(recipe.name(), &ctx.load_config())?;
    Ok((recipe, request))
}

/// Run the in-memory pipeline for a command that only reports.
pub fn evaluate_args(args: &RecipeArgs) -> Result<Evaluation> {
    let registry = RecipeRegistry::new();
    let (recipe, request) = prepare(&registry, args)?;
    Ok(evaluate(recipe, &request)?)
}
