//! `slipway package` command

use anyhow::Result;

use crate::cli::PackageArgs;
use slipway::ops::{package, PackageOptions};
use slipway::{GlobalContext, RecipeRegistry};

pub fn execute(args: PackageArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let registry = RecipeRegistry::new();
    let (recipe, request) = super::prepare(&registry, &args.recipe)?;

    let opts = PackageOptions::new(ctx.resolve_path(&args.prefix)).with_prune(args.prune);
    let result = package(recipe, &request, &opts)?;

    let metadata = &result.evaluation.rendered.metadata;
    if !result.pruned.is_empty() {
        println!("Pruned {} paths", result.pruned.len());
    }
    for shim in &metadata.shims {
        println!("Generated {}", shim.path);
    }
    println!(
        "Emitted {} {} ({} components) to {}",
        metadata.name,
        metadata.version,
        metadata.components.len(),
        result.metadata_path.display()
    );

    Ok(())
}
