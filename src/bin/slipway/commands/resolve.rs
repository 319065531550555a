//! `slipway resolve` command

use anyhow::Result;

use crate::cli::RecipeArgs;
use slipway::resolver::version::triple;
use slipway::Resolver;
use slipway::RecipeRegistry;

pub fn execute(args: RecipeArgs) -> Result<()> {
    let registry = RecipeRegistry::new();
    let (recipe, request) = super::prepare(&registry, &args)?;
    let config = Resolver::new(recipe).resolve(&request)?;

    println!("{} {}", config.recipe(), triple(config.version()));
    println!("host: {}", config.host());
    if config.options().is_empty() {
        println!("options: (none)");
    } else {
        println!("options:");
        for (name, value) in config.options().iter() {
            println!("  {} = {}", name, value);
        }
    }

    Ok(())
}
