//! `slipway list` command

use anyhow::Result;

use slipway::RecipeRegistry;

pub fn execute() -> Result<()> {
    let registry = RecipeRegistry::new();

    for recipe in registry.all() {
        let info = recipe.info();
        println!("{} - {}", info.name, info.description);
        println!("    license:  {}", info.license);
        println!("    homepage: {}", info.homepage);
        if !info.topics.is_empty() {
            println!("    topics:   {}", info.topics.join(", "));
        }
        println!("    versions: {}", recipe.supported_versions());
        if info.header_only {
            println!("    header-only");
        }

        let options = recipe.options();
        if !options.is_empty() {
            println!("    options:");
            for decl in &options {
                println!(
                    "      {} = {} [{}]  {}",
                    decl.name,
                    decl.default,
                    decl.allowed(),
                    decl.description
                );
            }
        }

        let features = recipe.upstream_features();
        if !features.is_empty() {
            println!("    needs upstream:");
            for feature in &features {
                println!("      {}:{}={}", feature.package, feature.option, feature.value);
            }
        }
        println!();
    }

    Ok(())
}
