//! `slipway graph` command

use anyhow::Result;

use crate::cli::RecipeArgs;

pub fn execute(args: RecipeArgs) -> Result<()> {
    let evaluation = super::evaluate_args(&args)?;
    let graph = &evaluation.graph;

    for component in graph.topological_order() {
        println!("{} ({})", component.name, component.target);

        let count = component.requires.len();
        for (i, dep) in component.requires.iter().enumerate() {
            let branch = if i + 1 == count { "└── " } else { "├── " };
            println!("{}{}", branch, dep);
        }
    }

    let roots: Vec<&str> = graph.roots().into_iter().map(|c| c.name.as_str()).collect();
    println!();
    println!("roots: {}", roots.join(", "));

    Ok(())
}
