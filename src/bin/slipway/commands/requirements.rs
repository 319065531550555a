//! `slipway requirements` command

use anyhow::Result;

use crate::cli::RecipeArgs;

pub fn execute(args: RecipeArgs) -> Result<()> {
    let evaluation = super::evaluate_args(&args)?;

    for requirement in &evaluation.requirements {
        println!("{}", requirement);
    }

    Ok(())
}
