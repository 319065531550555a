//! `slipway package-id` command

use anyhow::Result;

use crate::cli::RecipeArgs;

pub fn execute(args: RecipeArgs) -> Result<()> {
    let evaluation = super::evaluate_args(&args)?;
    println!("{}", evaluation.package_id);
    Ok(())
}
