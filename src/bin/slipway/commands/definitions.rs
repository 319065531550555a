//! `slipway definitions` command

use anyhow::Result;

use crate::cli::RecipeArgs;

pub fn execute(args: RecipeArgs) -> Result<()> {
    let evaluation = super::evaluate_args(&args)?;

    for arg in evaluation.definitions.to_args() {
        println!("{}", arg);
    }

    Ok(())
}
