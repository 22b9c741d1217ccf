// src/cli/handlers/reset.rs

use anyhow::Result;
use clap::Parser;

use crate::core::context::ProjectContext;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Reverts a defaulted compiler, build-dir, build-config, game, or asset-dir."
)]
struct ResetArgs {
    /// The defaulted value to clear.
    name: String,
}

pub fn handle(ctx: &mut ProjectContext, args: Vec<String>) -> Result<i32> {
    let reset_args = ResetArgs::try_parse_from(&args)?;
    if ctx.clear_default(&reset_args.name) {
        Ok(0)
    } else {
        println!("'{}' is not a defaultable value.", reset_args.name);
        Ok(1)
    }
}
