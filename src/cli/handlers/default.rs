// src/cli/handlers/default.rs

use anyhow::Result;
use clap::Parser;

use crate::core::context::ProjectContext;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Sets a default compiler, build-dir, build-config, game, or asset-dir."
)]
struct DefaultArgs {
    /// The value to default: compiler, build-dir, build-config, game, or asset-dir.
    name: String,

    /// The value to use.
    value: String,
}

pub fn handle(ctx: &mut ProjectContext, args: Vec<String>) -> Result<i32> {
    let default_args = DefaultArgs::try_parse_from(&args)?;
    if ctx.set_default(&default_args.name, &default_args.value) {
        Ok(0)
    } else {
        println!("'{}' is not a defaultable value.", default_args.name);
        Ok(1)
    }
}
