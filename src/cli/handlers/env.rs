// src/cli/handlers/env.rs

use anyhow::Result;
use clap::Parser;

use crate::core::context::ProjectContext;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Prints the current Crank environment.")]
struct EnvArgs {}

pub fn handle(ctx: &mut ProjectContext, args: Vec<String>) -> Result<i32> {
    EnvArgs::try_parse_from(&args)?;
    println!("{}", serde_json::to_string_pretty(&ctx.dump())?);
    Ok(0)
}
