// src/cli/handlers/save.rs

use anyhow::Result;
use clap::Parser;

use crate::core::context::ProjectContext;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Saves the current Crank context to file.")]
struct SaveArgs {}

pub fn handle(ctx: &mut ProjectContext, args: Vec<String>) -> Result<i32> {
    SaveArgs::try_parse_from(&args)?;
    ctx.save()?;
    println!("Saved {}", ctx.config_path().display());
    Ok(0)
}
