// src/cli/handlers/clean.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use std::fs;

use crate::core::context::ProjectContext;
use crate::models::ContextOverrides;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Removes the build directory.")]
struct CleanArgs {
    /// Use a different build directory than the configured one.
    #[arg(long)]
    build_dir: Option<String>,

    /// Show what would have been done without doing it.
    #[arg(long)]
    dry_run: bool,
}

pub fn handle(ctx: &mut ProjectContext, args: Vec<String>) -> Result<i32> {
    let clean_args = CleanArgs::try_parse_from(&args)?;
    let ctx = ctx.copy_with_overrides(&ContextOverrides {
        build_dir: clean_args.build_dir.clone(),
        ..Default::default()
    });

    let build_dir = ctx.build_dir();
    if !build_dir.exists() {
        return Ok(0);
    }
    if !build_dir.is_dir() {
        println!("Build directory {} is not a directory", build_dir.display());
        return Ok(1);
    }

    if clean_args.dry_run {
        println!("Dry run");
        println!("Would have removed: {}", build_dir.display());
        return Ok(0);
    }

    println!("Removing: {}", build_dir.display());
    if let Err(e) = fs::remove_dir_all(&build_dir) {
        eprintln!(
            "{}",
            format!("Error removing {}: {e}", build_dir.display()).red()
        );
        return Ok(1);
    }
    Ok(0)
}
