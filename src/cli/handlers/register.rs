// src/cli/handlers/register.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use std::path::PathBuf;

use crate::core::context::ProjectContext;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Registers a program for use under an alias.")]
struct RegisterArgs {
    /// The alias to register (e.g. cmake, gcc).
    alias: String,

    /// The absolute path to the executable.
    path: PathBuf,

    /// Register the path even though no file exists there yet.
    #[arg(long)]
    force: bool,

    /// Replace an existing binding for this alias.
    #[arg(long = "override")]
    override_existing: bool,

    /// Show what would have been done without doing it.
    #[arg(long)]
    dry_run: bool,
}

pub fn handle(ctx: &mut ProjectContext, args: Vec<String>) -> Result<i32> {
    let register_args = RegisterArgs::try_parse_from(&args)?;

    if !register_args.path.is_file() && !register_args.force {
        println!("No program exists at {}.", register_args.path.display());
        return Ok(1);
    }

    if register_args.dry_run {
        if ctx.has_registered_program(&register_args.alias) && !register_args.override_existing {
            println!(
                "Trying to override {} of {} with {}",
                ctx.path_for_program(&register_args.alias)?.display(),
                register_args.alias.cyan(),
                register_args.path.display()
            );
            return Ok(1);
        }
        println!(
            "Would have added alias {} -> {}",
            register_args.alias.cyan(),
            register_args.path.display()
        );
        return Ok(0);
    }

    if ctx.register_program(
        &register_args.alias,
        &register_args.path,
        register_args.override_existing,
    ) {
        Ok(0)
    } else {
        Ok(1)
    }
}
