// src/bin/crank.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use crank::{
    cli::{Cli, dispatcher, shell},
    constants::HOME_ENV_VAR,
    core::context::ProjectContext,
};
use std::env;
use std::path::PathBuf;

fn main() {
    env_logger::init();

    match run_cli(Cli::parse()) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("\n{}: {:#}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run_cli(cli: Cli) -> Result<i32> {
    let home = cli
        .home
        .clone()
        .or_else(|| env::var_os(HOME_ENV_VAR).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    log::debug!("Using project home {}", home.display());

    let mut ctx = ProjectContext::load_or_default(&home);

    let mut args = cli.args;
    if args.is_empty() {
        shell::run(&mut ctx)?;
        return Ok(0);
    }

    let name = args.remove(0);
    dispatcher::dispatch(&mut ctx, &name, args)
}
