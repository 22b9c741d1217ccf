// src/cli/handlers/check.rs

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use crate::cli::handlers::commons;
use crate::core::context::ProjectContext;
use crate::models::{BuildConfig, ContextOverrides};
use crate::system::executor;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Runs tests.")]
struct CheckArgs {
    /// Use a different build directory than the configured one.
    #[arg(long)]
    build_dir: Option<String>,

    /// Changes applied compiler/linker flags and preprocessor defines.
    #[arg(long, value_enum, ignore_case = true)]
    build_config: Option<BuildConfig>,

    /// Run the quicker subset of tests used while iterating.
    #[arg(long)]
    iterate: bool,

    /// Show what would have been done without doing it.
    #[arg(long)]
    dry_run: bool,
}

pub fn handle(ctx: &mut ProjectContext, args: Vec<String>) -> Result<i32> {
    let check_args = CheckArgs::try_parse_from(&args)?;
    let mut ctx = ctx.copy_with_overrides(&ContextOverrides {
        build_dir: check_args.build_dir.clone(),
        build_config: check_args.build_config,
        ..Default::default()
    });

    if !commons::verify_executable_exists(&mut ctx, "cmake") {
        return Ok(1);
    }
    let build_dir = ctx.build_dir();
    if !commons::verify_build_dir_exists(&build_dir) {
        return Ok(1);
    }

    let cmake_path = ctx.path_for_program("cmake")?;
    let cmake_args = check_args_for_target(&cmake_path, check_args.iterate, ctx.build_config());

    if check_args.dry_run {
        println!(
            "Would have run {} in {}",
            cmake_args.join(" "),
            build_dir.display()
        );
        return Ok(0);
    }

    Ok(executor::run_program(&cmake_args, Some(&build_dir))?)
}

fn check_args_for_target(cmake_path: &Path, iterate: bool, config: BuildConfig) -> Vec<String> {
    let check_target = if iterate { "check-iterate" } else { "check" };
    vec![
        cmake_path.display().to_string(),
        "--build".to_string(),
        ".".to_string(),
        "--target".to_string(),
        check_target.to_string(),
        "--config".to_string(),
        config.to_string(),
    ]
}
