// src/cli/handlers/build.rs

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use crate::cli::handlers::commons;
use crate::core::context::ProjectContext;
use crate::models::{BuildConfig, ContextOverrides};
use crate::system::executor;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Builds using the current project configuration.")]
struct BuildArgs {
    /// Use a different build directory than the configured one.
    #[arg(long)]
    build_dir: Option<String>,

    /// Changes applied compiler/linker flags and preprocessor defines.
    #[arg(long, value_enum, ignore_case = true)]
    build_config: Option<BuildConfig>,

    /// Show what would have been done without doing it.
    #[arg(long)]
    dry_run: bool,
}

pub fn handle(ctx: &mut ProjectContext, args: Vec<String>) -> Result<i32> {
    let build_args = BuildArgs::try_parse_from(&args)?;
    let mut ctx = ctx.copy_with_overrides(&ContextOverrides {
        build_dir: build_args.build_dir.clone(),
        build_config: build_args.build_config,
        ..Default::default()
    });
    build_current(&mut ctx, build_args.dry_run)
}

/// Builds a context's configuration. Shared with `run`, which must ensure
/// an up-to-date build before launching the driver.
pub(crate) fn build_current(ctx: &mut ProjectContext, dry_run: bool) -> Result<i32> {
    if !commons::verify_executable_exists(ctx, "cmake") {
        return Ok(1);
    }
    let build_dir = ctx.build_dir();
    if !commons::verify_build_dir_exists(&build_dir) {
        return Ok(1);
    }

    let cmake_path = ctx.path_for_program("cmake")?;
    let cmake_args = build_args(&cmake_path, parallelism(), ctx.build_config());

    if dry_run {
        println!(
            "Would have run {} in {}",
            cmake_args.join(" "),
            build_dir.display()
        );
        return Ok(0);
    }

    Ok(executor::run_program(&cmake_args, Some(&build_dir))?)
}

fn build_args(cmake_path: &Path, jobs: usize, config: BuildConfig) -> Vec<String> {
    vec![
        cmake_path.display().to_string(),
        "--build".to_string(),
        ".".to_string(),
        "--parallel".to_string(),
        jobs.to_string(),
        "--config".to_string(),
        config.to_string(),
    ]
}

fn parallelism() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}
