// src/cli/handlers/run.rs

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::cli::handlers::build;
use crate::core::context::ProjectContext;
use crate::models::{BuildConfig, ContextOverrides};
use crate::system::multiplatform;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Builds, then runs a demo through the driver.")]
struct RunArgs {
    /// The demo to load at driver startup.
    demo: String,

    /// Use a different build directory than the configured one.
    #[arg(long)]
    build_dir: Option<String>,

    /// Changes applied compiler/linker flags and preprocessor defines.
    #[arg(long, value_enum, ignore_case = true)]
    build_config: Option<BuildConfig>,

    /// Sets the directory from which to load assets.
    #[arg(long)]
    asset_dir: Option<PathBuf>,

    /// Specifies the number of game ticks to run the demo.
    #[arg(long)]
    ticks: Option<u64>,

    /// Runs the demo without the UI starting up.
    #[arg(long)]
    headless: bool,

    /// Show what would have been done without doing it.
    #[arg(long)]
    dry_run: bool,
}

pub fn handle(ctx: &mut ProjectContext, args: Vec<String>) -> Result<i32> {
    let run_args = RunArgs::try_parse_from(&args)?;
    let mut ctx = ctx.copy_with_overrides(&ContextOverrides {
        build_dir: run_args.build_dir.clone(),
        build_config: run_args.build_config,
        asset_dir: run_args.asset_dir.clone(),
        ticks: run_args.ticks,
        headless: run_args.headless.then_some(true),
        ..Default::default()
    });

    // Ensure an up-to-date build before handing the demo to the driver.
    let build_status = build::build_current(&mut ctx, run_args.dry_run)?;
    if build_status != 0 {
        return Ok(build_status);
    }

    let demo_lib = ctx
        .demo_dir()
        .join(multiplatform::root_to_shared_lib(&run_args.demo));
    ctx.set_game(demo_lib);

    if run_args.dry_run {
        println!("Would have run {}", ctx.driver_path().display());
        return Ok(0);
    }

    Ok(ctx.run_driver()?)
}
