// src/cli/handlers/gen.rs

use anyhow::Result;
use clap::Parser;
use std::fs;
use std::path::Path;

use crate::cli::handlers::commons;
use crate::core::cmake;
use crate::core::context::ProjectContext;
use crate::models::ContextOverrides;
use crate::system::executor;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Runs the generator to make build files like Visual Studio solutions."
)]
struct GenArgs {
    /// Use a different build directory than the configured one.
    #[arg(long)]
    build_dir: Option<String>,

    /// Use a registered program as the compiler.
    #[arg(long)]
    compiler: Option<String>,

    /// Delete any preexisting build directory.
    #[arg(long)]
    force: bool,

    /// Use ccache (if available).
    #[arg(long)]
    enable_ccache: bool,

    /// Show what would have been done without doing it.
    #[arg(long)]
    dry_run: bool,
}

pub fn handle(ctx: &mut ProjectContext, args: Vec<String>) -> Result<i32> {
    let gen_args = GenArgs::try_parse_from(&args)?;
    let mut ctx = ctx.copy_with_overrides(&ContextOverrides {
        build_dir: gen_args.build_dir.clone(),
        compiler: gen_args.compiler.clone(),
        ..Default::default()
    });

    if !commons::verify_executable_exists(&mut ctx, "cmake") {
        return Ok(1);
    }
    if let Some(compiler) = ctx.compiler().map(str::to_string)
        && !commons::verify_executable_exists(&mut ctx, &compiler)
    {
        return Ok(1);
    }

    let build_dir = ctx.build_dir();
    if build_dir.is_file() {
        println!(
            "Build directory {} exists as something other than a directory",
            build_dir.display()
        );
        return Ok(1);
    }
    if build_dir.is_dir() {
        if !gen_args.force {
            println!(
                "{} exists.  Use --force to wipe and recreate the build dir.",
                build_dir.display()
            );
            return Ok(1);
        }
        if gen_args.dry_run {
            println!(
                "Would have removed previously existing directory {}",
                build_dir.display()
            );
        } else {
            fs::remove_dir_all(&build_dir)?;
        }
    }

    if gen_args.dry_run {
        println!("Would have created {}", build_dir.display());
    } else {
        println!("Creating build directory {}", build_dir.display());
        fs::create_dir_all(&build_dir)?;
    }

    let cmake_path = ctx.path_for_program("cmake")?;
    let compiler_path = match ctx.compiler() {
        Some(alias) => Some(ctx.path_for_program(alias)?),
        None => None,
    };
    let cmake_args = generate_args(
        &cmake_path,
        compiler_path.as_deref(),
        gen_args.enable_ccache,
    )?;

    if gen_args.dry_run {
        println!(
            "Would have run {} in {}",
            cmake_args.join(" "),
            build_dir.display()
        );
        return Ok(0);
    }

    Ok(executor::run_program(&cmake_args, Some(&build_dir))?)
}

/// Assembles the generator invocation for the configured compiler.
fn generate_args(
    cmake_path: &Path,
    compiler_path: Option<&Path>,
    enable_ccache: bool,
) -> Result<Vec<String>> {
    let mut cmake_args = vec![cmake_path.display().to_string(), "..".to_string()];
    if enable_ccache {
        cmake_args.push("-DCN_ENABLE_CCACHE=1".to_string());
    }
    cmake_args.extend(cmake::generator_settings_for_compiler(
        cmake_path,
        compiler_path,
    )?);
    Ok(cmake_args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn generator_argv_starts_with_cmake_and_parent_dir() {
        let argv = generate_args(Path::new("/usr/bin/cmake"), None, false).unwrap();
        assert_eq!(argv, vec!["/usr/bin/cmake", ".."]);
    }

    #[cfg(unix)]
    #[test]
    fn generator_argv_includes_compiler_define_when_set() {
        let argv =
            generate_args(Path::new("/usr/bin/cmake"), Some(Path::new("/usr/bin/clang")), false)
                .unwrap();
        assert_eq!(
            argv,
            vec!["/usr/bin/cmake", "..", "-DCMAKE_C_COMPILER=/usr/bin/clang"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn ccache_flag_adds_the_define() {
        let argv = generate_args(Path::new("/usr/bin/cmake"), None, true).unwrap();
        assert_eq!(argv, vec!["/usr/bin/cmake", "..", "-DCN_ENABLE_CCACHE=1"]);
    }

    #[cfg(unix)]
    fn fake_cmake(home: &Path, script: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = home.join("fake-cmake");
        fs::write(&path, script).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn gen_creates_the_build_dir_and_runs_the_registered_cmake() {
        let home = tempfile::tempdir().unwrap();
        let cmake = fake_cmake(home.path(), "#!/bin/sh\nexit 0\n");

        let mut ctx = ProjectContext::new(home.path());
        assert!(ctx.register_program("cmake", &cmake, false));

        let code = handle(&mut ctx, vec![]).unwrap();
        assert_eq!(code, 0);
        assert!(ctx.build_dir().is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn gen_propagates_the_generator_exit_code() {
        let home = tempfile::tempdir().unwrap();
        let cmake = fake_cmake(home.path(), "#!/bin/sh\nexit 3\n");

        let mut ctx = ProjectContext::new(home.path());
        assert!(ctx.register_program("cmake", &cmake, false));

        let code = handle(&mut ctx, vec![]).unwrap();
        assert_eq!(code, 3);
    }
}
