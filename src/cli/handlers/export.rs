// src/cli/handlers/export.rs

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::constants::EXPORT_PACKAGE_NAME;
use crate::core::context::ProjectContext;
use crate::system::multiplatform;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Exports the currently built libraries and headers."
)]
struct ExportArgs {
    /// Export somewhere other than the build directory.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

pub fn handle(ctx: &mut ProjectContext, args: Vec<String>) -> Result<i32> {
    let export_args = ExportArgs::try_parse_from(&args)?;

    let export_dir = export_args
        .output_dir
        .unwrap_or_else(|| ctx.export_dir())
        .join(EXPORT_PACKAGE_NAME);
    println!(
        "Exporting from {} to {}",
        ctx.build_dir().display(),
        export_dir.display()
    );

    if export_dir.is_dir() {
        println!("Removing export directory: {}", export_dir.display());
        fs::remove_dir_all(&export_dir)
            .with_context(|| format!("Could not remove {}", export_dir.display()))?;
    }

    let header_dir = export_dir.join("include").join("calendon");
    copy_headers(&ctx.source_dir(), &header_dir)?;
    println!("Exported Headers:");
    println!(" - {}", header_dir.display());

    // TODO: Allow export of architectures other than x64.
    let lib_dir = export_dir.join("lib").join("x64");
    fs::create_dir_all(&lib_dir)
        .with_context(|| format!("Could not create {}", lib_dir.display()))?;

    println!("Exporting Libraries:");
    for lib in built_libraries(&ctx.build_dir()) {
        let Some(file_name) = lib.file_name() else {
            continue;
        };
        fs::copy(&lib, lib_dir.join(file_name))
            .with_context(|| format!("Could not copy {}", lib.display()))?;
        println!("- {}", file_name.to_string_lossy());
    }

    println!("Exported Calendon to: {}", export_dir.display());
    Ok(0)
}

/// Copies the header tree, leaving out sources and build files.
fn copy_headers(source_dir: &Path, header_dir: &Path) -> Result<()> {
    for entry in WalkDir::new(source_dir) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source_dir)
            .with_context(|| format!("{} escaped the header root", entry.path().display()))?;
        let target = header_dir.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Could not create {}", target.display()))?;
        } else if should_export_header(entry.path()) {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Could not copy {}", entry.path().display()))?;
        }
    }
    Ok(())
}

fn should_export_header(path: &Path) -> bool {
    if path.extension().is_some_and(|ext| ext == "c") {
        return false;
    }
    path.file_name().is_none_or(|name| name != "CMakeLists.txt")
}

/// Shared and static libraries sitting at the top of the build directory.
fn built_libraries(build_dir: &Path) -> Vec<PathBuf> {
    let mut libraries = Vec::new();
    if let Ok(entries) = fs::read_dir(build_dir) {
        for entry in entries.flatten() {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if multiplatform::is_shared_lib(&file_name) || multiplatform::is_static_lib(&file_name)
            {
                libraries.push(entry.path());
            }
        }
    }
    libraries.sort();
    libraries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_and_build_files_are_not_exported() {
        assert!(should_export_header(Path::new("src/calendon/log.h")));
        assert!(!should_export_header(Path::new("src/calendon/log.c")));
        assert!(!should_export_header(Path::new("src/calendon/CMakeLists.txt")));
    }

    #[test]
    fn header_copy_preserves_subdirectories() {
        let source = tempfile::tempdir().unwrap();
        fs::create_dir(source.path().join("math")).unwrap();
        fs::write(source.path().join("cn.h"), "").unwrap();
        fs::write(source.path().join("cn.c"), "").unwrap();
        fs::write(source.path().join("CMakeLists.txt"), "").unwrap();
        fs::write(source.path().join("math").join("vec.h"), "").unwrap();

        let target = tempfile::tempdir().unwrap();
        copy_headers(source.path(), target.path()).unwrap();

        assert!(target.path().join("cn.h").is_file());
        assert!(target.path().join("math").join("vec.h").is_file());
        assert!(!target.path().join("cn.c").exists());
        assert!(!target.path().join("CMakeLists.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn library_listing_picks_up_shared_and_static_libs() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["libcalendon.so", "libcalendon.a", "driver", "notes.md"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let found: Vec<String> = built_libraries(dir.path())
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        assert_eq!(found, vec!["libcalendon.a", "libcalendon.so"]);
    }
}
