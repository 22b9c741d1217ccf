// src/cli/handlers/demo.rs

use anyhow::Result;
use clap::Parser;
use std::fs;
use std::path::Path;

use crate::core::context::ProjectContext;
use crate::system::multiplatform;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Prints all currently built demos which can be run.")]
struct DemoArgs {}

pub fn handle(ctx: &mut ProjectContext, args: Vec<String>) -> Result<i32> {
    DemoArgs::try_parse_from(&args)?;

    println!("Demos:");
    for name in demo_names_in(&ctx.demo_dir()) {
        println!("{name}");
    }
    Ok(0)
}

/// The generic names of every demo shared library in a directory.
fn demo_names_in(dir: &Path) -> Vec<String> {
    let mut names = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if let Ok(root) = multiplatform::shared_lib_to_root(&file_name) {
                names.push(root);
            }
        }
    }
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn only_shared_libraries_are_listed() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["libplanets.so", "libpong.so", "notes.txt", "libstatic.a"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        assert_eq!(demo_names_in(dir.path()), vec!["planets", "pong"]);
    }

    #[test]
    fn a_missing_demo_dir_lists_nothing() {
        assert!(demo_names_in(Path::new("/no/such/dir")).is_empty());
    }
}
