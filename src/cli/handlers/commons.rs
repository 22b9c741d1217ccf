// src/cli/handlers/commons.rs
//
// Validation helpers shared by command handlers. These return bools and
// print their own guidance: commands probe before committing, and a failed
// probe should end the command with exit code 1, not tear down a shell
// session.

use colored::*;
use dialoguer::{Confirm, theme::ColorfulTheme};
use std::path::Path;

use crate::core::context::ProjectContext;
use crate::system::multiplatform;

/// Returns true if an alias maps to an existing executable file, providing
/// user messaging when it does not. If the alias is unregistered but the
/// OS path search has a candidate, offers to adopt it.
pub fn verify_executable_exists(ctx: &mut ProjectContext, alias: &str) -> bool {
    if !ctx.has_registered_program(alias) {
        println!("No alias exists for {}", alias.cyan());

        let probe_name = multiplatform::root_to_executable(alias);
        if let Some(recommended) = multiplatform::recommended_executable(&probe_name) {
            let adopt = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(format!(
                    "Use recommended path for alias '{}': {}?",
                    alias,
                    recommended.display()
                ))
                .default(false)
                .interact()
                .unwrap_or(false);
            if adopt {
                println!("Setting alias {} -> {}", alias.cyan(), recommended.display());
                return ctx.register_program(alias, &recommended, false);
            }
        }

        println!("Use `crank register ALIAS PATH` to register a program for use.");
        println!("Example: crank register cmake \"C:/Program Files/CMake/bin/cmake.exe\"");
        return false;
    }

    let Ok(program_path) = ctx.path_for_program(alias) else {
        return false;
    };
    if !program_path.is_file() {
        println!(
            "Executable path for {} does not exist at {}",
            alias.cyan(),
            program_path.display()
        );
        return false;
    }
    true
}

/// Returns true if the build dir exists while providing user messaging.
pub fn verify_build_dir_exists(build_dir: &Path) -> bool {
    if build_dir.is_file() {
        println!(
            "Build directory {} exists as something other than a directory",
            build_dir.display()
        );
        return false;
    }
    if !build_dir.is_dir() {
        println!("Build directory {} does not exist", build_dir.display());
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_dir_check_requires_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(verify_build_dir_exists(dir.path()));

        let missing = dir.path().join("not-there");
        assert!(!verify_build_dir_exists(&missing));

        let file = dir.path().join("a-file");
        std::fs::write(&file, "x").unwrap();
        assert!(!verify_build_dir_exists(&file));
    }
}
