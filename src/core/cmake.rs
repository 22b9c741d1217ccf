// src/core/cmake.rs
//
// Integration with CMake's generator selection.

use std::path::Path;

use crate::system::executor::{self, ExecutionError};

/// Makes settings to give the generator for a specific compiler.
///
/// On Windows with no compiler registered, CMake's starred default
/// generator is detected from `cmake --help` and pinned to x64 so repeated
/// `gen` runs stay consistent.
pub fn generator_settings_for_compiler(
    cmake_path: &Path,
    compiler_path: Option<&Path>,
) -> Result<Vec<String>, ExecutionError> {
    let mut settings = Vec::new();
    if let Some(compiler) = compiler_path {
        settings.push(format!("-DCMAKE_C_COMPILER={}", compiler.display()));
    }

    if cfg!(target_os = "windows") {
        if compiler_path.is_none() {
            let help = executor::run_and_capture(
                &[cmake_path.display().to_string(), "--help".to_string()],
                None,
            )?;
            if let Some(generator) = default_generator_from_help(&help) {
                settings.extend([
                    "-G".to_string(),
                    generator,
                    "-A".to_string(),
                    "x64".to_string(),
                ]);
            }
        } else {
            settings.extend(["-G".to_string(), "Unix Makefiles".to_string()]);
        }
    }

    Ok(settings)
}

/// Finds the starred default generator in `cmake --help` output.
fn default_generator_from_help(help: &str) -> Option<String> {
    for line in help.lines() {
        if let Some(rest) = line.strip_prefix('*') {
            let name = rest.split('=').next().unwrap_or(rest);
            return Some(name.replace("[arch]", "").trim().to_string());
        }
    }
    None
}
