// src/system/multiplatform.rs
//
// File name conversions between generic base names and their
// platform-specific executable and library forms.

use std::path::PathBuf;
use thiserror::Error;

use crate::system::executor;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NamingError {
    #[error("'{0}' does not match the platform shared library pattern.")]
    NotASharedLib(String),
}

/// Produces an executable file name from a generic base name.
pub fn root_to_executable(named: &str) -> String {
    if cfg!(target_os = "windows") {
        format!("{named}.exe")
    } else {
        named.to_string()
    }
}

/// Produces a shared library file name from a generic base name.
pub fn root_to_shared_lib(named: &str) -> String {
    if cfg!(target_os = "windows") {
        format!("{named}.dll")
    } else {
        format!("lib{named}.so")
    }
}

/// Converts an OS-specific shared library file name back to its generic
/// base name.
pub fn shared_lib_to_root(shared_lib: &str) -> Result<String, NamingError> {
    if cfg!(target_os = "windows") {
        shared_lib
            .strip_suffix(".dll")
            .map(str::to_string)
            .ok_or_else(|| NamingError::NotASharedLib(shared_lib.to_string()))
    } else {
        shared_lib
            .strip_prefix("lib")
            .and_then(|s| s.strip_suffix(".so"))
            .map(str::to_string)
            .ok_or_else(|| NamingError::NotASharedLib(shared_lib.to_string()))
    }
}

/// Whether a file name looks like a shared library on this platform.
pub fn is_shared_lib(file_name: &str) -> bool {
    shared_lib_to_root(file_name).is_ok()
}

/// Whether a file name looks like a static library on this platform.
pub fn is_static_lib(file_name: &str) -> bool {
    if cfg!(target_os = "windows") {
        file_name.ends_with(".lib")
    } else {
        file_name.ends_with(".a")
    }
}

/// Asks the OS path search (`which`/`where`) for the program it would run
/// for a name. Returns `None` when no candidate is found.
pub fn recommended_executable(program_name: &str) -> Option<PathBuf> {
    let locator = if cfg!(target_os = "windows") {
        "where"
    } else {
        "which"
    };

    let command_line = vec![locator.to_string(), program_name.to_string()];
    match executor::run_and_capture(&command_line, None) {
        // `where` can report several candidates; the first one wins.
        Ok(output) => output.lines().next().map(|line| PathBuf::from(line.trim())),
        Err(e) => {
            log::debug!("No executable found for '{}': {}", program_name, e);
            None
        }
    }
}
