// src/constants.rs

/// The name of the persisted configuration file in the project home directory.
pub const CONFIG_FILENAME: &str = ".crank";

/// Environment variable supplying the default project root.
pub const HOME_ENV_VAR: &str = "CALENDON_HOME";

/// Default build directory, relative to the project home.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Base name of the driver executable produced by a build.
pub const DRIVER_ROOT_NAME: &str = "calendon-driver";

/// Subdirectory of the build dir where demo shared libraries land.
pub const DEMO_DIR_NAME: &str = "demos";

/// Subdirectory of the build dir used by `export`.
pub const EXPORT_DIR_NAME: &str = "exported";

/// Version-stamped top-level directory name written by `export`.
pub const EXPORT_PACKAGE_NAME: &str = "calendon-0.0.1";
