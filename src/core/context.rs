// src/core/context.rs
//
// The long-term environment in which commands run: the build flavor, the
// run flavor, and the registered program table, persisted as one small
// JSON file in the project home.

use clap::ValueEnum;
use colored::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::{
    CONFIG_FILENAME, DEFAULT_BUILD_DIR, DEMO_DIR_NAME, DRIVER_ROOT_NAME, EXPORT_DIR_NAME,
};
use crate::models::{BuildConfig, BuildFlavor, ConfigFile, ContextOverrides, RunFlavor};
use crate::system::{executor, multiplatform};

#[derive(Error, Debug)]
pub enum ContextError {
    #[error("No registered path for '{alias}'.")]
    MissingRegistration { alias: String },
    #[error("Could not read config file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed config file '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not write config file '{path}': {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A concise description of the environment in which commands run.
///
/// Commands never mutate a caller's context in place for per-invocation
/// flags; they work on a copy from [`ProjectContext::copy_with_overrides`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectContext {
    home: PathBuf,
    build: BuildFlavor,
    run: RunFlavor,
    registered_programs: BTreeMap<String, PathBuf>,
}

impl ProjectContext {
    /// Creates a default context rooted at a home directory. Nothing is
    /// read from disk.
    pub fn new(home: &Path) -> Self {
        let home = std::path::absolute(home).unwrap_or_else(|_| home.to_path_buf());
        Self {
            home,
            build: BuildFlavor::default(),
            run: RunFlavor::default(),
            registered_programs: BTreeMap::new(),
        }
    }

    /// Creates a context from a home directory and merges in the persisted
    /// config if one exists. A missing file is normal first-run state; a
    /// malformed file is reported and the defaults stand. Neither case
    /// touches the on-disk file.
    pub fn load_or_default(home: &Path) -> Self {
        let mut ctx = Self::new(home);
        match ctx.load() {
            Ok(true) => log::debug!("Loaded config from {}", ctx.config_path().display()),
            Ok(false) => println!("No config file found at {}", ctx.config_path().display()),
            Err(e) => eprintln!(
                "{}",
                format!("Ignoring config and using defaults: {e}").yellow()
            ),
        }
        ctx
    }

    /// Merges the persisted config file into this context. Returns `false`
    /// when no file exists. A parse failure leaves the context untouched.
    pub fn load(&mut self) -> Result<bool, ContextError> {
        let path = self.config_path();
        if !path.is_file() {
            return Ok(false);
        }

        let contents = fs::read_to_string(&path).map_err(|e| ContextError::ConfigRead {
            path: path.clone(),
            source: e,
        })?;
        let config: ConfigFile =
            serde_json::from_str(&contents).map_err(|e| ContextError::ConfigParse {
                path: path.clone(),
                source: e,
            })?;

        self.registered_programs = config.registered_programs;
        self.apply_overrides(&ContextOverrides {
            build_dir: config.build_dir,
            build_config: config.build_config,
            compiler: config.compiler,
            game: config.game,
            asset_dir: config.asset_dir,
            ticks: config.ticks,
            headless: config.headless,
        });
        Ok(true)
    }

    /// Persists the context to the `.crank` file in the home directory.
    pub fn save(&self) -> Result<(), ContextError> {
        let path = self.config_path();
        let contents = serde_json::to_string_pretty(&self.to_config_file())
            .map_err(|e| ContextError::ConfigParse {
                path: path.clone(),
                source: e,
            })?;
        fs::write(&path, contents).map_err(|e| ContextError::ConfigWrite {
            path: path.clone(),
            source: e,
        })
    }

    /// Flattens both flavors and the program table into one mapping, used
    /// by `env` display and by `save`.
    pub fn dump(&self) -> serde_json::Value {
        serde_json::to_value(self.to_config_file()).unwrap_or(serde_json::Value::Null)
    }

    fn to_config_file(&self) -> ConfigFile {
        ConfigFile {
            build_dir: Some(self.build.build_dir.clone()),
            build_config: Some(self.build.build_config),
            compiler: self.build.compiler.clone(),
            game: self.run.game.clone(),
            asset_dir: self.run.asset_dir.clone(),
            ticks: self.run.ticks,
            headless: Some(self.run.headless),
            registered_programs: self.registered_programs.clone(),
            home: Some(self.home.clone()),
        }
    }

    /// Creates an independent context with the given overrides applied.
    /// The original is left unmodified.
    pub fn copy_with_overrides(&self, overrides: &ContextOverrides) -> Self {
        let mut ctx = self.clone();
        ctx.apply_overrides(overrides);
        ctx
    }

    fn apply_overrides(&mut self, overrides: &ContextOverrides) {
        self.build.apply_overrides(overrides);
        self.run.apply_overrides(overrides);
    }

    // --- Path accessors ---

    /// Project root directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn config_path(&self) -> PathBuf {
        self.home.join(CONFIG_FILENAME)
    }

    /// The build directory, resolved against the home directory.
    pub fn build_dir(&self) -> PathBuf {
        let dir = self.home.join(&self.build.build_dir);
        std::path::absolute(&dir).unwrap_or(dir)
    }

    /// Absolute directory path for where built demos are stored.
    pub fn demo_dir(&self) -> PathBuf {
        self.build_dir().join(DEMO_DIR_NAME)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.build_dir().join(EXPORT_DIR_NAME)
    }

    /// The primary directory for Calendon library source.
    pub fn source_dir(&self) -> PathBuf {
        self.home.join("src").join("calendon")
    }

    /// The path to the driver executable, when built.
    pub fn driver_path(&self) -> PathBuf {
        self.build_dir()
            .join(multiplatform::root_to_executable(DRIVER_ROOT_NAME))
    }

    // --- Flavor accessors ---

    pub fn build_config(&self) -> BuildConfig {
        self.build.build_config
    }

    pub fn compiler(&self) -> Option<&str> {
        self.build.compiler.as_deref()
    }

    pub fn set_game(&mut self, game: PathBuf) {
        self.run.game = Some(game);
    }

    // --- Registered programs ---

    /// Binds an alias to an executable path. Refuses to clobber an
    /// existing binding unless `override_existing` is set; a conflict is
    /// reported and the state is left unchanged.
    pub fn register_program(&mut self, alias: &str, path: &Path, override_existing: bool) -> bool {
        if let Some(existing) = self.registered_programs.get(alias)
            && !override_existing
        {
            println!(
                "Trying to override {} of {} with {}",
                existing.display(),
                alias.cyan(),
                path.display()
            );
            return false;
        }

        self.registered_programs
            .insert(alias.to_string(), path.to_path_buf());
        true
    }

    pub fn has_registered_program(&self, alias: &str) -> bool {
        self.registered_programs.contains_key(alias)
    }

    /// Looks up the registered path for an alias. An unregistered alias is
    /// an error, never a silently-empty path.
    pub fn path_for_program(&self, alias: &str) -> Result<PathBuf, ContextError> {
        self.registered_programs
            .get(alias)
            .cloned()
            .ok_or_else(|| ContextError::MissingRegistration {
                alias: alias.to_string(),
            })
    }

    // --- Defaults ---

    /// Sets a defaulted value by user-facing name. Returns false for names
    /// that are not defaultable.
    pub fn set_default(&mut self, name: &str, value: &str) -> bool {
        match name {
            "compiler" => {
                self.build.compiler = Some(value.to_string());
                true
            }
            "build-dir" => {
                self.build.build_dir = value.to_string();
                true
            }
            "build-config" => match BuildConfig::from_str(value, true) {
                Ok(config) => {
                    self.build.build_config = config;
                    true
                }
                Err(_) => {
                    eprintln!("{}", format!("Unknown build config '{value}'").yellow());
                    false
                }
            },
            "game" => {
                self.run.game = Some(PathBuf::from(value));
                true
            }
            "asset-dir" => {
                self.run.asset_dir = Some(PathBuf::from(value));
                true
            }
            _ => false,
        }
    }

    /// Reverts a defaulted value by user-facing name.
    pub fn clear_default(&mut self, name: &str) -> bool {
        match name {
            "compiler" => {
                self.build.compiler = None;
                true
            }
            "build-dir" => {
                self.build.build_dir = DEFAULT_BUILD_DIR.to_string();
                true
            }
            "build-config" => {
                self.build.build_config = BuildConfig::default();
                true
            }
            "game" => {
                self.run.game = None;
                true
            }
            "asset-dir" => {
                self.run.asset_dir = None;
                true
            }
            _ => false,
        }
    }

    // --- Driver ---

    /// Runs the built driver with this context's run flavor.
    pub fn run_driver(&self) -> Result<i32, executor::ExecutionError> {
        let mut args = vec![self.driver_path().display().to_string()];
        args.extend(self.run.to_driver_args());
        executor::run_program(&args, Some(&self.build_dir()))
    }
}
