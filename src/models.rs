// src/models.rs

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::constants::DEFAULT_BUILD_DIR;

/// Build configuration passed through to CMake's `--config`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BuildConfig {
    #[default]
    Debug,
    Release,
}

impl fmt::Display for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "Debug"),
            Self::Release => write!(f, "Release"),
        }
    }
}

/// Enough information to do a build: where the output goes, the build
/// config, and which registered compiler (if any) to hand to the generator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BuildFlavor {
    pub build_dir: String,
    pub build_config: BuildConfig,
    pub compiler: Option<String>,
}

impl Default for BuildFlavor {
    fn default() -> Self {
        Self {
            build_dir: DEFAULT_BUILD_DIR.to_string(),
            build_config: BuildConfig::default(),
            compiler: None,
        }
    }
}

impl BuildFlavor {
    /// Applies a sparse override patch. `None` fields leave the current
    /// value untouched.
    pub fn apply_overrides(&mut self, overrides: &ContextOverrides) {
        if let Some(build_dir) = &overrides.build_dir {
            self.build_dir = build_dir.clone();
        }
        if let Some(build_config) = overrides.build_config {
            self.build_config = build_config;
        }
        if let Some(compiler) = &overrides.compiler {
            self.compiler = Some(compiler.clone());
        }
    }
}

/// Environment specification of how to do a run of the driver.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunFlavor {
    pub game: Option<PathBuf>,
    pub asset_dir: Option<PathBuf>,
    pub ticks: Option<u64>,
    pub headless: bool,
}

impl RunFlavor {
    pub fn apply_overrides(&mut self, overrides: &ContextOverrides) {
        if let Some(game) = &overrides.game {
            self.game = Some(game.clone());
        }
        if let Some(asset_dir) = &overrides.asset_dir {
            self.asset_dir = Some(asset_dir.clone());
        }
        if let Some(ticks) = overrides.ticks {
            self.ticks = Some(ticks);
        }
        if let Some(headless) = overrides.headless {
            self.headless = headless;
        }
    }

    /// Converts this run flavor into arguments readable by the driver.
    pub fn to_driver_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(game) = &self.game {
            args.push("--game".to_string());
            args.push(game.display().to_string());
        }
        if let Some(asset_dir) = &self.asset_dir {
            args.push("--asset-dir".to_string());
            args.push(asset_dir.display().to_string());
        }
        if let Some(ticks) = self.ticks
            && ticks > 0
        {
            args.push("--tick-limit".to_string());
            args.push(ticks.to_string());
        }
        if self.headless {
            args.push("--headless".to_string());
        }
        args
    }
}

/// A sparse patch applied to a context's flavors for one command
/// invocation. Fields left as `None` do not override anything.
#[derive(Debug, Clone, Default)]
pub struct ContextOverrides {
    pub build_dir: Option<String>,
    pub build_config: Option<BuildConfig>,
    pub compiler: Option<String>,
    pub game: Option<PathBuf>,
    pub asset_dir: Option<PathBuf>,
    pub ticks: Option<u64>,
    pub headless: Option<bool>,
}

/// The on-disk shape of the `.crank` file: one flat JSON object holding
/// both flavors plus the registered program table. Unknown keys are ignored
/// on load; absent keys take the documented defaults.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub build_dir: Option<String>,
    #[serde(default)]
    pub build_config: Option<BuildConfig>,
    #[serde(default)]
    pub compiler: Option<String>,
    #[serde(default)]
    pub game: Option<PathBuf>,
    #[serde(default)]
    pub asset_dir: Option<PathBuf>,
    #[serde(default)]
    pub ticks: Option<u64>,
    #[serde(default)]
    pub headless: Option<bool>,
    #[serde(default)]
    pub registered_programs: BTreeMap<String, PathBuf>,
    /// Informational only; never applied on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_args_from_empty_flavor_are_empty() {
        assert!(RunFlavor::default().to_driver_args().is_empty());
    }

    #[test]
    fn driver_args_include_all_set_fields() {
        let flavor = RunFlavor {
            game: Some(PathBuf::from("demos/planets.so")),
            asset_dir: Some(PathBuf::from("assets")),
            ticks: Some(1024),
            headless: true,
        };
        assert_eq!(
            flavor.to_driver_args(),
            vec![
                "--game",
                "demos/planets.so",
                "--asset-dir",
                "assets",
                "--tick-limit",
                "1024",
                "--headless",
            ]
        );
    }

    #[test]
    fn zero_ticks_produces_no_tick_limit() {
        let flavor = RunFlavor {
            ticks: Some(0),
            ..Default::default()
        };
        assert!(flavor.to_driver_args().is_empty());
    }

    #[test]
    fn build_overrides_are_sparse() {
        let mut flavor = BuildFlavor::default();
        flavor.apply_overrides(&ContextOverrides {
            build_config: Some(BuildConfig::Release),
            ..Default::default()
        });
        assert_eq!(flavor.build_config, BuildConfig::Release);
        assert_eq!(flavor.build_dir, DEFAULT_BUILD_DIR);
        assert_eq!(flavor.compiler, None);
    }

    #[test]
    fn unknown_config_keys_are_ignored() {
        let parsed: ConfigFile =
            serde_json::from_str(r#"{"build_dir": "out", "no_such_key": 42}"#).unwrap();
        assert_eq!(parsed.build_dir.as_deref(), Some("out"));
        assert!(parsed.registered_programs.is_empty());
    }
}
