//! CLI configuration
//!
//! Values come from command-line flags, then an optional `mrcheck.toml`,
//! then built-in defaults.

use mrcheck_core::logging_facility::Profile;
use mrcheck_core::CollisionPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File read from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "mrcheck.toml";

/// Store root used when neither a flag nor the config file sets one
pub const DEFAULT_STORE_ROOT: &str = ".mrcheck";

/// Contents of `mrcheck.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub store_root: Option<PathBuf>,
    pub check_extra: Option<bool>,
    pub timeout_secs: Option<u64>,
    pub log_profile: Option<Profile>,
    pub collision_policy: Option<CollisionPolicy>,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load `explicit` if given, else `mrcheck.toml` when it exists
    ///
    /// A missing explicit file is an error; a missing default file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?;
        let config = Self::parse(&text).map_err(|e| format!("invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }
}

/// Flag values that may override the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub store_root: Option<PathBuf>,
    pub check_extra: bool,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub store_root: PathBuf,
    pub check_extra: bool,
    pub timeout: Option<Duration>,
    pub log_profile: Profile,
    pub collision_policy: CollisionPolicy,
}

impl Settings {
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Self {
        Self {
            store_root: overrides
                .store_root
                .or(file.store_root)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_ROOT)),
            // A bare flag can only switch the check on
            check_extra: overrides.check_extra || file.check_extra.unwrap_or(false),
            timeout: overrides
                .timeout_secs
                .or(file.timeout_secs)
                .map(Duration::from_secs),
            log_profile: file.log_profile.unwrap_or_default(),
            collision_policy: file.collision_policy.unwrap_or_default(),
        }
    }
}
