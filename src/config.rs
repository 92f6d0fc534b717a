use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};

/// File name looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "revbump.toml";

/// Remote that branches and tags are pushed to unless configured otherwise
pub const DEFAULT_REMOTE: &str = "upstream";

/// Represents the complete configuration for revbump.
///
/// Loaded once at start-up and passed by reference into the release workflow;
/// nothing mutates it afterwards.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,
}

fn default_remote() -> String {
    DEFAULT_REMOTE.to_string()
}

fn default_branch() -> String {
    "master".to_string()
}

fn default_commit_message() -> String {
    "Automated version bump [ci skip]".to_string()
}

fn default_manifest_path() -> PathBuf {
    PathBuf::from("composer.json")
}

/// Where and how the release is recorded in version control.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_branch")]
    pub branch: String,

    /// Message for the bump commit; the default carries a `[ci skip]` marker
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    #[serde(default)]
    pub annotated_tags: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            remote: default_remote(),
            branch: default_branch(),
            commit_message: default_commit_message(),
            annotated_tags: false,
        }
    }
}

/// Location of the manifest, relative to the repository work tree.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManifestConfig {
    #[serde(default = "default_manifest_path")]
    pub path: PathBuf,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            path: default_manifest_path(),
        }
    }
}

impl Config {
    /// Rejects values that would make a release step meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.git.remote.trim().is_empty() {
            return Err(ReleaseError::config("git.remote must not be empty"));
        }
        if self.git.branch.trim().is_empty() {
            return Err(ReleaseError::config("git.branch must not be empty"));
        }
        if self.git.commit_message.trim().is_empty() {
            return Err(ReleaseError::config("git.commit_message must not be empty"));
        }
        if self.manifest.path.as_os_str().is_empty() {
            return Err(ReleaseError::config("manifest.path must not be empty"));
        }
        Ok(())
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ReleaseError::config(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `revbump.toml` in current directory
/// 3. `.revbump.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        PathBuf::from(CONFIG_FILE_NAME)
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_config.exists() {
            user_config
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    log::debug!("loading configuration from {}", path.display());
    let content = fs::read_to_string(&path).map_err(|e| {
        ReleaseError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    Config::from_toml(&content)
}
