use serde::Deserialize;
use std::path::{Path, PathBuf};

use thiserror::Error;

// =============================================================================
// Inventory constants
// =============================================================================

/// Group of hosts that run the master role
pub const MASTERS_GROUP: &str = "oo_masters_to_config";

/// Group of hosts that run the node role
pub const NODES_GROUP: &str = "oo_nodes_to_config";

/// Version reported when the package repository has nothing usable
pub const SENTINEL_VERSION: &str = "0.0";

/// Image tag that is never validated nor trusted as a version
pub const LATEST_TAG: &str = "latest";

/// Environment variable holding the tracing filter
pub const LOG_ENV: &str = "OPENSHIFT_VERSION_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Resolver configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Groups whose hosts get a full resolution; everyone else is skipped
    pub scope_groups: Vec<String>,
    /// Default for `openshift_protect_installed_version`
    pub protect_installed_version: bool,
    /// Default for `version_install_base_package`
    pub install_base_package: bool,
    pub repoquery: RepoqueryConfig,
    pub container: ContainerConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            scope_groups: vec![MASTERS_GROUP.to_string(), NODES_GROUP.to_string()],
            protect_installed_version: true,
            install_base_package: true,
            repoquery: RepoqueryConfig::default(),
            container: ContainerConfig::default(),
        }
    }
}

impl ResolverConfig {
    /// Load the configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` if given, else from the default location if it exists,
    /// else fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = config_path();
                if default_path.is_file() {
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Package repository query command
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RepoqueryConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for RepoqueryConfig {
    fn default() -> Self {
        Self {
            program: "repoquery".to_string(),
            args: vec![
                "--plugins".to_string(),
                "--quiet".to_string(),
                "--show-duplicates".to_string(),
            ],
        }
    }
}

/// Container runtime and CLI images used to inspect image versions
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerConfig {
    pub runtime: String,
    pub origin_image: String,
    pub enterprise_image: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            runtime: "docker".to_string(),
            origin_image: "openshift/origin".to_string(),
            enterprise_image: "openshift3/ose".to_string(),
        }
    }
}

/// Returns the path to the default configuration file.
/// Uses $XDG_CONFIG_HOME/openshift-version/config.json if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/openshift-version/config.json,
/// or ./openshift-version/config.json if neither is available.
pub fn config_path() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir()).join("config.json")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("openshift-version")
}
