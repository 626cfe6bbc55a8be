//! JSON inventory loader
//!
//! Inventory shape:
//!
//! ```json
//! {
//!   "vars": { "openshift_release": "v3.6", "openshift_protect_installed_version": true },
//!   "hosts": [
//!     {
//!       "name": "master1.example.com",
//!       "groups": ["oo_masters_to_config"],
//!       "facts": { "is_containerized": true, "deployment_type": "origin" },
//!       "vars": { "openshift_image_tag": "v3.6.1" }
//!     }
//!   ]
//! }
//! ```
//!
//! Host vars override group vars field by field.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::ResolverConfig;
use crate::inventory::types::{DeploymentType, HostContext, HostFacts, RawInputs, version_string};

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Failed to read inventory {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid inventory: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate host in inventory: {0}")]
    DuplicateHost(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InventoryFile {
    vars: InventoryVars,
    hosts: Vec<HostEntry>,
}

#[derive(Debug, Deserialize)]
struct HostEntry {
    name: String,
    #[serde(default)]
    groups: Vec<String>,
    #[serde(default)]
    facts: FactsEntry,
    #[serde(default)]
    vars: InventoryVars,
}

/// Variables settable at group or host level
///
/// `RawInputs` fields are listed explicitly instead of flattened: serde's
/// flatten buffering does not round-trip `arbitrary_precision` numbers.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InventoryVars {
    #[serde(deserialize_with = "version_string")]
    openshift_release: Option<String>,
    #[serde(deserialize_with = "version_string")]
    openshift_image_tag: Option<String>,
    #[serde(deserialize_with = "version_string")]
    openshift_version: Option<String>,
    #[serde(deserialize_with = "version_string")]
    openshift_pkg_version: Option<String>,
    #[serde(deserialize_with = "version_string")]
    openshift_upgrade_target: Option<String>,
    openshift_protect_installed_version: Option<bool>,
    version_install_base_package: Option<bool>,
}

impl InventoryVars {
    fn inputs(&self) -> RawInputs {
        RawInputs {
            release: self.openshift_release.clone(),
            image_tag: self.openshift_image_tag.clone(),
            version: self.openshift_version.clone(),
            pkg_version: self.openshift_pkg_version.clone(),
            upgrade_target: self.openshift_upgrade_target.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FactsEntry {
    is_containerized: bool,
    is_atomic: bool,
    #[serde(deserialize_with = "version_string")]
    version: Option<String>,
    deployment_type: DeploymentType,
    service_type: Option<String>,
}

/// Load an inventory file into host contexts, preserving host order
pub fn load_inventory(path: &Path, config: &ResolverConfig) -> Result<Vec<HostContext>, InventoryError> {
    let content = std::fs::read_to_string(path).map_err(|source| InventoryError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_inventory(&content, config)
}

/// Parse inventory JSON into host contexts, preserving host order
pub fn parse_inventory(content: &str, config: &ResolverConfig) -> Result<Vec<HostContext>, InventoryError> {
    let file: InventoryFile = serde_json::from_str(content)?;
    let group_inputs = file.vars.inputs();

    let mut hosts: Vec<HostContext> = Vec::with_capacity(file.hosts.len());
    for entry in file.hosts {
        if hosts.iter().any(|h| h.name == entry.name) {
            return Err(InventoryError::DuplicateHost(entry.name));
        }

        let protect_installed_version = entry
            .vars
            .openshift_protect_installed_version
            .or(file.vars.openshift_protect_installed_version)
            .unwrap_or(config.protect_installed_version);
        let install_base_package = entry
            .vars
            .version_install_base_package
            .or(file.vars.version_install_base_package)
            .unwrap_or(config.install_base_package);

        let service_type = entry
            .facts
            .service_type
            .unwrap_or_else(|| entry.facts.deployment_type.default_service_type().to_string());

        let facts = HostFacts {
            is_containerized: entry.facts.is_containerized,
            is_atomic: entry.facts.is_atomic,
            installed_version: entry.facts.version,
            deployment_type: entry.facts.deployment_type,
            service_type,
            protect_installed_version,
            install_base_package,
        };

        debug!("Loaded host {} (groups: {:?})", entry.name, entry.groups);

        hosts.push(HostContext {
            inputs: group_inputs.clone().merged(entry.vars.inputs()),
            name: entry.name,
            groups: entry.groups,
            facts,
        });
    }

    Ok(hosts)
}
