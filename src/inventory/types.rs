//! Common types for host context and inputs

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Deployment flavour of the platform being installed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum DeploymentType {
    /// Community distribution (`origin`)
    #[default]
    Origin,
    /// Supported distribution (`enterprise` / `openshift-enterprise`)
    Enterprise,
    /// Anything else; kept verbatim for messages
    Unknown(String),
}

impl DeploymentType {
    /// Returns the string representation of the deployment type
    pub fn as_str(&self) -> &str {
        match self {
            DeploymentType::Origin => "origin",
            DeploymentType::Enterprise => "openshift-enterprise",
            DeploymentType::Unknown(name) => name,
        }
    }

    /// Name of the base package (and service prefix) for this deployment type
    pub fn default_service_type(&self) -> &str {
        match self {
            DeploymentType::Origin => "origin",
            DeploymentType::Enterprise => "atomic-openshift",
            DeploymentType::Unknown(name) => name,
        }
    }
}

impl From<&str> for DeploymentType {
    fn from(s: &str) -> Self {
        match s {
            "origin" => DeploymentType::Origin,
            "enterprise" | "openshift-enterprise" => DeploymentType::Enterprise,
            other => DeploymentType::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for DeploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DeploymentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(DeploymentType::from(name.as_str()))
    }
}

impl Serialize for DeploymentType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// User-supplied version inputs, exactly as captured from the inventory
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RawInputs {
    #[serde(rename = "openshift_release", deserialize_with = "version_string")]
    pub release: Option<String>,
    #[serde(rename = "openshift_image_tag", deserialize_with = "version_string")]
    pub image_tag: Option<String>,
    #[serde(rename = "openshift_version", deserialize_with = "version_string")]
    pub version: Option<String>,
    #[serde(rename = "openshift_pkg_version", deserialize_with = "version_string")]
    pub pkg_version: Option<String>,
    #[serde(rename = "openshift_upgrade_target", deserialize_with = "version_string")]
    pub upgrade_target: Option<String>,
}

impl RawInputs {
    /// Overlay `overrides` on top of `self`; any value set in `overrides` wins
    pub fn merged(self, overrides: RawInputs) -> RawInputs {
        RawInputs {
            release: overrides.release.or(self.release),
            image_tag: overrides.image_tag.or(self.image_tag),
            version: overrides.version.or(self.version),
            pkg_version: overrides.pkg_version.or(self.pkg_version),
            upgrade_target: overrides.upgrade_target.or(self.upgrade_target),
        }
    }
}

/// Externally observed facts about a host, read-only during resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFacts {
    pub is_containerized: bool,
    pub is_atomic: bool,
    /// Version already installed on the host, if any
    pub installed_version: Option<String>,
    pub deployment_type: DeploymentType,
    /// Base package name queried from the package repository
    pub service_type: String,
    pub protect_installed_version: bool,
    /// Whether the native-package rules may inspect the base package
    pub install_base_package: bool,
}

impl Default for HostFacts {
    fn default() -> Self {
        Self {
            is_containerized: false,
            is_atomic: false,
            installed_version: None,
            deployment_type: DeploymentType::Origin,
            service_type: DeploymentType::Origin.default_service_type().to_string(),
            protect_installed_version: true,
            install_base_package: true,
        }
    }
}

/// Everything resolution needs to know about one host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    pub name: String,
    pub groups: Vec<String>,
    pub facts: HostFacts,
    pub inputs: RawInputs,
}

impl HostContext {
    /// Whether the host belongs to any of the given groups
    pub fn in_any_group(&self, groups: &[String]) -> bool {
        self.groups.iter().any(|g| groups.contains(g))
    }

    /// Native-package install, as opposed to a containerized one
    pub fn is_native(&self) -> bool {
        !self.facts.is_containerized
    }
}

/// Deserialize a version-like value as a string.
///
/// JSON numbers are kept by their literal text, so `3.10` becomes `"3.10"`
/// and never `"3.1"`. Requires serde_json's `arbitrary_precision` feature.
pub fn version_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a version string or number, got {}",
            other
        ))),
    }
}
