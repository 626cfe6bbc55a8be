//! Traits for the external systems resolution consults

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use crate::config::SENTINEL_VERSION;
use crate::inventory::types::DeploymentType;
use crate::version::error::QueryError;

/// What the package repository reported for one package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryResult {
    pub package_found: bool,
    /// Available versions, ordered from newest to oldest
    pub available_versions: Vec<String>,
}

impl DiscoveryResult {
    pub fn new(package_found: bool, available_versions: Vec<String>) -> Self {
        Self {
            package_found,
            available_versions,
        }
    }

    /// Newest available version, or the `0.0` sentinel when there is none
    pub fn newest_or_sentinel(&self) -> &str {
        self.available_versions
            .first()
            .map(String::as_str)
            .unwrap_or(SENTINEL_VERSION)
    }
}

/// Trait for querying the package repository
#[cfg_attr(test, automock)]
pub trait PackageQuery: Send + Sync {
    /// Look up the versions of a package available to the host
    ///
    /// # Arguments
    /// * `package_name` - The base package (e.g., "atomic-openshift")
    fn query(&self, package_name: &str) -> Result<DiscoveryResult, QueryError>;
}

/// Trait for inspecting container images of the platform CLI
#[cfg_attr(test, automock)]
pub trait ImageInspector: Send + Sync {
    /// Run the CLI image at `tag` and return the first line of its `version`
    /// output (e.g., "openshift v3.6.173.0.5")
    fn cli_version(&self, deployment_type: &DeploymentType, tag: &str)
    -> Result<String, QueryError>;
}

/// Groups the collaborators one resolution needs
#[derive(Clone)]
pub struct VersionDiscovery {
    packages: Arc<dyn PackageQuery>,
    images: Arc<dyn ImageInspector>,
}

impl VersionDiscovery {
    pub fn new(packages: Arc<dyn PackageQuery>, images: Arc<dyn ImageInspector>) -> Self {
        Self { packages, images }
    }

    /// Get the package repository query
    pub fn packages(&self) -> &dyn PackageQuery {
        self.packages.as_ref()
    }

    /// Get the container image inspector
    pub fn images(&self) -> &dyn ImageInspector {
        self.images.as_ref()
    }
}
