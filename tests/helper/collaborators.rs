//! Collaborator test utilities

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use openshift_version::config::{MASTERS_GROUP, ResolverConfig};
use openshift_version::inventory::types::{DeploymentType, HostContext, HostFacts, RawInputs};
use openshift_version::version::collaborator::{
    DiscoveryResult, ImageInspector, PackageQuery, VersionDiscovery,
};
use openshift_version::version::engine::VersionEngine;
use openshift_version::version::error::QueryError;

/// Stub package repository for testing
#[derive(Default)]
pub struct StubPackageQuery {
    versions: HashMap<String, Vec<String>>,
    queried: Mutex<Vec<String>>,
}

impl StubPackageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_versions(mut self, package: &str, versions: Vec<&str>) -> Self {
        self.versions.insert(
            package.to_string(),
            versions.into_iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    /// Packages queried so far, in call order
    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }
}

impl PackageQuery for StubPackageQuery {
    fn query(&self, package_name: &str) -> Result<DiscoveryResult, QueryError> {
        self.queried.lock().unwrap().push(package_name.to_string());
        Ok(match self.versions.get(package_name) {
            Some(versions) => DiscoveryResult::new(true, versions.clone()),
            None => DiscoveryResult::new(false, vec![]),
        })
    }
}

/// Stub container runtime answering `version` per image tag
#[derive(Default)]
pub struct StubImageInspector {
    outputs: HashMap<String, String>,
}

impl StubImageInspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: &str, version_line: &str) -> Self {
        self.outputs
            .insert(tag.to_string(), version_line.to_string());
        self
    }
}

impl ImageInspector for StubImageInspector {
    fn cli_version(
        &self,
        deployment_type: &DeploymentType,
        tag: &str,
    ) -> Result<String, QueryError> {
        self.outputs
            .get(tag)
            .cloned()
            .ok_or_else(|| QueryError::CommandFailed {
                command: format!("docker run --rm {}:{} version", deployment_type, tag),
                status: "exit status: 125".to_string(),
                stderr: "manifest unknown".to_string(),
            })
    }
}

/// Create an engine with the default config and the given stubs
pub fn create_test_engine(
    packages: Arc<StubPackageQuery>,
    images: Arc<StubImageInspector>,
) -> VersionEngine {
    VersionEngine::new(
        &ResolverConfig::default(),
        VersionDiscovery::new(packages, images),
    )
}

/// A master host with the given facts and inputs
pub fn master_host(facts: HostFacts, inputs: RawInputs) -> HostContext {
    HostContext {
        name: "master1.example.com".to_string(),
        groups: vec![MASTERS_GROUP.to_string()],
        facts,
        inputs,
    }
}
