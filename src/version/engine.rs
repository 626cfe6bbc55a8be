//! Per-host resolution pipeline
//!
//! normalize -> validate tag -> resolve source -> cross-check -> derive & guard

use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::ResolverConfig;
use crate::inventory::types::HostContext;
use crate::version::collaborator::VersionDiscovery;
use crate::version::collaborators::{ContainerCli, RepoqueryCommand};
use crate::version::consistency::{check_consistency, discover_rpm_version};
use crate::version::derive::{check_completeness, derive_dependents};
use crate::version::error::{HostError, ResolveError};
use crate::version::grammar::validate_image_tag;
use crate::version::normalize::normalize;
use crate::version::resolver::resolve_source;
use crate::version::state::{PartialVersions, ResolvedState, ResolvedVersions};

/// Outcome of a successful pass over one host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Resolution {
    /// In-scope host with a complete, consistent set of versions
    Resolved(ResolvedVersions),
    /// Host outside the scope groups; only normalized inputs are reported
    Skipped(PartialVersions),
}

pub struct VersionEngine {
    scope_groups: Vec<String>,
    discovery: VersionDiscovery,
}

impl VersionEngine {
    pub fn new(config: &ResolverConfig, discovery: VersionDiscovery) -> Self {
        Self {
            scope_groups: config.scope_groups.clone(),
            discovery,
        }
    }

    /// Engine backed by the real `repoquery` and container runtime
    pub fn from_config(config: &ResolverConfig) -> Self {
        let discovery = VersionDiscovery::new(
            Arc::new(RepoqueryCommand::new(&config.repoquery)),
            Arc::new(ContainerCli::new(&config.container)),
        );
        Self::new(config, discovery)
    }

    /// Resolve the versions of one host
    pub fn resolve_host(&self, host: &HostContext) -> Result<Resolution, HostError> {
        self.run(host).map_err(|e| {
            error!("{}: version resolution failed: {}", host.name, e);
            HostError::new(&host.name, e)
        })
    }

    fn run(&self, host: &HostContext) -> Result<Resolution, ResolveError> {
        let inputs = normalize(&host.inputs);
        validate_image_tag(inputs.image_tag.as_deref(), &host.facts.deployment_type)?;
        let state = ResolvedState::seeded(&inputs)?;

        if !host.in_any_group(&self.scope_groups) {
            info!("{}: not in {:?}, skipping resolution", host.name, self.scope_groups);
            return Ok(Resolution::Skipped(state.snapshot()));
        }

        resolve_source(host, &inputs, &state, &self.discovery)?;

        if let Some(rpm_version) = discover_rpm_version(host, &self.discovery)? {
            if let Some(version) = state.version() {
                check_consistency(&rpm_version, version, &inputs)?;
            }
        }

        derive_dependents(&inputs, &state)?;
        let resolved = check_completeness(host, &inputs, &state)?;

        info!(
            "{}: version={} image_tag={} pkg_version={}",
            host.name,
            resolved.version,
            resolved.image_tag,
            resolved.pkg_version.as_deref().unwrap_or("<upgrade>")
        );
        Ok(Resolution::Resolved(resolved))
    }
}
