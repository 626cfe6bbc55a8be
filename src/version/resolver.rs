//! Version source priority chain
//!
//! Rules are evaluated in order and the first one that settles the version
//! ends the chain:
//!
//! 1. [`SourceRule::ProtectInstalled`] keeps the version already installed
//! 2. [`SourceRule::AbortOnAmbiguity`] refuses to guess for containerized origin
//! 3. [`SourceRule::Mechanism`] delegates to the native or containerized source

use tracing::{debug, info};

use crate::inventory::types::{DeploymentType, HostContext};
use crate::version::collaborator::VersionDiscovery;
use crate::version::error::{Field, ResolveError};
use crate::version::normalize::NormalizedInputs;
use crate::version::source::source_for;
use crate::version::state::ResolvedState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRule {
    ProtectInstalled,
    AbortOnAmbiguity,
    Mechanism,
}

/// Whether a rule settled the version or handed over to the next rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    Resolved,
    Continue,
}

pub const SOURCE_CHAIN: [SourceRule; 3] = [
    SourceRule::ProtectInstalled,
    SourceRule::AbortOnAmbiguity,
    SourceRule::Mechanism,
];

impl SourceRule {
    pub fn apply(
        &self,
        host: &HostContext,
        inputs: &NormalizedInputs,
        state: &ResolvedState,
        discovery: &VersionDiscovery,
    ) -> Result<RuleOutcome, ResolveError> {
        let facts = &host.facts;
        match self {
            SourceRule::ProtectInstalled => {
                let installed = facts
                    .installed_version
                    .as_deref()
                    .filter(|v| !v.is_empty());
                match installed {
                    Some(installed) if facts.protect_installed_version && state.version().is_none() => {
                        info!("{}: keeping installed version {}", host.name, installed);
                        state.assign(Field::Version, installed)?;
                        Ok(RuleOutcome::Resolved)
                    }
                    _ => Ok(RuleOutcome::Continue),
                }
            }
            SourceRule::AbortOnAmbiguity => {
                if facts.is_containerized
                    && facts.deployment_type == DeploymentType::Origin
                    && state.release().is_none()
                    && state.image_tag().is_none()
                {
                    Err(ResolveError::AmbiguousVersion)
                } else {
                    Ok(RuleOutcome::Continue)
                }
            }
            SourceRule::Mechanism => {
                let source = source_for(host, discovery);
                debug!("{}: resolving through {} source", host.name, source.name());
                source.resolve(host, inputs, state)?;
                Ok(RuleOutcome::Resolved)
            }
        }
    }
}

/// Run the priority chain until a rule settles the version
pub fn resolve_source(
    host: &HostContext,
    inputs: &NormalizedInputs,
    state: &ResolvedState,
    discovery: &VersionDiscovery,
) -> Result<(), ResolveError> {
    for rule in SOURCE_CHAIN {
        if rule.apply(host, inputs, state, discovery)? == RuleOutcome::Resolved {
            debug!("{}: version source settled by {:?}", host.name, rule);
            break;
        }
    }
    Ok(())
}
