//! Mechanism-specific version source trait
//!
//! Native-package hosts and containerized hosts learn their version from
//! different places; exactly one source runs per host.

use crate::inventory::types::HostContext;
use crate::version::collaborator::VersionDiscovery;
use crate::version::error::ResolveError;
use crate::version::normalize::NormalizedInputs;
use crate::version::sources::{ContainerizedSource, NativeSource};
use crate::version::state::ResolvedState;

/// Trait for install-mechanism specific version resolution
pub trait VersionSource {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Fill `version` in `state` when it can be determined
    ///
    /// Implementations never overwrite a version that is already set.
    fn resolve(
        &self,
        host: &HostContext,
        inputs: &NormalizedInputs,
        state: &ResolvedState,
    ) -> Result<(), ResolveError>;
}

/// Pick the source matching the host's install mechanism
pub fn source_for<'a>(
    host: &HostContext,
    discovery: &'a VersionDiscovery,
) -> Box<dyn VersionSource + 'a> {
    if host.facts.is_containerized {
        Box::new(ContainerizedSource::new(discovery.images()))
    } else {
        Box::new(NativeSource::new(discovery.packages()))
    }
}
