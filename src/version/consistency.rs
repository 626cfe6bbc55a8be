//! Cross-check of rpm and image versions on containerized, non-atomic hosts
//!
//! Such hosts can install the platform either way, so the package repository
//! and the image must agree unless the user pinned one of them.

use tracing::{debug, warn};

use crate::inventory::types::HostContext;
use crate::version::collaborator::VersionDiscovery;
use crate::version::error::ResolveError;
use crate::version::normalize::NormalizedInputs;

/// Whether the host has both an rpm and a container install path
pub fn has_dual_mechanism(host: &HostContext) -> bool {
    host.facts.is_containerized && !host.facts.is_atomic
}

/// Newest rpm version of the base package, for dual-mechanism hosts only
pub fn discover_rpm_version(
    host: &HostContext,
    discovery: &VersionDiscovery,
) -> Result<Option<String>, ResolveError> {
    if !has_dual_mechanism(host) {
        return Ok(None);
    }

    let package = &host.facts.service_type;
    let result = discovery.packages().query(package)?;
    if !result.package_found {
        return Err(ResolveError::PackageNotFound {
            package: package.clone(),
        });
    }

    let rpm_version = result.newest_or_sentinel().to_string();
    debug!("{}: rpm {} offers {}", host.name, package, rpm_version);
    Ok(Some(rpm_version))
}

/// Fail when rpm and image versions differ and the user pinned neither
pub fn check_consistency(
    rpm_version: &str,
    version: &str,
    inputs: &NormalizedInputs,
) -> Result<(), ResolveError> {
    if rpm_version == version {
        return Ok(());
    }
    if inputs.pins_install_artifact() {
        warn!(
            "rpm version {} differs from image version {}, allowed by explicit pin",
            rpm_version, version
        );
        return Ok(());
    }
    Err(ResolveError::VersionMismatch {
        rpm_version: rpm_version.to_string(),
        version: version.to_string(),
    })
}
