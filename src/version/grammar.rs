//! Image tag grammar abstraction for different deployment types

use tracing::debug;

use crate::config::LATEST_TAG;
use crate::inventory::types::DeploymentType;
use crate::version::error::ResolveError;
use crate::version::grammars::{EnterpriseTagGrammar, OriginTagGrammar};

/// Trait for deployment-specific image tag validation
///
/// Each deployment type publishes images under a different tag scheme:
/// - origin: `v3.6.0`, `3.6.0`, `v3.6.0-alpha.1`
/// - enterprise: `v3.6`, `v3.6.173.0.5`, `v3.6.173.0.5-1`
pub trait TagGrammar: Send + Sync {
    /// Returns the deployment type this grammar handles
    fn deployment_type(&self) -> DeploymentType;

    /// Human readable description of the accepted format
    fn expected(&self) -> &'static str;

    /// Check whether an image tag is well formed
    fn is_valid(&self, tag: &str) -> bool;
}

/// Grammar for a deployment type, or None when the type has no known scheme
pub fn grammar_for(deployment_type: &DeploymentType) -> Option<&'static dyn TagGrammar> {
    static ORIGIN: OriginTagGrammar = OriginTagGrammar;
    static ENTERPRISE: EnterpriseTagGrammar = EnterpriseTagGrammar;

    match deployment_type {
        DeploymentType::Origin => Some(&ORIGIN),
        DeploymentType::Enterprise => Some(&ENTERPRISE),
        DeploymentType::Unknown(_) => None,
    }
}

/// Validate a user supplied image tag before it is trusted as a version source
///
/// `latest` and absent tags are accepted; unknown deployment types are not checked.
pub fn validate_image_tag(
    image_tag: Option<&str>,
    deployment_type: &DeploymentType,
) -> Result<(), ResolveError> {
    let Some(tag) = image_tag.filter(|t| *t != LATEST_TAG) else {
        return Ok(());
    };

    let Some(grammar) = grammar_for(deployment_type) else {
        debug!(
            "No image tag grammar for deployment type {}, accepting {}",
            deployment_type, tag
        );
        return Ok(());
    };

    debug!(
        "Validating image tag {} against the {} grammar",
        tag,
        grammar.deployment_type()
    );
    if grammar.is_valid(tag) {
        Ok(())
    } else {
        Err(ResolveError::Format {
            value: tag.to_string(),
            deployment_type: deployment_type.clone(),
            expected: grammar.expected(),
        })
    }
}
