use thiserror::Error;

use crate::inventory::types::DeploymentType;

/// Failure of an external collaborator (package repository, container runtime)
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Unexpected output from {command}: {output:?}")]
    InvalidOutput { command: String, output: String },
}

/// Fields of the resolved state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Version,
    ImageTag,
    PkgVersion,
    Release,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Version => "openshift_version",
            Field::ImageTag => "openshift_image_tag",
            Field::PkgVersion => "openshift_pkg_version",
            Field::Release => "openshift_release",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a host's version resolution is aborted
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(
        "openshift_release or openshift_image_tag must be set for containerized origin installs; \
         the latest origin image is usually an unstable pre-release"
    )]
    AmbiguousVersion,

    #[error("openshift_image_tag {value:?} is invalid for {deployment_type} installs, expected {expected}")]
    Format {
        value: String,
        deployment_type: DeploymentType,
        expected: &'static str,
    },

    #[error("Package {package} not found in any enabled repository")]
    PackageNotFound { package: String },

    #[error(
        "rpm version {rpm_version} is different from image version {version}; \
         set openshift_pkg_version or openshift_image_tag to allow it"
    )]
    VersionMismatch { rpm_version: String, version: String },

    #[error("openshift_version was not resolved")]
    VersionUnresolved,

    #[error("openshift_image_tag was not resolved")]
    ImageTagUnresolved,

    #[error("openshift_pkg_version was not resolved")]
    PkgVersionUnresolved,

    #[error(
        "No version of {package} available; ensure the host is registered and the \
         required repositories are enabled"
    )]
    NoVersionAvailable { package: String },

    #[error("Detected version {version} does not match requested openshift_release {release}")]
    ReleaseMismatch { version: String, release: String },

    #[error("{field} is already set to {current:?}, refusing to overwrite with {attempted:?}")]
    Overwrite {
        field: Field,
        current: String,
        attempted: String,
    },

    #[error("Resolution was interrupted: {0}")]
    Interrupted(String),

    #[error(transparent)]
    Query(#[from] QueryError),
}

/// A [`ResolveError`] attributed to the host it aborted
#[derive(Debug, Error)]
#[error("{host}: {error}")]
pub struct HostError {
    pub host: String,
    #[source]
    pub error: ResolveError,
}

impl HostError {
    pub fn new(host: impl Into<String>, error: ResolveError) -> Self {
        Self {
            host: host.into(),
            error,
        }
    }
}
