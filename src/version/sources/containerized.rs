//! Containerized version source
//!
//! Derives the version from the image tag or release. Without either, the
//! CLI image tagged `latest` is asked for its version, and a two component
//! version (`3.6`) is expanded by asking the image tagged `v3.6`.

use tracing::{debug, info};

use crate::config::LATEST_TAG;
use crate::inventory::types::HostContext;
use crate::version::collaborator::ImageInspector;
use crate::version::error::{Field, QueryError, ResolveError};
use crate::version::normalize::{NormalizedInputs, strip_v_prefix};
use crate::version::semver::component_count;
use crate::version::source::VersionSource;
use crate::version::state::ResolvedState;

pub struct ContainerizedSource<'a> {
    images: &'a dyn ImageInspector,
}

impl<'a> ContainerizedSource<'a> {
    pub fn new(images: &'a dyn ImageInspector) -> Self {
        Self { images }
    }

    fn inspect(
        &self,
        host: &HostContext,
        tag: &str,
        keep_prerelease: bool,
    ) -> Result<String, ResolveError> {
        let line = self.images.cli_version(&host.facts.deployment_type, tag)?;
        debug!("{}: image {} reports {:?}", host.name, tag, line);
        parse_cli_version(&line, keep_prerelease).ok_or_else(|| {
            ResolveError::Query(QueryError::InvalidOutput {
                command: format!("{} image {} version", host.facts.deployment_type, tag),
                output: line,
            })
        })
    }
}

impl VersionSource for ContainerizedSource<'_> {
    fn name(&self) -> &'static str {
        "containerized"
    }

    fn resolve(
        &self,
        host: &HostContext,
        _inputs: &NormalizedInputs,
        state: &ResolvedState,
    ) -> Result<(), ResolveError> {
        if state.version().is_some() {
            return Ok(());
        }

        let candidate = if let Some(tag) = state.image_tag().filter(|t| *t != LATEST_TAG) {
            version_from_image_tag(tag)
        } else if let Some(release) = state.release() {
            release.to_string()
        } else {
            // latest origin images carry a pre-release suffix worth keeping
            self.inspect(host, LATEST_TAG, true)?
        };

        let version = if component_count(&candidate) == 2 {
            self.inspect(host, &format!("v{}", candidate), false)?
        } else {
            candidate
        };
        let version = strip_build_metadata(&version).to_string();

        info!("{}: containerized version {}", host.name, version);
        state.assign(Field::Version, version)
    }
}

/// Version carried by an image tag: `v3.6.1-2` -> `3.6.1`
fn version_from_image_tag(tag: &str) -> String {
    strip_v_prefix(tag).split('-').next().unwrap_or_default().to_string()
}

fn strip_build_metadata(version: &str) -> &str {
    version.split('+').next().unwrap_or(version)
}

/// Parse the first line of the CLI's `version` output
///
/// `openshift v3.7.0-alpha.1+3a9b3b5-1215` yields `3.7.0-alpha.1` when
/// `keep_prerelease` is set and `3.7.0` otherwise. Build metadata after `+`
/// is always dropped.
pub fn parse_cli_version(line: &str, keep_prerelease: bool) -> Option<String> {
    let token = line.split_whitespace().nth(1)?;
    let token = strip_v_prefix(token);

    let version = if keep_prerelease {
        token.splitn(3, '-').take(2).collect::<Vec<_>>().join("-")
    } else {
        token.split('-').next().unwrap_or_default().to_string()
    };
    let version = strip_build_metadata(&version);

    if version.starts_with(|c: char| c.is_ascii_digit()) {
        Some(version.to_string())
    } else {
        None
    }
}
