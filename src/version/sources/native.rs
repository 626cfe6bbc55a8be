//! Native package version source
//!
//! Order of preference:
//! 1. a version that is already set
//! 2. the user's `openshift_pkg_version` (`-3.6.1-2.el7` -> `3.6.1`)
//! 3. the newest repository version, preferring one that matches the release

use tracing::{debug, info};

use crate::config::SENTINEL_VERSION;
use crate::inventory::types::HostContext;
use crate::version::collaborator::{DiscoveryResult, PackageQuery};
use crate::version::error::{Field, ResolveError};
use crate::version::normalize::NormalizedInputs;
use crate::version::source::VersionSource;
use crate::version::state::ResolvedState;

pub struct NativeSource<'a> {
    packages: &'a dyn PackageQuery,
}

impl<'a> NativeSource<'a> {
    pub fn new(packages: &'a dyn PackageQuery) -> Self {
        Self { packages }
    }
}

impl VersionSource for NativeSource<'_> {
    fn name(&self) -> &'static str {
        "native"
    }

    fn resolve(
        &self,
        host: &HostContext,
        inputs: &NormalizedInputs,
        state: &ResolvedState,
    ) -> Result<(), ResolveError> {
        if !host.facts.install_base_package {
            debug!("{}: base package inspection disabled", host.name);
            return Ok(());
        }
        if state.version().is_some() {
            return Ok(());
        }

        let version = match inputs.pkg_version.as_deref() {
            Some(pkg_version) => version_from_pkg_version(pkg_version),
            None => {
                let package = &host.facts.service_type;
                let result = self.packages.query(package)?;
                let version = select_available_version(&result, state.release());
                info!(
                    "{}: repository offers {} {} (of {} versions)",
                    host.name,
                    package,
                    version,
                    result.available_versions.len()
                );
                version
            }
        };

        if version.is_empty() {
            return Ok(());
        }
        state.assign(Field::Version, version)
    }
}

/// Version part of a package version: leading `-` and trailing `-release` dropped
pub fn version_from_pkg_version(pkg_version: &str) -> String {
    pkg_version
        .strip_prefix('-')
        .unwrap_or(pkg_version)
        .split('-')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Choose the version to install from a repository answer
///
/// With a release, the newest version starting with it wins; otherwise (or
/// when nothing matches) the newest version. Nothing available yields `0.0`.
pub fn select_available_version(result: &DiscoveryResult, release: Option<&str>) -> String {
    if !result.package_found {
        return SENTINEL_VERSION.to_string();
    }

    release
        .and_then(|release| {
            result
                .available_versions
                .iter()
                .find(|v| v.starts_with(release))
        })
        .map(String::as_str)
        .unwrap_or_else(|| result.newest_or_sentinel())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::types::HostFacts;
    use crate::version::collaborator::MockPackageQuery;
    use rstest::rstest;

    fn native_host(install_base_package: bool) -> HostContext {
        HostContext {
            name: "node1".to_string(),
            groups: vec![],
            facts: HostFacts {
                service_type: "atomic-openshift".to_string(),
                install_base_package,
                ..Default::default()
            },
            inputs: Default::default(),
        }
    }

    #[rstest]
    #[case("-3.6.1", "3.6.1")]
    #[case("-3.6.173.0.5-1.git.0.e6a4c1f.el7", "3.6.173.0.5")]
    #[case("3.6.1", "3.6.1")]
    #[case("-", "")]
    fn version_from_pkg_version_returns_expected(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(version_from_pkg_version(input), expected);
    }

    #[rstest]
    #[case(false, vec![], None, "0.0")]
    #[case(true, vec![], None, "0.0")]
    #[case(true, vec!["3.7.0", "3.6.1", "3.6.0"], None, "3.7.0")]
    #[case(true, vec!["3.7.0", "3.6.1", "3.6.0"], Some("3.6"), "3.6.1")]
    #[case(true, vec!["3.7.0"], Some("3.6"), "3.7.0")] // mismatch is reported later
    fn select_available_version_returns_expected(
        #[case] found: bool,
        #[case] versions: Vec<&str>,
        #[case] release: Option<&str>,
        #[case] expected: &str,
    ) {
        let result = DiscoveryResult::new(found, versions.into_iter().map(String::from).collect());

        assert_eq!(select_available_version(&result, release), expected);
    }

    #[test]
    fn resolve_queries_service_type_package() {
        let mut packages = MockPackageQuery::new();
        packages
            .expect_query()
            .withf(|name| name == "atomic-openshift")
            .times(1)
            .returning(|_| {
                Ok(DiscoveryResult::new(
                    true,
                    vec!["3.6.173.0.21".to_string(), "3.6.173.0.5".to_string()],
                ))
            });
        let state = ResolvedState::default();

        NativeSource::new(&packages)
            .resolve(&native_host(true), &NormalizedInputs::default(), &state)
            .unwrap();

        assert_eq!(state.version(), Some("3.6.173.0.21"));
    }

    #[test]
    fn resolve_prefers_pkg_version_over_repository() {
        let mut packages = MockPackageQuery::new();
        packages.expect_query().never();
        let inputs = NormalizedInputs {
            pkg_version: Some("-3.6.1".to_string()),
            ..Default::default()
        };
        let state = ResolvedState::default();

        NativeSource::new(&packages)
            .resolve(&native_host(true), &inputs, &state)
            .unwrap();

        assert_eq!(state.version(), Some("3.6.1"));
    }

    #[test]
    fn resolve_keeps_existing_version() {
        let mut packages = MockPackageQuery::new();
        packages.expect_query().never();
        let state = ResolvedState::default();
        state.assign(Field::Version, "3.6.0").unwrap();

        NativeSource::new(&packages)
            .resolve(&native_host(true), &NormalizedInputs::default(), &state)
            .unwrap();

        assert_eq!(state.version(), Some("3.6.0"));
    }

    #[test]
    fn resolve_does_nothing_when_base_package_disabled() {
        let mut packages = MockPackageQuery::new();
        packages.expect_query().never();
        let state = ResolvedState::default();

        NativeSource::new(&packages)
            .resolve(&native_host(false), &NormalizedInputs::default(), &state)
            .unwrap();

        assert_eq!(state.version(), None);
    }
}
