//! Derivation of dependent identifiers and the terminal completeness guard

use crate::config::SENTINEL_VERSION;
use crate::inventory::types::HostContext;
use crate::version::error::{Field, ResolveError};
use crate::version::normalize::NormalizedInputs;
use crate::version::state::{ResolvedState, ResolvedVersions};

/// Fill `image_tag` and `pkg_version` from the canonical version when unset
///
/// `pkg_version` is left alone while an upgrade target is set; the upgrade
/// flow provides its own.
pub fn derive_dependents(inputs: &NormalizedInputs, state: &ResolvedState) -> Result<(), ResolveError> {
    let Some(version) = state.version() else {
        return Ok(());
    };

    if state.image_tag().is_none() {
        state.assign(Field::ImageTag, format!("v{}", version))?;
    }
    if state.pkg_version().is_none() && inputs.upgrade_target.is_none() {
        state.assign(Field::PkgVersion, format!("-{}", version))?;
    }
    Ok(())
}

/// Assert that every output is set and sane, producing the final versions
pub fn check_completeness(
    host: &HostContext,
    inputs: &NormalizedInputs,
    state: &ResolvedState,
) -> Result<ResolvedVersions, ResolveError> {
    let version = state.version().ok_or(ResolveError::VersionUnresolved)?;
    let image_tag = state.image_tag().ok_or(ResolveError::ImageTagUnresolved)?;
    let pkg_version = state.pkg_version();
    if pkg_version.is_none() && inputs.upgrade_target.is_none() {
        return Err(ResolveError::PkgVersionUnresolved);
    }

    if host.is_native() {
        if version == SENTINEL_VERSION {
            return Err(ResolveError::NoVersionAvailable {
                package: host.facts.service_type.clone(),
            });
        }
        if let Some(release) = state.release() {
            // loose prefix match: release 3.1 accepts 3.10.0
            if !version.starts_with(release) {
                return Err(ResolveError::ReleaseMismatch {
                    version: version.to_string(),
                    release: release.to_string(),
                });
            }
        }
    }

    Ok(ResolvedVersions {
        version: version.to_string(),
        image_tag: image_tag.to_string(),
        pkg_version: pkg_version.map(str::to_string),
        release: state.release().map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::inventory::types::HostFacts;

    fn host(is_containerized: bool) -> HostContext {
        HostContext {
            name: "node1".to_string(),
            groups: vec![],
            facts: HostFacts {
                is_containerized,
                ..Default::default()
            },
            inputs: Default::default(),
        }
    }

    fn state_with(fields: &[(Field, &str)]) -> ResolvedState {
        let state = ResolvedState::default();
        for (field, value) in fields {
            state.assign(*field, *value).unwrap();
        }
        state
    }

    #[test]
    fn derive_dependents_fills_tag_and_pkg_version() {
        let state = state_with(&[(Field::Version, "3.6.1")]);

        derive_dependents(&NormalizedInputs::default(), &state).unwrap();

        assert_eq!(state.image_tag(), Some("v3.6.1"));
        assert_eq!(state.pkg_version(), Some("-3.6.1"));
    }

    #[test]
    fn derive_dependents_keeps_explicit_values() {
        let state = state_with(&[
            (Field::Version, "3.6.1"),
            (Field::ImageTag, "v3.6.1-2"),
            (Field::PkgVersion, "-3.6.1-2.el7"),
        ]);

        derive_dependents(&NormalizedInputs::default(), &state).unwrap();

        assert_eq!(state.image_tag(), Some("v3.6.1-2"));
        assert_eq!(state.pkg_version(), Some("-3.6.1-2.el7"));
    }

    #[test]
    fn derive_dependents_leaves_pkg_version_to_upgrades() {
        let inputs = NormalizedInputs {
            upgrade_target: Some("3.7".to_string()),
            ..Default::default()
        };
        let state = state_with(&[(Field::Version, "3.6.1")]);

        derive_dependents(&inputs, &state).unwrap();

        assert_eq!(state.image_tag(), Some("v3.6.1"));
        assert_eq!(state.pkg_version(), None);
        let resolved = check_completeness(&host(false), &inputs, &state).unwrap();
        assert_eq!(resolved.pkg_version, None);
    }

    #[test]
    fn check_completeness_reports_missing_fields_in_order() {
        let inputs = NormalizedInputs::default();

        let err = check_completeness(&host(false), &inputs, &state_with(&[])).unwrap_err();
        assert!(matches!(err, ResolveError::VersionUnresolved));

        let err = check_completeness(&host(false), &inputs, &state_with(&[(Field::Version, "3.6.1")]))
            .unwrap_err();
        assert!(matches!(err, ResolveError::ImageTagUnresolved));

        let err = check_completeness(
            &host(false),
            &inputs,
            &state_with(&[(Field::Version, "3.6.1"), (Field::ImageTag, "v3.6.1")]),
        )
        .unwrap_err();
        assert!(matches!(err, ResolveError::PkgVersionUnresolved));
    }

    #[rstest]
    #[case(false, true)]
    #[case(true, false)] // containerized hosts never carry the sentinel check
    fn check_completeness_rejects_sentinel_for_native_installs(
        #[case] is_containerized: bool,
        #[case] rejected: bool,
    ) {
        let state = state_with(&[(Field::Version, "0.0")]);
        derive_dependents(&NormalizedInputs::default(), &state).unwrap();

        let result = check_completeness(&host(is_containerized), &NormalizedInputs::default(), &state);

        assert_eq!(
            matches!(result, Err(ResolveError::NoVersionAvailable { .. })),
            rejected
        );
    }

    #[rstest]
    #[case("3.6.1", "3.6", true)]
    #[case("3.10.0", "3.1", true)] // loose prefix match
    #[case("3.7.0", "3.6", false)]
    fn check_completeness_release_prefix(
        #[case] version: &str,
        #[case] release: &str,
        #[case] ok: bool,
    ) {
        let state = state_with(&[(Field::Version, version), (Field::Release, release)]);
        derive_dependents(&NormalizedInputs::default(), &state).unwrap();

        let result = check_completeness(&host(false), &NormalizedInputs::default(), &state);

        match result {
            Ok(resolved) => {
                assert!(ok);
                assert_eq!(resolved.release.as_deref(), Some(release));
            }
            Err(ResolveError::ReleaseMismatch {
                version: v,
                release: r,
            }) => {
                assert!(!ok);
                assert_eq!(v, version);
                assert_eq!(r, release);
            }
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
}
