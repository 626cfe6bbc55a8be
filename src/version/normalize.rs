//! Input normalization
//!
//! Purely textual: strips the release's leading `v` and drops empty values.
//! Nothing here validates a version.

use crate::inventory::types::RawInputs;

/// Normalized view of [`RawInputs`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedInputs {
    /// Release without its leading `v`
    pub release: Option<String>,
    pub image_tag: Option<String>,
    pub version: Option<String>,
    pub pkg_version: Option<String>,
    pub upgrade_target: Option<String>,
}

impl NormalizedInputs {
    /// Whether the user opted into rpm/image divergence by pinning either one
    pub fn pins_install_artifact(&self) -> bool {
        self.pkg_version.is_some() || self.image_tag.is_some()
    }
}

/// Normalize raw user inputs
pub fn normalize(raw: &RawInputs) -> NormalizedInputs {
    NormalizedInputs {
        release: non_empty(&raw.release).map(|r| strip_v_prefix(r).to_string()),
        image_tag: non_empty(&raw.image_tag).map(str::to_string),
        version: non_empty(&raw.version).map(str::to_string),
        pkg_version: non_empty(&raw.pkg_version).map(str::to_string),
        upgrade_target: non_empty(&raw.upgrade_target).map(str::to_string),
    }
}

/// Strip exactly one leading `v`
pub fn strip_v_prefix(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("v3.6"), Some("3.6"))]
    #[case(Some("3.6"), Some("3.6"))]
    #[case(Some("vv3.6"), Some("v3.6"))] // only one v is stripped
    #[case(Some("3.10"), Some("3.10"))]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn normalize_release(#[case] release: Option<&str>, #[case] expected: Option<&str>) {
        let raw = RawInputs {
            release: release.map(|s| s.to_string()),
            ..Default::default()
        };

        assert_eq!(normalize(&raw).release.as_deref(), expected);
    }

    #[test]
    fn normalize_leaves_other_inputs_untouched() {
        let raw = RawInputs {
            release: None,
            image_tag: Some("v3.6.1".to_string()),
            version: Some("v3.6.1".to_string()),
            pkg_version: Some("-3.6.1".to_string()),
            upgrade_target: Some("3.7".to_string()),
        };

        assert_eq!(
            normalize(&raw),
            NormalizedInputs {
                release: None,
                image_tag: Some("v3.6.1".to_string()),
                version: Some("v3.6.1".to_string()),
                pkg_version: Some("-3.6.1".to_string()),
                upgrade_target: Some("3.7".to_string()),
            }
        );
    }

    #[rstest]
    #[case(Some("-3.6.1"), None, true)]
    #[case(None, Some("v3.6.1"), true)]
    #[case(None, None, false)]
    fn pins_install_artifact(
        #[case] pkg_version: Option<&str>,
        #[case] image_tag: Option<&str>,
        #[case] expected: bool,
    ) {
        let inputs = NormalizedInputs {
            pkg_version: pkg_version.map(|s| s.to_string()),
            image_tag: image_tag.map(|s| s.to_string()),
            ..Default::default()
        };

        assert_eq!(inputs.pins_install_artifact(), expected);
    }
}
