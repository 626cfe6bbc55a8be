//! Working record built up during one host's resolution
//!
//! Every field goes from unset to set at most once. A second assignment is
//! reported as [`ResolveError::Overwrite`] instead of replacing the value.

use std::cell::OnceCell;

use serde::Serialize;

use crate::version::error::{Field, ResolveError};
use crate::version::normalize::NormalizedInputs;

#[derive(Debug, Default)]
pub struct ResolvedState {
    version: OnceCell<String>,
    image_tag: OnceCell<String>,
    pkg_version: OnceCell<String>,
    release: OnceCell<String>,
}

impl ResolvedState {
    /// Seed the state with whatever the user supplied explicitly
    pub fn seeded(inputs: &NormalizedInputs) -> Result<Self, ResolveError> {
        let state = Self::default();
        let seeds = [
            (Field::Version, &inputs.version),
            (Field::ImageTag, &inputs.image_tag),
            (Field::PkgVersion, &inputs.pkg_version),
            (Field::Release, &inputs.release),
        ];
        for (field, value) in seeds {
            if let Some(value) = value {
                state.assign(field, value.clone())?;
            }
        }
        Ok(state)
    }

    fn cell(&self, field: Field) -> &OnceCell<String> {
        match field {
            Field::Version => &self.version,
            Field::ImageTag => &self.image_tag,
            Field::PkgVersion => &self.pkg_version,
            Field::Release => &self.release,
        }
    }

    /// Set a field that must not have been set before
    pub fn assign(&self, field: Field, value: impl Into<String>) -> Result<(), ResolveError> {
        let cell = self.cell(field);
        cell.set(value.into()).map_err(|attempted| ResolveError::Overwrite {
            field,
            current: cell.get().cloned().unwrap_or_default(),
            attempted,
        })
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.cell(field).get().map(String::as_str)
    }

    pub fn version(&self) -> Option<&str> {
        self.get(Field::Version)
    }

    pub fn image_tag(&self) -> Option<&str> {
        self.get(Field::ImageTag)
    }

    pub fn pkg_version(&self) -> Option<&str> {
        self.get(Field::PkgVersion)
    }

    pub fn release(&self) -> Option<&str> {
        self.get(Field::Release)
    }

    /// Snapshot of the state without completeness guarantees
    pub fn snapshot(&self) -> PartialVersions {
        PartialVersions {
            version: self.version().map(str::to_string),
            image_tag: self.image_tag().map(str::to_string),
            pkg_version: self.pkg_version().map(str::to_string),
            release: self.release().map(str::to_string),
        }
    }
}

/// Fully resolved, mutually consistent versions for one host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVersions {
    pub version: String,
    pub image_tag: String,
    /// Absent when an upgrade flow supplies its own package version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pkg_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
}

/// Values of a host that was not fully resolved
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartialVersions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pkg_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_sets_unset_field() {
        let state = ResolvedState::default();

        state.assign(Field::Version, "3.6.1").unwrap();

        assert_eq!(state.version(), Some("3.6.1"));
        assert_eq!(state.image_tag(), None);
    }

    #[test]
    fn assign_refuses_to_overwrite() {
        let state = ResolvedState::default();
        state.assign(Field::ImageTag, "v3.6.1").unwrap();

        let err = state.assign(Field::ImageTag, "v3.6.2").unwrap_err();

        match err {
            ResolveError::Overwrite {
                field,
                current,
                attempted,
            } => {
                assert_eq!(field, Field::ImageTag);
                assert_eq!(current, "v3.6.1");
                assert_eq!(attempted, "v3.6.2");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(state.image_tag(), Some("v3.6.1"));
    }

    #[test]
    fn seeded_copies_explicit_inputs() {
        let inputs = NormalizedInputs {
            release: Some("3.6".to_string()),
            pkg_version: Some("-3.6.1".to_string()),
            upgrade_target: Some("3.7".to_string()),
            ..Default::default()
        };

        let state = ResolvedState::seeded(&inputs).unwrap();

        assert_eq!(
            state.snapshot(),
            PartialVersions {
                version: None,
                image_tag: None,
                pkg_version: Some("-3.6.1".to_string()),
                release: Some("3.6".to_string()),
            }
        );
    }
}
