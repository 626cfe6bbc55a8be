use std::cmp::Ordering;

use semver::Prerelease;

/// One dot separated component of a version's release part
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Segment {
    Text(String),
    Num(u64),
}

/// Suffix after the first `-`; a plain release sorts after any pre-release
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Suffix {
    Text(String),
    Pre(Prerelease),
    Release,
}

/// Total ordering key for version strings that are not necessarily semver
///
/// Builds such as `3.6.173.0.5` carry more than three components, so the
/// release part is compared component-wise with trailing zeros ignored
/// (`3.6` == `3.6.0`). The suffix uses semver pre-release precedence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct VersionKey {
    release: Vec<Segment>,
    suffix: Suffix,
}

impl VersionKey {
    pub fn parse(version: &str) -> Self {
        let (release, suffix) = match version.split_once('-') {
            Some((release, suffix)) => (release, Some(suffix)),
            None => (version, None),
        };

        let mut segments: Vec<Segment> = release
            .split('.')
            .map(|part| match part.parse::<u64>() {
                Ok(n) => Segment::Num(n),
                Err(_) => Segment::Text(part.to_string()),
            })
            .collect();
        while segments.last() == Some(&Segment::Num(0)) {
            segments.pop();
        }

        let suffix = match suffix {
            None => Suffix::Release,
            Some(s) => match Prerelease::new(s) {
                Ok(pre) => Suffix::Pre(pre),
                Err(_) => Suffix::Text(s.to_string()),
            },
        };

        Self {
            release: segments,
            suffix,
        }
    }
}

/// Compare two version strings
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    VersionKey::parse(a).cmp(&VersionKey::parse(b))
}

/// Sort versions from newest to oldest, dropping duplicates
///
/// Versions that compare equal (`3.6` and `3.6.0`) count as duplicates; the
/// first one in sorted order is kept.
pub fn sort_newest_first(versions: &mut Vec<String>) {
    versions.sort_by_cached_key(|v| std::cmp::Reverse(VersionKey::parse(v)));
    versions.dedup_by(|a, b| compare_versions(a, b) == Ordering::Equal);
}

/// Number of dot separated components in the release part of a version
///
/// `3.6` -> 2, `3.6.1-alpha.1` -> 3
pub fn component_count(version: &str) -> usize {
    version.split('-').next().unwrap_or(version).split('.').count()
}
