//! Origin image tag grammar
//!
//! Exactly three numeric components with an optional `v` and a free-form suffix:
//! - `v3.6.0`, `3.6.0`
//! - `v3.6.0-alpha.1`, `v1.5.0-rc.0`

use std::sync::LazyLock;

use regex::Regex;

use crate::inventory::types::DeploymentType;
use crate::version::grammar::TagGrammar;

static ORIGIN_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v?\d+\.\d+\.\d+(-[\w\-.]*)?$").unwrap());

pub struct OriginTagGrammar;

impl TagGrammar for OriginTagGrammar {
    fn deployment_type(&self) -> DeploymentType {
        DeploymentType::Origin
    }

    fn expected(&self) -> &'static str {
        "an optional leading v, three numeric components and an optional -suffix (e.g. v3.6.0, v3.6.0-alpha.1)"
    }

    fn is_valid(&self, tag: &str) -> bool {
        ORIGIN_TAG_RE.is_match(tag)
    }
}
