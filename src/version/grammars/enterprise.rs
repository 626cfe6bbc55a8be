//! Enterprise image tag grammar
//!
//! Mandatory `v`, at least two numeric components, optional numeric `-release`:
//! - `v3.6`, `v3.6.173.0.5`
//! - `v3.6.173.0.5-1`, `v3.6.1-4.5`

use std::sync::LazyLock;

use regex::Regex;

use crate::inventory::types::DeploymentType;
use crate::version::grammar::TagGrammar;

static ENTERPRISE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v\d+\.\d+(\.\d+)*(-\d+(\.\d+)*)?$").unwrap());

pub struct EnterpriseTagGrammar;

impl TagGrammar for EnterpriseTagGrammar {
    fn deployment_type(&self) -> DeploymentType {
        DeploymentType::Enterprise
    }

    fn expected(&self) -> &'static str {
        "a leading v, two or more numeric components and an optional numeric -release (e.g. v3.6, v3.6.173.0.5-1)"
    }

    fn is_valid(&self, tag: &str) -> bool {
        ENTERPRISE_TAG_RE.is_match(tag)
    }
}
