//! Package repository query through `repoquery`

use tracing::debug;

use crate::config::RepoqueryConfig;
use crate::version::collaborator::{DiscoveryResult, PackageQuery};
use crate::version::collaborators::run_command;
use crate::version::error::QueryError;
use crate::version::semver::sort_newest_first;

/// Runs `repoquery --qf %{version} <package>` and reports the available versions
pub struct RepoqueryCommand {
    program: String,
    args: Vec<String>,
}

impl RepoqueryCommand {
    pub fn new(config: &RepoqueryConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
        }
    }

    fn command_args(&self, package_name: &str) -> Vec<String> {
        let mut args = self.args.clone();
        args.extend([
            "--qf".to_string(),
            "%{version}".to_string(),
            package_name.to_string(),
        ]);
        args
    }
}

impl Default for RepoqueryCommand {
    fn default() -> Self {
        Self::new(&RepoqueryConfig::default())
    }
}

impl PackageQuery for RepoqueryCommand {
    fn query(&self, package_name: &str) -> Result<DiscoveryResult, QueryError> {
        let stdout = run_command(&self.program, &self.command_args(package_name))?;
        let result = parse_repoquery_output(&stdout);
        debug!(
            "repoquery {}: found={} versions={:?}",
            package_name, result.package_found, result.available_versions
        );
        Ok(result)
    }
}

/// Parse `%{version}` lines; no lines means the package is unknown
pub fn parse_repoquery_output(stdout: &str) -> DiscoveryResult {
    let mut versions: Vec<String> = stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    sort_newest_first(&mut versions);

    DiscoveryResult::new(!versions.is_empty(), versions)
}
