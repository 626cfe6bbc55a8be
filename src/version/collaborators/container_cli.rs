//! Image inspection by running the platform CLI image

use crate::config::ContainerConfig;
use crate::inventory::types::DeploymentType;
use crate::version::collaborator::ImageInspector;
use crate::version::collaborators::run_command;
use crate::version::error::QueryError;

/// Runs `<runtime> run --rm <image>:<tag> version`
pub struct ContainerCli {
    runtime: String,
    origin_image: String,
    enterprise_image: String,
}

impl ContainerCli {
    pub fn new(config: &ContainerConfig) -> Self {
        Self {
            runtime: config.runtime.clone(),
            origin_image: config.origin_image.clone(),
            enterprise_image: config.enterprise_image.clone(),
        }
    }

    /// CLI image reference for a deployment type and tag
    fn image_ref(&self, deployment_type: &DeploymentType, tag: &str) -> String {
        let image = match deployment_type {
            DeploymentType::Enterprise => &self.enterprise_image,
            DeploymentType::Origin | DeploymentType::Unknown(_) => &self.origin_image,
        };
        format!("{}:{}", image, tag)
    }
}

impl Default for ContainerCli {
    fn default() -> Self {
        Self::new(&ContainerConfig::default())
    }
}

impl ImageInspector for ContainerCli {
    fn cli_version(
        &self,
        deployment_type: &DeploymentType,
        tag: &str,
    ) -> Result<String, QueryError> {
        let image = self.image_ref(deployment_type, tag);
        let args = vec![
            "run".to_string(),
            "--rm".to_string(),
            image.clone(),
            "version".to_string(),
        ];
        let stdout = run_command(&self.runtime, &args)?;

        stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or_else(|| QueryError::InvalidOutput {
                command: format!("{} run --rm {} version", self.runtime, image),
                output: stdout.clone(),
            })
    }
}
