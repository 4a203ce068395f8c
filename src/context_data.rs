use std::env;

use kube::Client;

use crate::{constants, model::Error, operator_config::OperatorConfig};

/// Context injected with each `reconcile` and `on_error` method invocation.
#[derive(Clone)]
pub struct ContextData {
    /// Kubernetes client to make Kubernetes API requests with. Required for K8S resource management.
    pub client: Client,

    pub config: OperatorConfig,
}

impl ContextData {
    pub fn new(client: Client) -> Result<Self, Error> {
        let config_path = config_path()?;
        let config_file = std::fs::File::open(&config_path)
            .map_err(|error| Error::OperatorConfigError(format!("Could not open config file {}: {}", config_path, error)))?;
        let config: OperatorConfig = serde_yaml::from_reader(config_file)?;
        Ok(ContextData { client, config })
    }
}

/// `/app/config/config.yaml` in production, `./sample_config-<environment>.yaml` anywhere else
fn config_path() -> Result<String, Error> {
    let operator_environment = env::var(constants::OPERATOR_ENVIRONMENT).unwrap_or_else(|_| "production".to_owned());
    if operator_environment.eq("production") {
        return Ok("/app/config/config.yaml".to_owned());
    }
    let current_dir = env::current_dir().map_err(|error| Error::OperatorConfigError(error.to_string()))?;
    Ok(current_dir
        .join(format!("sample_config-{operator_environment}.yaml"))
        .to_string_lossy()
        .into_owned())
}
