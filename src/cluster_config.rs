use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Cluster wide console settings owned by the cluster administrator (`config.openshift.io/v1 Console`).
#[derive(CustomResource, Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
#[kube(
    group = "config.openshift.io",
    version = "v1",
    kind = "Console",
    root = "ConsoleConfig",
    plural = "consoles"
)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleConfigSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<ConsoleAuthentication>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleAuthentication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logout_redirect: Option<String>,
}

impl ConsoleConfig {
    pub fn logout_redirect(&self) -> String {
        self.spec
            .authentication
            .as_ref()
            .and_then(|authentication| authentication.logout_redirect.to_owned())
            .unwrap_or_default()
    }
}

/// Cluster topology facts. Only the status, populated by the installer, is read.
#[derive(CustomResource, Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
#[kube(
    group = "config.openshift.io",
    version = "v1",
    kind = "Infrastructure",
    plural = "infrastructures",
    status = "InfrastructureStatus"
)]
pub struct InfrastructureSpec {}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureStatus {
    #[serde(default, rename = "apiServerURL", skip_serializing_if = "Option::is_none")]
    pub api_server_url: Option<String>,
    /// `HighlyAvailable`, `SingleReplica` or `External`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_plane_topology: Option<String>,
}

/// API server URL, empty when the infrastructure is unknown
pub fn api_url(infrastructure: Option<&Infrastructure>) -> String {
    infrastructure
        .and_then(|infrastructure| infrastructure.status.as_ref())
        .and_then(|status| status.api_server_url.to_owned())
        .unwrap_or_default()
}

pub fn control_plane_topology(infrastructure: Option<&Infrastructure>) -> String {
    infrastructure
        .and_then(|infrastructure| infrastructure.status.as_ref())
        .and_then(|status| status.control_plane_topology.to_owned())
        .unwrap_or_default()
}
