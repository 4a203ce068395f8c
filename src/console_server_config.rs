use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::operator_console::{AddPage, DeveloperConsoleCatalogCustomization, ProjectAccess, QuickStarts};

/// Document read by the console server through `--config`. Empty fields are never emitted so
/// that a partially filled document only contributes the keys it really sets.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub api_version: String,
    pub kind: String,
    pub serving_info: ServingInfo,
    pub cluster_info: ClusterInfo,
    pub auth: Auth,
    pub customization: Customization,
    pub providers: Providers,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub plugins: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub i18n_namespaces: Vec<String>,
    #[serde(default, skip_serializing_if = "Proxy::is_empty")]
    pub proxy: Proxy,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub managed_cluster_config_file: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub telemetry: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServingInfo {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bind_address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cert_file: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key_file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_port: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInfo {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub console_base_address: String,
    #[serde(default, rename = "masterPublicURL", skip_serializing_if = "String::is_empty")]
    pub master_public_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub control_plane_topology: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub release_version: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct Auth {
    #[serde(default, rename = "clientID", skip_serializing_if = "String::is_empty")]
    pub client_id: String,
    #[serde(default, rename = "clientSecretFile", skip_serializing_if = "String::is_empty")]
    pub client_secret_file: String,
    #[serde(default, rename = "oauthEndpointCAFile", skip_serializing_if = "String::is_empty")]
    pub oauth_endpoint_ca_file: String,
    #[serde(default, rename = "logoutRedirect", skip_serializing_if = "String::is_empty")]
    pub logout_redirect: String,
    #[serde(default, rename = "inactivityTimeoutSeconds", skip_serializing_if = "Option::is_none")]
    pub inactivity_timeout_seconds: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub branding: String,
    #[serde(default, rename = "documentationBaseURL", skip_serializing_if = "String::is_empty")]
    pub documentation_base_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub custom_product_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub custom_logo_file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_catalog: Option<DeveloperConsoleCatalogCustomization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_access: Option<ProjectAccess>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_starts: Option<QuickStarts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_page: Option<AddPage>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct Providers {
    #[serde(default, rename = "statuspageID", skip_serializing_if = "String::is_empty")]
    pub statuspage_id: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct Proxy {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<ProxyService>,
}

impl Proxy {
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// A plugin backend the console server proxies requests to
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
pub struct ProxyService {
    #[serde(rename = "consoleAPIPath")]
    pub console_api_path: String,
    pub endpoint: String,
    #[serde(rename = "caCertificate")]
    pub ca_certificate: String,
    pub authorize: bool,
}
