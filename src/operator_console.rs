use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Operator level configuration of the console: customization, providers, enabled plugins and
/// the raw unsupported overrides. There is a single instance named `cluster`.
#[derive(CustomResource, Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
#[kube(
    group = "operator.openshift.io",
    version = "v1",
    kind = "Console",
    plural = "consoles",
    status = "ConsoleStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleSpec {
    #[serde(default)]
    pub management_state: ManagementState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<ConsoleCustomization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub providers: Option<ConsoleProviders>,
    /// Names of the ConsolePlugins enabled in the console
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<String>,
    /// Escape hatch merged on top of the generated config. Not validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsupported_config_overrides: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, JsonSchema, Default)]
pub enum ManagementState {
    #[default]
    Managed,
    Unmanaged,
    Removed,
    Force,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleCustomization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, rename = "documentationBaseURL", skip_serializing_if = "Option::is_none")]
    pub documentation_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_logo_file: Option<ConfigMapFileReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_catalog: Option<DeveloperConsoleCatalogCustomization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_access: Option<ProjectAccess>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_starts: Option<QuickStarts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_page: Option<AddPage>,
}

/// Key of a file stored in a ConfigMap of the `openshift-config` namespace
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
pub struct ConfigMapFileReference {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub key: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperConsoleCatalogCustomization {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<DeveloperConsoleCatalogCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<DeveloperConsoleCatalogTypes>,
}

impl DeveloperConsoleCatalogCustomization {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.types.is_none()
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
pub struct DeveloperConsoleCatalogCategory {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcategories: Vec<DeveloperConsoleCatalogCategory>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
pub struct DeveloperConsoleCatalogTypes {
    pub state: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enabled: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAccess {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub available_cluster_roles: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
pub struct QuickStarts {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddPage {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_actions: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
pub struct ConsoleProviders {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statuspage: Option<StatuspageProvider>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
pub struct StatuspageProvider {
    #[serde(default, rename = "pageID")]
    pub page_id: String,
}

impl Console {
    pub fn customization(&self) -> ConsoleCustomization {
        self.spec.customization.clone().unwrap_or_default()
    }

    pub fn status_page_id(&self) -> String {
        self.spec
            .providers
            .as_ref()
            .and_then(|providers| providers.statuspage.as_ref())
            .map(|statuspage| statuspage.page_id.to_owned())
            .unwrap_or_default()
    }

    /// Raw bytes of `spec.unsupportedConfigOverrides`; empty when unset
    pub fn unsupported_config_overrides_raw(&self) -> Vec<u8> {
        match &self.spec.unsupported_config_overrides {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(overrides) => serde_json::to_vec(overrides).unwrap_or_default(),
        }
    }

    pub fn is_unmanaged(&self) -> bool {
        self.spec.management_state == ManagementState::Unmanaged
    }

    pub fn is_removed(&self) -> bool {
        self.spec.management_state == ManagementState::Removed
    }
}
