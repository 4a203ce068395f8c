use k8s_openapi::api::core::v1::ConfigMap;
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

use crate::{
    cluster_config::{self, ConsoleConfig, Infrastructure},
    config_builder::ConsoleServerConfigBuilder,
    console_plugin::{self, ConsolePlugin},
    constants,
    model::SynthesisError,
    operator_console::Console,
    route::{self, Route},
    utils,
    yaml_merger::ConsoleYamlMerger,
};

const CONSOLE_CONFIG_MAP_ASSET: &str = include_str!("../assets/configmaps/console-configmap.yaml");
const CONSOLE_PUBLIC_CONFIG_MAP_ASSET: &str = include_str!("../assets/configmaps/console-public-configmap.yaml");

/// Everything the console ConfigMap is synthesized from
#[derive(Debug, Clone, Copy)]
pub struct ConfigMapSources<'a> {
    pub operator_config: &'a Console,
    pub console_config: &'a ConsoleConfig,
    /// Fragment published by a cluster level component in `openshift-config-managed`
    pub managed_config: Option<&'a ConfigMap>,
    pub infrastructure_config: Option<&'a Infrastructure>,
    pub active_console_route: &'a Route,
    pub use_default_ca_file: bool,
    pub inactivity_timeout_seconds: i32,
    /// Plugins already filtered down to the enabled ones
    pub available_plugins: &'a [ConsolePlugin],
    pub managed_cluster_config_file: Option<&'a str>,
    pub release_version: Option<&'a str>,
}

/// Builds the `console-config` ConfigMap. The document is the merge of, by increasing
/// precedence: safe defaults, the managed fragment, the user customization and the unsupported
/// config overrides. The boolean is true when unsupported overrides were merged.
pub fn default_config_map(sources: &ConfigMapSources) -> Result<(ConfigMap, bool), SynthesisError> {
    let host = sources.active_console_route.host();
    let api_server_url = cluster_config::api_url(sources.infrastructure_config);
    let topology_mode = cluster_config::control_plane_topology(sources.infrastructure_config);
    let release_version = sources.release_version.unwrap_or_default();

    let default_config = ConsoleServerConfigBuilder::new()
        .host(&host)
        .logout_url(constants::DEFAULT_LOGOUT_URL)
        .brand(constants::DEFAULT_BRAND)
        .doc_url(constants::DEFAULT_DOC_URL)
        .oauth_serving_cert(sources.use_default_ca_file)
        .api_server_url(&api_server_url)
        .topology_mode(&topology_mode)
        .inactivity_timeout(sources.inactivity_timeout_seconds)
        .release_version(release_version)
        .config_yaml()
        .map_err(|render_error| {
            error!("Failed to generate default console-config: {}", render_error);
            SynthesisError::DefaultConfig(render_error)
        })?;

    let extracted_managed_config = extract_yaml(sources.managed_config);

    let operator_config = sources.operator_config;
    let customization = operator_config.customization();
    let custom_logo_key = customization.custom_logo_file.as_ref().map(|logo| logo.key.to_owned()).unwrap_or_default();
    let user_defined_config = ConsoleServerConfigBuilder::new()
        .host(&host)
        .logout_url(&sources.console_config.logout_redirect())
        .brand(customization.brand.as_deref().unwrap_or_default())
        .doc_url(customization.documentation_base_url.as_deref().unwrap_or_default())
        .oauth_serving_cert(sources.use_default_ca_file)
        .api_server_url(&api_server_url)
        .topology_mode(&topology_mode)
        .plugins(console_plugin::plugins_endpoint_map(sources.available_plugins))
        .i18n_namespaces(console_plugin::plugins_with_i18n_namespace(sources.available_plugins))
        .proxy(console_plugin::plugins_proxy_services(sources.available_plugins))
        .custom_logo_file(&custom_logo_key)
        .custom_product_name(customization.custom_product_name.as_deref().unwrap_or_default())
        .developer_catalog(customization.developer_catalog.clone())
        .project_access(customization.project_access.clone())
        .quick_starts(customization.quick_starts.clone())
        .custom_hostname_redirect_port(route::is_custom_route(sources.active_console_route))
        .add_page(customization.add_page.clone())
        .status_page_id(&operator_config.status_page_id())
        .inactivity_timeout(sources.inactivity_timeout_seconds)
        .managed_cluster_config_file(sources.managed_cluster_config_file.unwrap_or_default())
        .telemetry_configuration(telemetry_configuration(operator_config))
        .release_version(release_version)
        .config_yaml()
        .map_err(|render_error| {
            error!("Failed to generate user defined console-config: {}", render_error);
            SynthesisError::UserConfig(render_error)
        })?;

    let unsupported_config_override = operator_config.unsupported_config_overrides_raw();
    let will_merge_config_overrides = !unsupported_config_override.is_empty();
    if will_merge_config_overrides {
        debug!("With UnsupportedConfigOverrides: {}", String::from_utf8_lossy(&unsupported_config_override));
    }

    let layers: [&[u8]; 3] = [default_config.as_bytes(), extracted_managed_config.as_bytes(), user_defined_config.as_bytes()];
    let merged_config = ConsoleYamlMerger.merge(&layers, &unsupported_config_override).map_err(|merge_error| {
        error!("Failed to generate console-config ConfigMap: {}", merge_error);
        SynthesisError::Merge(merge_error)
    })?;

    let mut config_map = stub()?;
    config_map.data = Some(BTreeMap::from([(constants::CONSOLE_CONFIG_YAML_FILE.to_owned(), merged_config)]));
    utils::add_owner_ref(&mut config_map, utils::owner_ref_from(operator_config));

    Ok((config_map, will_merge_config_overrides))
}

/// Copies every `telemetry.console.openshift.io/<KEY>` annotation as `<KEY>`
pub fn telemetry_configuration(operator_config: &Console) -> BTreeMap<String, String> {
    operator_config
        .metadata
        .annotations
        .iter()
        .flatten()
        .filter_map(|(key, value)| {
            key.strip_prefix(constants::ANNOTATION_TELEMETRY_PREFIX)
                .filter(|stripped| !stripped.is_empty())
                .map(|stripped| (stripped.to_owned(), value.to_owned()))
        })
        .collect()
}

/// The managed fragment is the one document stored in the managed ConfigMap. When there are
/// several keys, the first in key order is used.
fn extract_yaml(managed_config: Option<&ConfigMap>) -> String {
    let Some(data) = managed_config.and_then(|config_map| config_map.data.as_ref()) else {
        return String::new();
    };
    if data.len() > 1 {
        warn!("Managed console config has {} keys, only the first one is merged", data.len());
    }
    data.values().next().cloned().unwrap_or_default()
}

fn read_config_map(asset: &str) -> Result<ConfigMap, SynthesisError> {
    serde_yaml::from_str(asset).map_err(SynthesisError::Asset)
}

pub fn console_config_map_stub() -> Result<ConfigMap, SynthesisError> {
    read_config_map(CONSOLE_CONFIG_MAP_ASSET)
}

pub fn stub() -> Result<ConfigMap, SynthesisError> {
    let mut config_map = console_config_map_stub()?;
    config_map.metadata.name = Some(constants::OPENSHIFT_CONSOLE_CONFIG_MAP_NAME.to_owned());
    Ok(config_map)
}

fn public_config_stub() -> Result<ConfigMap, SynthesisError> {
    let mut config_map = read_config_map(CONSOLE_PUBLIC_CONFIG_MAP_ASSET)?;
    config_map.metadata.name = Some(constants::OPENSHIFT_CONSOLE_PUBLIC_CONFIG_MAP_NAME.to_owned());
    config_map.metadata.namespace = Some(constants::OPENSHIFT_CONFIG_MANAGED_NAMESPACE.to_owned());
    Ok(config_map)
}

/// `console-public` ConfigMap advertising where the console is served
pub fn default_public_config(console_url: &str) -> Result<ConfigMap, SynthesisError> {
    let mut config_map = public_config_stub()?;
    config_map.data = Some(BTreeMap::from([(constants::CONSOLE_PUBLIC_URL_KEY.to_owned(), console_url.to_owned())]));
    Ok(config_map)
}

pub fn empty_public_config() -> Result<ConfigMap, SynthesisError> {
    let mut config_map = public_config_stub()?;
    config_map.data = Some(BTreeMap::new());
    Ok(config_map)
}
