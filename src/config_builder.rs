use std::collections::BTreeMap;

use crate::{
    console_server_config::{Auth, ClusterInfo, Config, Customization, Providers, Proxy, ProxyService, ServingInfo},
    constants,
    model::RenderError,
    operator_console::{AddPage, DeveloperConsoleCatalogCustomization, ProjectAccess, QuickStarts},
    utils,
};

/// Accumulates console server settings and renders them to the YAML document the console
/// server reads. Setters take the builder by value and hand back the updated one, so calls can
/// be chained in any order. Empty values leave the builder untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsoleServerConfigBuilder {
    host: String,
    logout_redirect_url: String,
    brand: String,
    doc_url: String,
    api_server_url: String,
    topology_mode: String,
    release_version: String,
    ca_file: String,
    inactivity_timeout_seconds: Option<i32>,
    plugins: BTreeMap<String, String>,
    i18n_namespaces: Vec<String>,
    proxy_services: Vec<ProxyService>,
    custom_logo_file: String,
    custom_product_name: String,
    developer_catalog: Option<DeveloperConsoleCatalogCustomization>,
    project_access: Option<ProjectAccess>,
    quick_starts: Option<QuickStarts>,
    add_page: Option<AddPage>,
    redirect_port: Option<i32>,
    status_page_id: String,
    managed_cluster_config_file: String,
    telemetry: BTreeMap<String, String>,
}

impl ConsoleServerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(self, host: &str) -> Self {
        if host.is_empty() {
            return self;
        }
        Self { host: host.to_owned(), ..self }
    }

    pub fn logout_url(self, logout_redirect_url: &str) -> Self {
        if logout_redirect_url.is_empty() {
            return self;
        }
        Self { logout_redirect_url: logout_redirect_url.to_owned(), ..self }
    }

    pub fn brand(self, brand: &str) -> Self {
        if brand.is_empty() {
            return self;
        }
        Self { brand: brand.to_owned(), ..self }
    }

    pub fn doc_url(self, doc_url: &str) -> Self {
        if doc_url.is_empty() {
            return self;
        }
        Self { doc_url: doc_url.to_owned(), ..self }
    }

    /// Selects the CA bundle used to verify the OAuth server: the service account CA when the
    /// cluster does not publish a dedicated OAuth serving certificate bundle.
    pub fn oauth_serving_cert(self, use_default_ca_file: bool) -> Self {
        let ca_file = if use_default_ca_file {
            constants::DEFAULT_SERVICE_ACCOUNT_CA_FILE
        } else {
            constants::OAUTH_SERVING_CERT_CA_FILE
        };
        Self { ca_file: ca_file.to_owned(), ..self }
    }

    pub fn api_server_url(self, api_server_url: &str) -> Self {
        if api_server_url.is_empty() {
            return self;
        }
        Self { api_server_url: api_server_url.to_owned(), ..self }
    }

    pub fn topology_mode(self, topology_mode: &str) -> Self {
        if topology_mode.is_empty() {
            return self;
        }
        Self { topology_mode: topology_mode.to_owned(), ..self }
    }

    pub fn release_version(self, release_version: &str) -> Self {
        if release_version.is_empty() {
            return self;
        }
        Self { release_version: release_version.to_owned(), ..self }
    }

    pub fn inactivity_timeout(self, timeout_seconds: i32) -> Self {
        if timeout_seconds <= 0 {
            return self;
        }
        Self { inactivity_timeout_seconds: Some(timeout_seconds), ..self }
    }

    pub fn plugins(self, plugins: BTreeMap<String, String>) -> Self {
        if plugins.is_empty() {
            return self;
        }
        Self { plugins, ..self }
    }

    pub fn i18n_namespaces(self, i18n_namespaces: Vec<String>) -> Self {
        if i18n_namespaces.is_empty() {
            return self;
        }
        Self { i18n_namespaces, ..self }
    }

    pub fn proxy(self, proxy_services: Vec<ProxyService>) -> Self {
        if proxy_services.is_empty() {
            return self;
        }
        Self { proxy_services, ..self }
    }

    /// `key` is the file name inside the logo ConfigMap, mounted under `/var/logo/`
    pub fn custom_logo_file(self, key: &str) -> Self {
        if key.is_empty() {
            return self;
        }
        Self { custom_logo_file: format!("{}{}", constants::CUSTOM_LOGO_MOUNT_PATH, key), ..self }
    }

    pub fn custom_product_name(self, product_name: &str) -> Self {
        if product_name.is_empty() {
            return self;
        }
        Self { custom_product_name: product_name.to_owned(), ..self }
    }

    pub fn developer_catalog(self, developer_catalog: Option<DeveloperConsoleCatalogCustomization>) -> Self {
        match developer_catalog {
            Some(catalog) if !catalog.is_empty() => Self { developer_catalog: Some(catalog), ..self },
            _ => self,
        }
    }

    pub fn project_access(self, project_access: Option<ProjectAccess>) -> Self {
        match project_access {
            Some(access) if !access.available_cluster_roles.is_empty() => Self { project_access: Some(access), ..self },
            _ => self,
        }
    }

    pub fn quick_starts(self, quick_starts: Option<QuickStarts>) -> Self {
        match quick_starts {
            Some(quick_starts) if !quick_starts.disabled.is_empty() => Self { quick_starts: Some(quick_starts), ..self },
            _ => self,
        }
    }

    pub fn add_page(self, add_page: Option<AddPage>) -> Self {
        match add_page {
            Some(add_page) if !add_page.disabled_actions.is_empty() => Self { add_page: Some(add_page), ..self },
            _ => self,
        }
    }

    /// A console behind a custom hostname also listens on the redirect port
    pub fn custom_hostname_redirect_port(self, is_custom_hostname: bool) -> Self {
        if !is_custom_hostname {
            return self;
        }
        Self { redirect_port: Some(constants::CONSOLE_REDIRECT_PORT), ..self }
    }

    pub fn status_page_id(self, status_page_id: &str) -> Self {
        if status_page_id.is_empty() {
            return self;
        }
        Self { status_page_id: status_page_id.to_owned(), ..self }
    }

    pub fn managed_cluster_config_file(self, file: &str) -> Self {
        if file.is_empty() {
            return self;
        }
        Self { managed_cluster_config_file: file.to_owned(), ..self }
    }

    pub fn telemetry_configuration(self, telemetry: BTreeMap<String, String>) -> Self {
        if telemetry.is_empty() {
            return self;
        }
        Self { telemetry, ..self }
    }

    /// Assembles the console server document. The host is the only mandatory setting.
    pub fn config(&self) -> Result<Config, RenderError> {
        if self.host.is_empty() {
            return Err(RenderError::MissingField("host"));
        }
        Ok(Config {
            api_version: constants::CONSOLE_CONFIG_API_VERSION.to_owned(),
            kind: constants::CONSOLE_CONFIG_KIND.to_owned(),
            serving_info: self.serving_info(),
            cluster_info: self.cluster_info(),
            auth: self.auth(),
            customization: self.customization(),
            providers: Providers {
                statuspage_id: self.status_page_id.to_owned(),
            },
            plugins: self.plugins.clone(),
            i18n_namespaces: self.i18n_namespaces.clone(),
            proxy: Proxy {
                services: self.proxy_services.clone(),
            },
            managed_cluster_config_file: self.managed_cluster_config_file.to_owned(),
            telemetry: self.telemetry.clone(),
        })
    }

    pub fn config_yaml(&self) -> Result<String, RenderError> {
        let config = self.config()?;
        serde_yaml::to_string(&config).map_err(RenderError::Serialize)
    }

    fn serving_info(&self) -> ServingInfo {
        ServingInfo {
            bind_address: constants::CONSOLE_BIND_ADDRESS.to_owned(),
            cert_file: constants::CONSOLE_SERVING_CERT_FILE.to_owned(),
            key_file: constants::CONSOLE_SERVING_KEY_FILE.to_owned(),
            redirect_port: self.redirect_port,
        }
    }

    fn cluster_info(&self) -> ClusterInfo {
        ClusterInfo {
            console_base_address: utils::https(&self.host),
            master_public_url: self.api_server_url.to_owned(),
            control_plane_topology: self.topology_mode.to_owned(),
            release_version: self.release_version.to_owned(),
        }
    }

    fn auth(&self) -> Auth {
        Auth {
            client_id: constants::CONSOLE_OAUTH_CLIENT_ID.to_owned(),
            client_secret_file: constants::CONSOLE_OAUTH_CLIENT_SECRET_FILE.to_owned(),
            oauth_endpoint_ca_file: self.ca_file.to_owned(),
            logout_redirect: self.logout_redirect_url.to_owned(),
            inactivity_timeout_seconds: self.inactivity_timeout_seconds,
        }
    }

    fn customization(&self) -> Customization {
        Customization {
            branding: self.brand.to_owned(),
            documentation_base_url: self.doc_url.to_owned(),
            custom_product_name: self.custom_product_name.to_owned(),
            custom_logo_file: self.custom_logo_file.to_owned(),
            developer_catalog: self.developer_catalog.clone(),
            project_access: self.project_access.clone(),
            quick_starts: self.quick_starts.clone(),
            add_page: self.add_page.clone(),
        }
    }
}
