use kube::{CustomResource, ResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{console_server_config::ProxyService, constants};

/// A dynamic console plugin served by an in-cluster service.
#[derive(CustomResource, Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
#[kube(
    group = "console.openshift.io",
    version = "v1alpha1",
    kind = "ConsolePlugin",
    plural = "consoleplugins"
)]
#[serde(rename_all = "camelCase")]
pub struct ConsolePluginSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub service: ConsolePluginService,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub proxy: Vec<ConsolePluginProxy>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConsolePluginService {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub port: i32,
    #[serde(default)]
    pub base_path: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConsolePluginProxy {
    /// Rules without a type are never proxied
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<ConsolePluginProxyType>,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub service: ConsolePluginProxyServiceConfig,
    #[serde(default, rename = "caCertificate", skip_serializing_if = "String::is_empty")]
    pub ca_certificate: String,
    #[serde(default)]
    pub authorize: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, JsonSchema)]
pub enum ConsolePluginProxyType {
    Service,
    #[serde(other)]
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
pub struct ConsolePluginProxyServiceConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub port: i32,
}

impl ConsolePlugin {
    pub fn is_i18n_enabled(&self) -> bool {
        self.annotations()
            .get(constants::ANNOTATION_PLUGIN_I18N)
            .map_or(false, |value| value == "true")
    }
}

/// Builds `https://<name>.<namespace>.svc.cluster.local:<port><path>`. A relative path gets a
/// leading slash, as any URL with an authority requires.
fn service_url(name: &str, namespace: &str, port: i32, path: &str) -> String {
    let mut url = format!("https://{}.{}.svc.cluster.local:{}", name, namespace, port);
    if !path.is_empty() && !path.starts_with('/') {
        url.push('/');
    }
    url.push_str(&escape_path(path));
    url
}

/// Percent-encodes every byte that may not appear verbatim in a URL path segment
fn escape_path(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for byte in path.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => escaped.push(byte as char),
            b'$' | b'&' | b'+' | b',' | b'/' | b':' | b';' | b'=' | b'@' => escaped.push(byte as char),
            _ => escaped.push_str(&format!("%{:02X}", byte)),
        }
    }
    escaped
}

fn plugin_service_url(plugin: &ConsolePlugin) -> String {
    let service = &plugin.spec.service;
    service_url(&service.name, &service.namespace, service.port, &service.base_path)
}

fn proxy_service_url(service: &ConsolePluginProxyServiceConfig) -> String {
    service_url(&service.name, &service.namespace, service.port, "")
}

fn console_api_path(plugin_name: &str, proxy: &ConsolePluginProxy) -> String {
    format!("{}{}/{}/", constants::PLUGIN_PROXY_ENDPOINT, plugin_name, proxy.alias)
}

/// Plugin name to the URL its assets are served from
pub fn plugins_endpoint_map(plugins: &[ConsolePlugin]) -> BTreeMap<String, String> {
    plugins
        .iter()
        .map(|plugin| (plugin.name_any(), plugin_service_url(plugin)))
        .collect()
}

/// i18n namespaces of the plugins that ship their own translations
pub fn plugins_with_i18n_namespace(plugins: &[ConsolePlugin]) -> Vec<String> {
    plugins
        .iter()
        .filter(|plugin| plugin.is_i18n_enabled())
        .map(|plugin| format!("plugin__{}", plugin.name_any()))
        .collect()
}

pub fn plugins_proxy_services(plugins: &[ConsolePlugin]) -> Vec<ProxyService> {
    let mut proxy_services: Vec<ProxyService> = Vec::new();
    for plugin in plugins {
        let plugin_name = plugin.name_any();
        for proxy in plugin.spec.proxy.iter().filter(|proxy| proxy.type_ == Some(ConsolePluginProxyType::Service)) {
            proxy_services.push(ProxyService {
                console_api_path: console_api_path(&plugin_name, proxy),
                endpoint: proxy_service_url(&proxy.service),
                ca_certificate: proxy.ca_certificate.to_owned(),
                authorize: proxy.authorize,
            });
        }
    }
    proxy_services
}

/// Registered plugins the operator has enabled, in the order they are enabled.
/// Names without a registered plugin are skipped.
pub fn enabled_plugins(registered: &[ConsolePlugin], enabled_names: &[String]) -> Vec<ConsolePlugin> {
    enabled_names
        .iter()
        .filter_map(|name| registered.iter().find(|plugin| plugin.name_any() == *name).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plugin(name: &str, service: ConsolePluginService, proxy: Vec<ConsolePluginProxy>) -> ConsolePlugin {
        ConsolePlugin::new(
            name,
            ConsolePluginSpec {
                service,
                proxy,
                ..ConsolePluginSpec::default()
            },
        )
    }

    fn service(name: &str, namespace: &str, port: i32, base_path: &str) -> ConsolePluginService {
        ConsolePluginService {
            name: name.to_owned(),
            namespace: namespace.to_owned(),
            port,
            base_path: base_path.to_owned(),
        }
    }

    fn with_i18n(mut plugin: ConsolePlugin) -> ConsolePlugin {
        plugin
            .annotations_mut()
            .insert(constants::ANNOTATION_PLUGIN_I18N.to_owned(), "true".to_owned());
        plugin
    }

    #[test]
    fn test_plugins_endpoint_map() {
        let plugins = vec![plugin("p1", service("svc", "ns", 443, "/api"), vec![])];
        let expected: BTreeMap<String, String> =
            BTreeMap::from([("p1".to_owned(), "https://svc.ns.svc.cluster.local:443/api".to_owned())]);
        assert_eq!(plugins_endpoint_map(&plugins), expected);
    }

    #[test]
    fn test_plugins_endpoint_map_relative_base_path() {
        let plugins = vec![
            plugin("p1", service("svc", "ns", 9443, "plugin"), vec![]),
            plugin("p2", service("other", "ns2", 8443, ""), vec![]),
        ];
        let endpoints = plugins_endpoint_map(&plugins);
        assert_eq!(endpoints["p1"], "https://svc.ns.svc.cluster.local:9443/plugin");
        assert_eq!(endpoints["p2"], "https://other.ns2.svc.cluster.local:8443");
        assert!(plugins_endpoint_map(&[]).is_empty());
    }

    #[test]
    fn test_plugins_with_i18n_namespace() {
        let plugins = vec![
            plugin("a", ConsolePluginService::default(), vec![]),
            with_i18n(plugin("b", ConsolePluginService::default(), vec![])),
            plugin("c", ConsolePluginService::default(), vec![]),
        ];
        assert_eq!(plugins_with_i18n_namespace(&plugins), vec!["plugin__b".to_owned()]);
    }

    #[test]
    fn test_i18n_annotation_must_be_true() {
        let mut disabled = plugin("a", ConsolePluginService::default(), vec![]);
        disabled
            .annotations_mut()
            .insert(constants::ANNOTATION_PLUGIN_I18N.to_owned(), "false".to_owned());
        assert!(!disabled.is_i18n_enabled());
    }

    #[test]
    fn test_plugins_proxy_services() {
        let proxy = ConsolePluginProxy {
            type_: Some(ConsolePluginProxyType::Service),
            alias: "backend".to_owned(),
            service: ConsolePluginProxyServiceConfig {
                name: "backend-svc".to_owned(),
                namespace: "plugin-ns".to_owned(),
                port: 8443,
            },
            ca_certificate: "-----BEGIN CERTIFICATE-----".to_owned(),
            authorize: true,
        };
        let unknown = ConsolePluginProxy {
            type_: Some(ConsolePluginProxyType::Unknown),
            alias: "ignored".to_owned(),
            ..ConsolePluginProxy::default()
        };
        let plugins = vec![plugin("p1", service("svc", "ns", 443, "/api"), vec![proxy, unknown])];
        assert_eq!(
            plugins_proxy_services(&plugins),
            vec![ProxyService {
                console_api_path: "/api/proxy/plugin/p1/backend/".to_owned(),
                endpoint: "https://backend-svc.plugin-ns.svc.cluster.local:8443".to_owned(),
                ca_certificate: "-----BEGIN CERTIFICATE-----".to_owned(),
                authorize: true,
            }]
        );
    }

    #[test]
    fn test_unknown_proxy_type_deserializes() {
        let proxy: ConsolePluginProxy = serde_yaml::from_str("type: Route\nalias: web\n").unwrap();
        assert_eq!(proxy.type_, Some(ConsolePluginProxyType::Unknown));
    }

    #[test]
    fn test_untyped_proxy_rule_is_not_proxied() {
        let spec: ConsolePluginSpec = serde_yaml::from_str(
            r#"
service:
  name: svc
  namespace: ns
  port: 443
  basePath: /api
proxy:
  - alias: backend
    service:
      name: b
      namespace: ns
      port: 8443
"#,
        )
        .unwrap();
        assert_eq!(spec.proxy[0].type_, None);
        let plugins = vec![ConsolePlugin::new("p1", spec)];
        assert!(plugins_proxy_services(&plugins).is_empty());
        assert_eq!(plugins_endpoint_map(&plugins).len(), 1);
    }

    #[test]
    fn test_base_path_is_escaped() {
        let plugins = vec![
            plugin("p1", service("svc", "ns", 443, "/a b"), vec![]),
            plugin("p2", service("svc", "ns", 443, "/plugin/v1;x=1?q"), vec![]),
        ];
        let endpoints = plugins_endpoint_map(&plugins);
        assert_eq!(endpoints["p1"], "https://svc.ns.svc.cluster.local:443/a%20b");
        assert_eq!(endpoints["p2"], "https://svc.ns.svc.cluster.local:443/plugin/v1;x=1%3Fq");
    }

    #[test]
    fn test_enabled_plugins() {
        let registered = vec![
            plugin("a", ConsolePluginService::default(), vec![]),
            plugin("b", ConsolePluginService::default(), vec![]),
        ];
        let enabled = enabled_plugins(&registered, &["b".to_owned(), "missing".to_owned(), "a".to_owned()]);
        let names: Vec<String> = enabled.iter().map(|plugin| plugin.name_any()).collect();
        assert_eq!(names, vec!["b".to_owned(), "a".to_owned()]);
    }
}
