use kube::{CustomResource, ResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constants;

/// The subset of an OpenShift route the console cares about: the host it is exposed on.
#[derive(CustomResource, Serialize, Deserialize, Debug, PartialEq, Clone, JsonSchema, Default)]
#[kube(group = "route.openshift.io", version = "v1", kind = "Route", plural = "routes", namespaced)]
#[serde(rename_all = "camelCase")]
pub struct RouteSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Route {
    pub fn host(&self) -> String {
        self.spec.host.to_owned().unwrap_or_default()
    }
}

/// A route named `console-custom` serves the console on a custom hostname
pub fn is_custom_route(route: &Route) -> bool {
    route.name_any() == constants::OPENSHIFT_CONSOLE_CUSTOM_ROUTE_NAME
}

/// Prefers the custom route when it has been given a host, falling back to the default route.
pub fn active_route(custom_route: Option<Route>, default_route: Option<Route>) -> Option<Route> {
    match custom_route {
        Some(route) if !route.host().is_empty() => Some(route),
        _ => default_route,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(name: &str, host: Option<&str>) -> Route {
        Route::new(
            name,
            RouteSpec {
                host: host.map(|host| host.to_owned()),
                ..RouteSpec::default()
            },
        )
    }

    #[test]
    fn test_is_custom_route() {
        assert!(is_custom_route(&route("console-custom", Some("console.example.com"))));
        assert!(!is_custom_route(&route("console", Some("console.example.com"))));
        assert!(!is_custom_route(&route("downloads", None)));
    }

    #[test]
    fn test_active_route_prefers_custom() {
        let active = active_route(
            Some(route("console-custom", Some("custom.example.com"))),
            Some(route("console", Some("console.apps.example.com"))),
        )
        .unwrap();
        assert_eq!(active.host(), "custom.example.com");
    }

    #[test]
    fn test_active_route_without_custom_host() {
        let active = active_route(
            Some(route("console-custom", None)),
            Some(route("console", Some("console.apps.example.com"))),
        )
        .unwrap();
        assert_eq!(active.name_any(), "console");
        assert!(active_route(None, None).is_none());
    }
}
