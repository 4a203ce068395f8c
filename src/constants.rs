// Operator Constants
pub const RECONCILE_FREQUENCY: u64 = 10;
pub const OPERATOR_ENVIRONMENT: &str = "OPERATOR_ENVIRONMENT";
pub const OPERATOR_FIELD_MANAGER: &str = "console-operator";
pub const OPERATOR_CONFIG_NAME: &str = "cluster";

// Namespaces
pub const OPENSHIFT_CONSOLE_NAMESPACE: &str = "openshift-console";
pub const OPENSHIFT_CONFIG_MANAGED_NAMESPACE: &str = "openshift-config-managed";

// Resource names
pub const OPENSHIFT_CONSOLE_CONFIG_MAP_NAME: &str = "console-config";
pub const OPENSHIFT_CONSOLE_PUBLIC_CONFIG_MAP_NAME: &str = "console-public";
pub const OPENSHIFT_CONSOLE_ROUTE_NAME: &str = "console";
pub const OPENSHIFT_CONSOLE_CUSTOM_ROUTE_NAME: &str = "console-custom";
pub const OAUTH_SERVING_CERT_CONFIG_MAP_NAME: &str = "oauth-serving-cert";
pub const OAUTH_SERVING_CERT_CA_BUNDLE_KEY: &str = "ca-bundle.crt";

// ConfigMap data keys
pub const CONSOLE_CONFIG_YAML_FILE: &str = "console-config.yaml";
pub const CONSOLE_PUBLIC_URL_KEY: &str = "consoleURL";

// Annotations
pub const ANNOTATION_PLUGIN_I18N: &str = "console.openshift.io/use-i18n";
pub const ANNOTATION_TELEMETRY_PREFIX: &str = "telemetry.console.openshift.io/";

// Console config defaults
pub const DEFAULT_BRAND: &str = "okd";
pub const DEFAULT_DOC_URL: &str = "https://docs.okd.io/latest/";
pub const DEFAULT_LOGOUT_URL: &str = "";
pub const PLUGIN_PROXY_ENDPOINT: &str = "/api/proxy/plugin/";

// Console server
pub const CONSOLE_CONFIG_API_VERSION: &str = "console.openshift.io/v1";
pub const CONSOLE_CONFIG_KIND: &str = "ConsoleConfig";
pub const CONSOLE_BIND_ADDRESS: &str = "https://[::]:8443";
pub const CONSOLE_SERVING_CERT_FILE: &str = "/var/serving-cert/tls.crt";
pub const CONSOLE_SERVING_KEY_FILE: &str = "/var/serving-cert/tls.key";
pub const CONSOLE_REDIRECT_PORT: i32 = 8444;
pub const CONSOLE_OAUTH_CLIENT_ID: &str = "console";
pub const CONSOLE_OAUTH_CLIENT_SECRET_FILE: &str = "/var/oauth-config/clientSecret";
pub const OAUTH_SERVING_CERT_CA_FILE: &str = "/var/oauth-serving-cert/ca-bundle.crt";
pub const DEFAULT_SERVICE_ACCOUNT_CA_FILE: &str = "/var/run/secrets/kubernetes.io/serviceaccount/ca.crt";
pub const CUSTOM_LOGO_MOUNT_PATH: &str = "/var/logo/";
