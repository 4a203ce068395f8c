use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Hash)]
pub struct OperatorConfig {
    pub instance: OperatorInstance,
    /// Session inactivity timeout handed to the console server; 0 disables it
    #[serde(default)]
    pub inactivity_timeout_seconds: i32,
    pub managed_cluster_config_file: Option<String>,
    pub release_version: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Hash)]
pub struct OperatorInstance {
    pub name: String,
    pub namespace: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_operator_config() {
        let config: OperatorConfig = serde_yaml::from_str(
            r#"
instance:
  name: console-operator
  namespace: openshift-console-operator
inactivity_timeout_seconds: 600
release_version: 4.14.0
"#,
        )
        .unwrap();
        assert_eq!(config.instance.namespace, "openshift-console-operator");
        assert_eq!(config.inactivity_timeout_seconds, 600);
        assert_eq!(config.managed_cluster_config_file, None);
        assert_eq!(config.release_version.as_deref(), Some("4.14.0"));
    }
}
