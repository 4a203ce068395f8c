use serde::Deserialize;
use serde_yaml::{Deserializer, Mapping, Value};

use crate::model::{MergeError, ParseError};

/// Deep merges YAML (or JSON) documents. Later documents win: mappings are merged key by key,
/// every other value, sequences included, replaces what was there before. Keys of the result
/// are sorted so identical inputs always produce identical text.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleYamlMerger;

impl ConsoleYamlMerger {
    /// Merges `layers` in order, then `override_raw` on top of them. The override is reported as
    /// layer `layers.len()` when it fails to parse.
    pub fn merge(&self, layers: &[&[u8]], override_raw: &[u8]) -> Result<String, MergeError> {
        let mut merged = Mapping::new();
        for (layer, document) in layers.iter().chain(std::iter::once(&override_raw)).enumerate() {
            let parsed = parse_layer(document).map_err(|source| MergeError::Layer { layer, source })?;
            merge_mapping(&mut merged, parsed);
        }
        serde_yaml::to_string(&sorted(Value::Mapping(merged))).map_err(MergeError::Emit)
    }
}

/// An empty or `null` document is an empty mapping. Only the first document of a stream is
/// read, and `<<` merge keys are resolved before the layer is merged.
fn parse_layer(document: &[u8]) -> Result<Mapping, ParseError> {
    if document.iter().all(|byte| byte.is_ascii_whitespace()) {
        return Ok(Mapping::new());
    }
    let Some(first) = Deserializer::from_slice(document).next() else {
        return Ok(Mapping::new());
    };
    let mut value = Value::deserialize(first)?;
    value.apply_merge()?;
    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        other => Err(ParseError::NotAMapping(kind_of(&other).to_owned())),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn merge_mapping(current: &mut Mapping, incoming: Mapping) {
    for (key, incoming_value) in incoming {
        if let Value::Mapping(incoming_child) = incoming_value {
            if let Some(Value::Mapping(current_child)) = current.get_mut(&key) {
                merge_mapping(current_child, incoming_child);
                continue;
            }
            current.insert(key, Value::Mapping(incoming_child));
        } else {
            current.insert(key, incoming_value);
        }
    }
}

fn sort_key(key: &Value) -> String {
    match key {
        Value::String(key) => key.to_owned(),
        other => serde_yaml::to_string(other).unwrap_or_default(),
    }
}

fn sorted(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => {
            let mut entries: Vec<(Value, Value)> = mapping.into_iter().collect();
            entries.sort_by_key(|(key, _)| sort_key(key));
            Value::Mapping(entries.into_iter().map(|(key, value)| (key, sorted(value))).collect())
        }
        Value::Sequence(sequence) => Value::Sequence(sequence.into_iter().map(sorted).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merge(layers: &[&str], override_raw: &str) -> Value {
        let layers: Vec<&[u8]> = layers.iter().map(|layer| layer.as_bytes()).collect();
        let merged = ConsoleYamlMerger.merge(&layers, override_raw.as_bytes()).unwrap();
        serde_yaml::from_str(&merged).unwrap()
    }

    fn merge_text(layers: &[&str], override_raw: &str) -> String {
        let layers: Vec<&[u8]> = layers.iter().map(|layer| layer.as_bytes()).collect();
        ConsoleYamlMerger.merge(&layers, override_raw.as_bytes()).unwrap()
    }

    #[test]
    fn test_later_scalar_wins() {
        let merged = merge(&["brand: okd\nkeep: 1\n", "brand: ocp\n"], "");
        assert_eq!(merged["brand"], Value::from("ocp"));
        assert_eq!(merged["keep"], Value::from(1));
    }

    #[test]
    fn test_nested_mappings_merge_recursively() {
        let merged = merge(
            &[
                "customization:\n  branding: okd\n  documentationBaseURL: https://docs.okd.io/latest/\n",
                "customization:\n  branding: ocp\n",
            ],
            "",
        );
        assert_eq!(merged["customization"]["branding"], Value::from("ocp"));
        assert_eq!(merged["customization"]["documentationBaseURL"], Value::from("https://docs.okd.io/latest/"));
    }

    #[test]
    fn test_sequences_are_replaced() {
        let merged = merge(&["i18nNamespaces: [a, b]\n", "i18nNamespaces: [c]\n"], "");
        assert_eq!(merged["i18nNamespaces"], serde_yaml::from_str::<Value>("[c]").unwrap());
    }

    #[test]
    fn test_mapping_replaced_by_scalar() {
        let merged = merge(&["auth:\n  clientID: console\n", "auth: disabled\n"], "");
        assert_eq!(merged["auth"], Value::from("disabled"));
    }

    #[test]
    fn test_empty_layer_is_identity() {
        let base = "clusterInfo:\n  consoleBaseAddress: https://console\nkind: ConsoleConfig\n";
        assert_eq!(merge_text(&[base, ""], ""), merge_text(&[base], ""));
        assert_eq!(merge_text(&[base, "{}"], ""), merge_text(&[base], ""));
        assert_eq!(merge_text(&[base, "null\n"], "  \n"), merge_text(&[base], ""));
    }

    #[test]
    fn test_override_applied_last() {
        let default = "customization:\n  branding: okd\n";
        let managed = "customization:\n  branding: managed\n";
        let user = "customization:\n  branding: ocp\n  customProductName: Console\n";
        let override_raw = r#"{"customization":{"branding":"dedicated"}}"#;
        let merged = merge(&[default, managed, user], override_raw);
        assert_eq!(merged["customization"]["branding"], Value::from("dedicated"));
        assert_eq!(merged["customization"]["customProductName"], Value::from("Console"));

        let grouped = merge_text(&[default, managed, user], "");
        assert_eq!(merge_text(&[&grouped], override_raw), merge_text(&[default, managed, user], override_raw));
    }

    #[test]
    fn test_output_is_sorted_and_deterministic() {
        let layers = ["zeta: 1\nalpha:\n  y: 2\n  b: 3\n", "mid: true\n"];
        let first = merge_text(&layers, "");
        assert_eq!(first, merge_text(&layers, ""));
        assert_eq!(first, "alpha:\n  b: 3\n  y: 2\nmid: true\nzeta: 1\n");
    }

    #[test]
    fn test_merge_keys_are_resolved() {
        let merged = merge(&["defaults: &defaults\n  x: 1\nchild:\n  <<: *defaults\n  y: 2\n"], "");
        assert_eq!(merged["child"]["x"], Value::from(1));
        assert_eq!(merged["child"]["y"], Value::from(2));
        assert!(merged["child"].get("<<").is_none());
    }

    #[test]
    fn test_only_first_document_of_a_layer_is_used() {
        let merged = merge(&["brand: okd\n---\nbrand: ocp\nextra: true\n"], "");
        assert_eq!(merged["brand"], Value::from("okd"));
        assert!(merged.get("extra").is_none());
    }

    #[test]
    fn test_parse_error_reports_layer() {
        let layers: Vec<&[u8]> = vec!["kind: ConsoleConfig\n".as_bytes(), "auth: [unclosed\n".as_bytes()];
        match ConsoleYamlMerger.merge(&layers, &[]) {
            Err(MergeError::Layer { layer, source: ParseError::Yaml(_) }) => assert_eq!(layer, 1),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_override_must_be_a_mapping() {
        let layers: Vec<&[u8]> = vec!["kind: ConsoleConfig\n".as_bytes()];
        match ConsoleYamlMerger.merge(&layers, "test".as_bytes()) {
            Err(MergeError::Layer { layer, source: ParseError::NotAMapping(kind) }) => {
                assert_eq!(layer, 1);
                assert_eq!(kind, "string");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
