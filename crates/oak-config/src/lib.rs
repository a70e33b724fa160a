//! Store configuration: layered YAML, later layers override earlier ones.
//!
//! A config file is optional — with no layers every field falls back to its
//! default.  Layers are deep-merged in order (earlier files are base, later
//! files override), then deserialized strictly: unknown keys are an error,
//! so a typo'd key fails loudly instead of being silently ignored.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;

/// Everything the terminal needs to know about the store it runs in.
///
/// The sales tax rate is intentionally NOT here: it is a fixed constant of
/// the checkout workflow, not an operator knob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Printed as the receipt header.
    pub store_name: String,
    /// Overrides OAK_DATABASE_URL when set.
    pub database_url: Option<String>,
    /// Optional closing line on printed receipts.
    pub receipt_footer: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_name: "Oak Donuts".to_string(),
            database_url: None,
            receipt_footer: None,
        }
    }
}

/// Load and merge YAML files in order. No paths means defaults.
pub fn load_layered_yaml(paths: &[&str]) -> Result<StoreConfig> {
    let mut docs: Vec<String> = Vec::new();
    for p in paths {
        let raw =
            fs::read_to_string(p).with_context(|| format!("failed to read config: {p}"))?;
        docs.push(raw);
    }

    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<StoreConfig> {
    // Merge YAML docs in order: earlier docs are base, later docs override.
    let mut merged = serde_json::json!({});
    for raw in yaml_docs {
        let v_yaml: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid yaml")?;
        let v_json = serde_json::to_value(v_yaml).context("yaml->json conversion failed")?;
        merged = deep_merge(merged, v_json);
    }

    serde_json::from_value(merged).context("config did not match the expected shape")
}

fn deep_merge(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Object(mut a_map), Value::Object(b_map)) => {
            for (k, b_val) in b_map {
                let a_val = a_map.remove(&k).unwrap_or(Value::Null);
                a_map.insert(k, deep_merge(a_val, b_val));
            }
            Value::Object(a_map)
        }
        // Null never overrides: an empty YAML layer keeps the base intact.
        (a, Value::Null) => a,
        (_, b) => b,
    }
}
