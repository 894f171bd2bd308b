use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::Result;

/// Model category with an escape hatch for unrecognized values.
///
/// `Unknown` is the explicit category for catalog entries whose wire record
/// carries no `api_model_type` field at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModelType {
    Llm,
    Embedding,
    Unknown,
    Other(String),
}

impl ModelType {
    pub fn as_str(&self) -> &str {
        match self {
            ModelType::Llm => "llm",
            ModelType::Embedding => "embedding",
            ModelType::Unknown => "unknown",
            ModelType::Other(other) => other.as_str(),
        }
    }
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::Unknown
    }
}

impl From<&str> for ModelType {
    fn from(value: &str) -> Self {
        ModelType::from(value.to_string())
    }
}

impl From<String> for ModelType {
    fn from(value: String) -> Self {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "llm" => ModelType::Llm,
            "embedding" => ModelType::Embedding,
            "" | "unknown" => ModelType::Unknown,
            other => ModelType::Other(other.to_string()),
        }
    }
}

impl From<ModelType> for String {
    fn from(value: ModelType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of an endpoint's model catalog.
///
/// Fields beyond the identifier and category are kept verbatim in `extra`
/// so the full JSON description survives for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub identifier: String,
    #[serde(default)]
    pub api_model_type: ModelType,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelDescriptor {
    pub fn new(identifier: impl Into<String>, api_model_type: ModelType) -> Self {
        Self {
            identifier: identifier.into(),
            api_model_type,
            extra: Map::new(),
        }
    }

    pub fn is_llm(&self) -> bool {
        self.api_model_type == ModelType::Llm
    }

    /// Full JSON description of this descriptor, for rendering.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn model_type_roundtrips_known_and_custom_values() {
        assert_eq!(ModelType::from("llm"), ModelType::Llm);
        assert_eq!(ModelType::from("Embedding"), ModelType::Embedding);
        assert_eq!(ModelType::from(""), ModelType::Unknown);
        assert_eq!(ModelType::from("rerank"), ModelType::Other("rerank".into()));
        assert_eq!(String::from(ModelType::Llm), "llm");
    }

    #[test]
    fn descriptor_defaults_missing_category_to_unknown() {
        let m: ModelDescriptor = serde_json::from_value(json!({
            "identifier": "acme/legacy-model",
            "provider_id": "acme"
        }))
        .unwrap();
        assert_eq!(m.api_model_type, ModelType::Unknown);
        assert_eq!(m.extra.get("provider_id"), Some(&json!("acme")));
    }

    #[test]
    fn descriptor_json_description_keeps_extra_fields() {
        let m: ModelDescriptor = serde_json::from_value(json!({
            "identifier": "acme/chat-1",
            "api_model_type": "llm",
            "metadata": { "context_length": 8192 }
        }))
        .unwrap();
        let value = m.to_json().unwrap();
        assert_eq!(value["identifier"], "acme/chat-1");
        assert_eq!(value["api_model_type"], "llm");
        assert_eq!(value["metadata"]["context_length"], 8192);
    }
}
