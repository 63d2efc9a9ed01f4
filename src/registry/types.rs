/// Core registry record definitions
///
/// Components and workflows are free-form JSON records. Beyond shape checking at
/// the HTTP boundary nothing about them is validated: component types are not
/// restricted to a fixed set and workflows may reference components that no
/// longer exist.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A configurable unit registered in the system (an LLM, an agent or a tool)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Role tag, e.g. "LLM", "Agent", "Tool"
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-form settings for this component
    pub configuration: Map<String, Value>,
}

impl Component {
    pub fn new(kind: impl Into<String>, configuration: Map<String, Value>) -> Self {
        Self {
            kind: kind.into(),
            configuration,
        }
    }

    /// Shallow merge of a patch into this component's configuration
    ///
    /// Keys present in the patch overwrite existing keys, keys absent from the
    /// patch are kept. The component type is never touched.
    pub fn apply_patch(&mut self, patch: ComponentPatch) {
        for (key, value) in patch.configuration {
            self.configuration.insert(key, value);
        }
    }
}

/// Body of a component update
///
/// `type` is accepted so a full component can be sent back, but it is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentPatch {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub configuration: Map<String, Value>,
}

/// An ordered reference list over components plus an advisory execution order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    /// Component positions at the time the workflow was authored
    pub component_ids: Vec<i64>,
    /// Indexes into `component_ids`
    pub execution_order: Vec<i64>,
}

/// A record together with the stable id it was assigned at creation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stored<T> {
    pub id: u64,
    #[serde(flatten)]
    pub record: T,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn patch_overwrites_and_adds_keys_but_keeps_type() {
        let mut component = Component::new("LLM", object(json!({ "model": "gpt-4", "temperature": 0.2 })));
        let patch: ComponentPatch = serde_json::from_value(json!({
            "type": "Tool",
            "configuration": { "temperature": 0.9, "max_tokens": 512 }
        }))
        .unwrap();

        component.apply_patch(patch);

        assert_eq!(component.kind, "LLM");
        assert_eq!(
            Value::Object(component.configuration),
            json!({ "model": "gpt-4", "temperature": 0.9, "max_tokens": 512 })
        );
    }

    #[test]
    fn patch_does_not_require_type() {
        let patch: ComponentPatch = serde_json::from_value(json!({ "configuration": { "x": 1 } })).unwrap();
        assert!(patch.kind.is_none());
    }

    #[test]
    fn component_rejects_non_object_configuration() {
        let parsed = serde_json::from_value::<Component>(json!({ "type": "Tool", "configuration": [1, 2] }));
        assert!(parsed.is_err());
    }

    #[test]
    fn stored_record_flattens_into_one_object() {
        let stored = Stored {
            id: 7,
            record: Workflow { component_ids: vec![0, 3], execution_order: vec![1, 0] },
        };
        assert_eq!(
            serde_json::to_value(&stored).unwrap(),
            json!({ "id": 7, "component_ids": [0, 3], "execution_order": [1, 0] })
        );
    }
}
