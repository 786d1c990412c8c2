//! Schema file loader.
//!
//! Reads a JSON schema definition from disk, deserializes it, and runs the
//! authoring check before handing it to the caller.

use std::path::Path;

use tracing::debug;

use super::SchemaDefinition;
use crate::Result;

/// Load and check a schema definition from a JSON file.
pub fn load(path: impl AsRef<Path>) -> Result<SchemaDefinition> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let schema = from_json(&text)?;
    debug!(entries = schema.len(), path = %path.display(), "loaded schema definition");
    Ok(schema)
}

/// Deserialize and check a schema definition from JSON text.
pub fn from_json(text: &str) -> Result<SchemaDefinition> {
    let schema: SchemaDefinition = serde_json::from_str(text)?;
    schema.check()?;
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::schema::{RuleNode, SchemaEntry};

    const SCHEMA: &str = r#"{
        "Student": {
            "type": "node",
            "label": "Student",
            "properties": {
                "email": {"kind": "string"},
                "address": {
                    "street": {"kind": "string"},
                    "city": {"kind": "string"}
                }
            }
        },
        "ENROLLED_IN": {
            "type": "relationship",
            "label": "ENROLLED_IN",
            "from": "Student",
            "to": "Course",
            "direction": "directed",
            "properties": {
                "semester": {"kind": "string"}
            }
        }
    }"#;

    #[test]
    fn test_from_json() {
        let schema = from_json(SCHEMA).unwrap();
        assert_eq!(schema.len(), 2);

        let student = schema.find("Student").unwrap();
        assert!(matches!(student, SchemaEntry::Node(_)));
        assert!(matches!(student.rules().get("address"), Some(RuleNode::Group(_))));

        let enrolled = schema.find("ENROLLED_IN").unwrap();
        assert!(matches!(enrolled, SchemaEntry::Relationship(_)));
    }

    #[test]
    fn test_from_json_rejects_duplicate_labels() {
        let text = r#"{
            "A": {"type": "node", "label": "Student"},
            "B": {"type": "node", "label": "Student"}
        }"#;
        match from_json(text) {
            Err(Error::DuplicateLabel(label)) => assert_eq!(label, "Student"),
            other => panic!("expected DuplicateLabel, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json_rejects_malformed_text() {
        assert!(matches!(from_json("not json"), Err(Error::SchemaFormat(_))));
    }
}
