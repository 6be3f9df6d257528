//! # Node Type Metadata
//!
//! Typed view of the grammar's `node-types.json`, the same metadata the Node
//! package attaches as `nodeTypeInfo` when the file ships alongside it.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Reference to a node kind from a field, child list or supertype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTypeRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub named: bool,
}

/// Which kinds may fill a field or the unnamed children slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildInfo {
    pub multiple: bool,
    pub required: bool,
    pub types: Vec<NodeTypeRef>,
}

/// One entry of `node-types.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTypeInfo {
    /// Node kind, e.g. `"if_statement"` or `"THEN"`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Named nodes come from rules; anonymous ones are literal tokens.
    pub named: bool,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, ChildInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<ChildInfo>,

    /// Present only on supertypes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtypes: Option<Vec<NodeTypeRef>>,
}

impl NodeTypeInfo {
    #[must_use]
    pub fn is_supertype(&self) -> bool {
        self.subtypes.is_some()
    }
}

/// All node kinds the grammar can produce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeTypes {
    types: Vec<NodeTypeInfo>,
}

impl NodeTypes {
    /// Parses the contents of `node-types.json`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BridgeError::NodeTypes`] on malformed JSON.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads `node-types.json` from disk.
    ///
    /// A missing file is not an error: the metadata is optional.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BridgeError::Io`] if the file exists but cannot be
    /// read, or [`crate::BridgeError::NodeTypes`] if it is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no node type metadata");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let types = Self::parse(&json)?;
        debug!(path = %path.display(), count = types.len(), "node type metadata loaded");
        Ok(Some(types))
    }

    /// Looks up a named kind, falling back to an anonymous one.
    #[must_use]
    pub fn get(&self, kind: &str) -> Option<&NodeTypeInfo> {
        self.types
            .iter()
            .filter(|t| t.kind == kind)
            .max_by_key(|t| t.named)
    }

    /// Kinds produced by grammar rules, in file order.
    pub fn named_kinds(&self) -> impl Iterator<Item = &str> {
        self.types.iter().filter(|t| t.named).map(|t| t.kind.as_str())
    }

    pub fn supertypes(&self) -> impl Iterator<Item = &NodeTypeInfo> {
        self.types.iter().filter(|t| t.is_supertype())
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeTypeInfo> {
        self.types.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;

    const SAMPLE: &str = r#"[
        {
            "type": "_statement",
            "named": true,
            "subtypes": [
                {"type": "if_statement", "named": true},
                {"type": "assign_statement", "named": true}
            ]
        },
        {
            "type": "if_statement",
            "named": true,
            "fields": {
                "condition": {
                    "multiple": false,
                    "required": true,
                    "types": [{"type": "_expression", "named": true}]
                }
            },
            "children": {
                "multiple": true,
                "required": false,
                "types": [{"type": "body", "named": true}]
            }
        },
        {"type": "assign_statement", "named": true, "fields": {}},
        {"type": "THEN", "named": false},
        {"type": "if_statement", "named": false}
    ]"#;

    #[test]
    fn parses_node_types() {
        let types = NodeTypes::parse(SAMPLE).unwrap();
        assert_eq!(types.len(), 5);
        assert!(!types.is_empty());

        let kinds: Vec<_> = types.named_kinds().collect();
        assert_eq!(kinds, ["_statement", "if_statement", "assign_statement"]);
    }

    #[test]
    fn get_prefers_named_kind() {
        let types = NodeTypes::parse(SAMPLE).unwrap();

        let info = types.get("if_statement").unwrap();
        assert!(info.named);
        let condition = &info.fields["condition"];
        assert!(condition.required);
        assert_eq!(condition.types[0].kind, "_expression");
        assert!(info.children.as_ref().unwrap().multiple);

        assert!(!types.get("THEN").unwrap().named);
        assert!(types.get("ELSE").is_none());
    }

    #[test]
    fn supertypes_are_listed() {
        let types = NodeTypes::parse(SAMPLE).unwrap();
        let supertypes: Vec<_> = types.supertypes().map(|t| t.kind.as_str()).collect();
        assert_eq!(supertypes, ["_statement"]);
        assert_eq!(types.get("_statement").unwrap().subtypes.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = NodeTypes::parse(r#"[{"named": true}]"#).unwrap_err();
        assert!(matches!(err, BridgeError::NodeTypes(_)));
    }

    #[test]
    fn load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = NodeTypes::load(dir.path().join("node-types.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node-types.json");
        fs::write(&path, SAMPLE).unwrap();

        let loaded = NodeTypes::load(&path).unwrap().unwrap();
        assert_eq!(loaded, NodeTypes::parse(SAMPLE).unwrap());
    }

    #[test]
    fn load_unreadable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node-types.json");
        fs::create_dir(&path).unwrap();

        assert!(matches!(NodeTypes::load(&path).unwrap_err(), BridgeError::Io(_)));
    }

    #[test]
    fn load_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node-types.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            NodeTypes::load(&path).unwrap_err(),
            BridgeError::NodeTypes(_)
        ));
    }
}
