//! Parsed node and relationship descriptors.

use serde::{Deserialize, Serialize};

use super::PropertyMap;

/// Direction of a relationship pattern.
///
/// `Directed` when the text carries an arrow glyph (`<` or `>`),
/// `Bidirectional` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Directed,
    Bidirectional,
}

/// A node occurrence inside a clause: `(alias:Label {props})`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodePattern {
    pub label: String,
    pub alias: Option<String>,
    pub properties: PropertyMap,
}

/// A relationship occurrence inside a clause: `-[alias:LABEL {props}]->`.
///
/// `from` and `to` are indices into the owning clause's entity sequence.
/// `from` points at the nearest preceding node in scan order; `to` is filled
/// in when the following node is parsed. Either stays `None` when the
/// relationship appears without an adjacent node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelPattern {
    pub label: String,
    pub alias: Option<String>,
    pub direction: Direction,
    pub from: Option<usize>,
    pub to: Option<usize>,
    pub properties: PropertyMap,
}

/// Either kind of parsed entity, in clause scan order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Node(NodePattern),
    Relationship(RelPattern),
}

impl Entity {
    pub fn label(&self) -> &str {
        match self {
            Entity::Node(n) => &n.label,
            Entity::Relationship(r) => &r.label,
        }
    }

    pub fn alias(&self) -> Option<&str> {
        match self {
            Entity::Node(n) => n.alias.as_deref(),
            Entity::Relationship(r) => r.alias.as_deref(),
        }
    }

    pub fn properties(&self) -> &PropertyMap {
        match self {
            Entity::Node(n) => &n.properties,
            Entity::Relationship(r) => &r.properties,
        }
    }

    /// Human-readable tag, used in lookup errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Entity::Node(_) => "node",
            Entity::Relationship(_) => "relationship",
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Entity::Node(_))
    }

    pub fn as_node(&self) -> Option<&NodePattern> {
        match self {
            Entity::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_relationship(&self) -> Option<&RelPattern> {
        match self {
            Entity::Relationship(r) => Some(r),
            _ => None,
        }
    }
}
