//! Schema definition types.
//!
//! A schema is an ordered mapping from entry name to a node or relationship
//! type. Labels share one namespace across the whole schema; the authoring
//! check rejects duplicates before any query is validated.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::model::{Direction, Value, ValueKind};
use crate::{Error, Result};

/// A recursive tree of property rules. Keys are single path segments;
/// nested groups (e.g. `address`) hold their own subtree.
pub type RuleTree = IndexMap<String, RuleNode>;

/// Either a leaf rule or a nested group of rules.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RuleNode {
    Rule(PropertyRule),
    Group(RuleTree),
}

/// Allowed-value constraint on one property.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Constraint {
    #[default]
    None,
    /// The scalar value must equal one member of the set.
    OneOf(Vec<Value>),
    /// The array value must contain every member of the set.
    ///
    /// Note the direction: the schema's set must be a subset of the query's
    /// array, not the other way around. This mirrors the observed behavior
    /// of the `atLeastOneValue` rule and is pending product clarification.
    ContainsAll(Vec<Value>),
    /// The array value must equal the set exactly, compared as an
    /// unordered multiset.
    ExactSet(Vec<Value>),
}

/// A leaf rule: the expected value tag plus an optional constraint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RuleRepr")]
pub struct PropertyRule {
    pub kind: ValueKind,
    pub constraint: Constraint,
}

impl PropertyRule {
    pub fn new(kind: ValueKind) -> Self {
        Self { kind, constraint: Constraint::None }
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = constraint;
        self
    }
}

/// JSON surface for a leaf rule: `{"kind": ..., "oneOf": [...]}` etc.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuleRepr {
    kind: ValueKind,
    #[serde(default)]
    one_of: Option<Vec<Value>>,
    #[serde(default)]
    contains_all: Option<Vec<Value>>,
    #[serde(default)]
    exact_set: Option<Vec<Value>>,
}

impl From<RuleRepr> for PropertyRule {
    fn from(repr: RuleRepr) -> Self {
        let constraint = if let Some(set) = repr.one_of {
            Constraint::OneOf(set)
        } else if let Some(set) = repr.contains_all {
            Constraint::ContainsAll(set)
        } else if let Some(set) = repr.exact_set {
            Constraint::ExactSet(set)
        } else {
            Constraint::None
        };
        Self { kind: repr.kind, constraint }
    }
}

/// A declared node type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeType {
    pub label: String,
    #[serde(default)]
    pub properties: RuleTree,
}

impl NodeType {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), properties: RuleTree::new() }
    }

    pub fn with_rule(mut self, key: impl Into<String>, rule: PropertyRule) -> Self {
        self.properties.insert(key.into(), RuleNode::Rule(rule));
        self
    }

    pub fn with_group(mut self, key: impl Into<String>, group: RuleTree) -> Self {
        self.properties.insert(key.into(), RuleNode::Group(group));
        self
    }
}

/// A declared relationship type. Endpoints are referenced by node label;
/// the validator only needs labels, never the resolved node types.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelationshipType {
    pub label: String,
    pub from: String,
    pub to: String,
    pub direction: Direction,
    #[serde(default)]
    pub properties: RuleTree,
}

impl RelationshipType {
    pub fn new(
        label: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        direction: Direction,
    ) -> Self {
        Self {
            label: label.into(),
            from: from.into(),
            to: to.into(),
            direction,
            properties: RuleTree::new(),
        }
    }

    pub fn with_rule(mut self, key: impl Into<String>, rule: PropertyRule) -> Self {
        self.properties.insert(key.into(), RuleNode::Rule(rule));
        self
    }
}

/// One schema entry, tagged `"type": "node" | "relationship"` in JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SchemaEntry {
    Node(NodeType),
    Relationship(RelationshipType),
}

impl SchemaEntry {
    pub fn label(&self) -> &str {
        match self {
            SchemaEntry::Node(n) => &n.label,
            SchemaEntry::Relationship(r) => &r.label,
        }
    }

    /// Human-readable tag, matched against [`Entity::kind_name`].
    ///
    /// [`Entity::kind_name`]: crate::model::Entity::kind_name
    pub fn kind_name(&self) -> &'static str {
        match self {
            SchemaEntry::Node(_) => "node",
            SchemaEntry::Relationship(_) => "relationship",
        }
    }

    pub fn rules(&self) -> &RuleTree {
        match self {
            SchemaEntry::Node(n) => &n.properties,
            SchemaEntry::Relationship(r) => &r.properties,
        }
    }
}

/// The full schema: ordered entry-name → type mapping.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SchemaDefinition(pub IndexMap<String, SchemaEntry>);

impl SchemaDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: SchemaEntry) {
        self.0.insert(name.into(), entry);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &SchemaEntry)> {
        self.0.iter()
    }

    /// Find the first entry declaring the given label, in schema order.
    pub fn find(&self, label: &str) -> Option<&SchemaEntry> {
        self.0.values().find(|entry| entry.label() == label)
    }

    /// Schema-authoring check: labels must be unique across the whole
    /// schema, nodes and relationships sharing one namespace. Independent
    /// of any query.
    pub fn check(&self) -> Result<()> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.0.len());
        for entry in self.0.values() {
            let label = entry.label();
            if seen.contains(&label) {
                return Err(Error::DuplicateLabel(label.to_string()));
            }
            seen.push(label);
        }
        Ok(())
    }
}
