//! # Schema Definitions
//!
//! The declarative node/relationship schema the validator consumes, plus the
//! JSON loader and the schema-authoring check. The definition is owned by
//! the caller and only ever borrowed by parsing/validation.

pub mod def;
pub mod loader;

pub use def::{
    Constraint, NodeType, PropertyRule, RelationshipType, RuleNode, RuleTree, SchemaDefinition,
    SchemaEntry,
};
pub use loader::{from_json, load};
