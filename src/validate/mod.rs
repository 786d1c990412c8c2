//! # Schema Validator
//!
//! Checks parsed entities against a [`SchemaDefinition`]: structural
//! label/tag lookup first, then a recursive walk of the property rule tree.
//! Validation is fail-fast — the first violation aborts the whole run.
//!
//! The schema is only ever borrowed and never mutated, so one definition can
//! back any number of concurrent validations.

use tracing::debug;

use crate::model::{Entity, PropertyMap, PropertyPath, Value};
use crate::query::{Clause, ClauseKind};
use crate::schema::{Constraint, PropertyRule, RuleNode, RuleTree, SchemaDefinition, SchemaEntry};
use crate::{Error, Result};

/// Validate every entity of every clause against the schema.
pub fn validate(clauses: &[Clause], schema: &SchemaDefinition) -> Result<()> {
    for clause in clauses {
        for entity in &clause.entities {
            // Anonymous patterns like `()` declare no label and carry
            // nothing the schema could say anything about.
            if entity.label().is_empty() {
                continue;
            }
            let entry = lookup(schema, entity)?;
            validate_entity(clause.kind, entry, entity)?;
        }
        debug!(kind = %clause.kind, entities = clause.entities.len(), "validated clause");
    }
    Ok(())
}

/// Find the schema entry for an entity's label, checking the tag agrees.
pub fn lookup<'s>(schema: &'s SchemaDefinition, entity: &Entity) -> Result<&'s SchemaEntry> {
    match schema.find(entity.label()) {
        Some(entry) if entry.kind_name() == entity.kind_name() => Ok(entry),
        _ => Err(Error::SchemaLookup {
            kind: entity.kind_name().to_string(),
            label: entity.label().to_string(),
        }),
    }
}

/// Validate one entity against its schema entry.
///
/// Property validation only runs when the entity carries a non-empty
/// property map; a bare `(s:Student)` pattern has nothing to check.
pub fn validate_entity(kind: ClauseKind, entry: &SchemaEntry, entity: &Entity) -> Result<()> {
    let props = entity.properties();
    if props.is_empty() {
        return Ok(());
    }
    let mut path = PropertyPath::new();
    check_rules(kind, entry.rules(), props, &mut path)
}

/// Walk the rule tree in parallel with the dot-qualified property keys.
fn check_rules(
    kind: ClauseKind,
    tree: &RuleTree,
    props: &PropertyMap,
    path: &mut PropertyPath,
) -> Result<()> {
    for (key, node) in tree {
        path.push(key.as_str());
        let checked = match node {
            RuleNode::Group(subtree) => check_rules(kind, subtree, props, path),
            RuleNode::Rule(rule) => check_leaf(kind, rule, props, path),
        };
        path.pop();
        checked?;
    }
    Ok(())
}

fn check_leaf(
    kind: ClauseKind,
    rule: &PropertyRule,
    props: &PropertyMap,
    path: &PropertyPath,
) -> Result<()> {
    let dotted = path.dotted();
    let Some(value) = props.get(&dotted) else {
        // Every schema-declared property is required when writing.
        if matches!(kind, ClauseKind::Create | ClauseKind::Merge) {
            return Err(Error::RequiredProperty(dotted));
        }
        return Ok(());
    };

    if !rule.kind.matches(value) {
        return Err(Error::TypeMismatch {
            property: dotted,
            expected: rule.kind.name(),
            got: value.type_name().to_string(),
        });
    }

    check_constraint(&rule.constraint, value, &dotted)
}

fn check_constraint(constraint: &Constraint, value: &Value, property: &str) -> Result<()> {
    match constraint {
        Constraint::None => Ok(()),

        Constraint::OneOf(allowed) => {
            if allowed.contains(value) {
                Ok(())
            } else {
                Err(Error::Constraint {
                    property: property.to_string(),
                    message: format!("{value} is not one of the allowed values"),
                })
            }
        }

        Constraint::ContainsAll(required) => {
            let Some(items) = value.as_list() else {
                return Err(Error::Constraint {
                    property: property.to_string(),
                    message: "value must be an array".to_string(),
                });
            };
            if required.iter().all(|v| items.contains(v)) {
                Ok(())
            } else {
                Err(Error::Constraint {
                    property: property.to_string(),
                    message: "array does not contain every required value".to_string(),
                })
            }
        }

        Constraint::ExactSet(exact) => {
            let Some(items) = value.as_list() else {
                return Err(Error::Constraint {
                    property: property.to_string(),
                    message: "value must be an array".to_string(),
                });
            };
            if multiset_eq(items, exact) {
                Ok(())
            } else {
                Err(Error::Constraint {
                    property: property.to_string(),
                    message: "array does not match the declared value set exactly".to_string(),
                })
            }
        }
    }
}

/// Unordered multiset equality. The sets involved are small, so counting
/// by linear scan is fine.
fn multiset_eq(a: &[Value], b: &[Value]) -> bool {
    let count = |xs: &[Value], x: &Value| xs.iter().filter(|y| *y == x).count();
    a.len() == b.len() && a.iter().all(|x| count(a, x) == count(b, x))
}
