//! # Hierarchical Result Shaping
//!
//! Re-shapes a parsed clause sequence into a nested, GraphQL-like map:
//! top-level nodes keyed by alias, relationships nested under their `from`
//! node by relationship label, each carrying its own properties plus the
//! `to` node as a nested object. A flat view keeps every entity at the top
//! level instead. Pure data shaping — no database round trip.

use crate::model::{Entity, PropertyMap, Value};
use crate::query::Clause;

/// Build the hierarchical view of every entity-bearing clause.
///
/// Entry nodes are those that no relationship points `to`; within one
/// clause each relationship hangs off its `from` node as an array entry
/// under the relationship label.
pub fn hierarchy(clauses: &[Clause]) -> Value {
    let mut root = PropertyMap::new();
    for clause in clauses {
        let entities = &clause.entities;
        let mut is_target = vec![false; entities.len()];
        for entity in entities {
            if let Entity::Relationship(rel) = entity {
                if let Some(to) = rel.to {
                    is_target[to] = true;
                }
            }
        }
        for (idx, entity) in entities.iter().enumerate() {
            if let Entity::Node(node) = entity {
                if !is_target[idx] {
                    root.insert(entry_key(node.alias.as_deref(), &node.label), node_value(idx, entities));
                }
            }
        }
    }
    Value::Map(root)
}

/// Flat view: every entity keyed by alias (label fallback) at the top
/// level, carrying only its own properties — no nesting.
pub fn flat(clauses: &[Clause]) -> Value {
    let mut root = PropertyMap::new();
    for clause in clauses {
        for entity in &clause.entities {
            let key = entry_key(entity.alias(), entity.label());
            if key.is_empty() {
                continue;
            }
            root.insert(key, Value::Map(entity.properties().clone()));
        }
    }
    Value::Map(root)
}

fn entry_key(alias: Option<&str>, label: &str) -> String {
    alias.unwrap_or(label).to_string()
}

/// Node object: its properties plus one array per outgoing relationship
/// label. Relationships always follow the scan order, so `to` indices grow
/// strictly and the recursion terminates.
fn node_value(idx: usize, entities: &[Entity]) -> Value {
    let Entity::Node(node) = &entities[idx] else {
        return Value::Null;
    };
    let mut map = node.properties.clone();

    for entity in entities {
        let Entity::Relationship(rel) = entity else {
            continue;
        };
        if rel.from != Some(idx) {
            continue;
        }
        let mut rel_map = rel.properties.clone();
        if let Some(to) = rel.to {
            if let Entity::Node(to_node) = &entities[to] {
                rel_map.insert(
                    entry_key(to_node.alias.as_deref(), &to_node.label),
                    node_value(to, entities),
                );
            }
        }
        match map.get_mut(&rel.label) {
            Some(Value::List(list)) => list.push(Value::Map(rel_map)),
            _ => {
                map.insert(rel.label.clone(), Value::List(vec![Value::Map(rel_map)]));
            }
        }
    }

    Value::Map(map)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::PropertyMap;
    use crate::query;

    #[test]
    fn test_relationship_nests_under_from_node() {
        let mut params = PropertyMap::new();
        params.insert("title".into(), Value::from("Pirates of the Caribbean"));
        params.insert("role".into(), Value::from("Jack Sparrow"));
        params.insert("firstName".into(), Value::from("Johnny"));

        let clauses = query::parse(
            "MATCH (m:Movie { title: $title })<-[:ACTED_IN { role: $role }]-(a:Actor { firstName: $firstName })",
            Some(&params),
        )
        .unwrap();

        let Value::Map(root) = hierarchy(&clauses) else {
            panic!("expected map root");
        };
        let Some(Value::Map(movie)) = root.get("m") else {
            panic!("expected movie entry, got {root:?}");
        };
        assert_eq!(movie.get("title"), Some(&Value::from("Pirates of the Caribbean")));

        let Some(Value::List(acted_in)) = movie.get("ACTED_IN") else {
            panic!("expected ACTED_IN array, got {movie:?}");
        };
        let Value::Map(edge) = &acted_in[0] else {
            panic!("expected edge map");
        };
        assert_eq!(edge.get("role"), Some(&Value::from("Jack Sparrow")));
        let Some(Value::Map(actor)) = edge.get("a") else {
            panic!("expected nested actor, got {edge:?}");
        };
        assert_eq!(actor.get("firstName"), Some(&Value::from("Johnny")));
    }

    #[test]
    fn test_plain_nodes_keyed_by_alias() {
        let clauses = query::parse("CREATE (a:Actor) CREATE (d:Director)", None).unwrap();
        let Value::Map(root) = hierarchy(&clauses) else {
            panic!("expected map root");
        };
        assert!(root.contains_key("a"));
        assert!(root.contains_key("d"));
    }

    #[test]
    fn test_flat_keeps_entities_at_top_level() {
        let mut params = PropertyMap::new();
        params.insert("semester".into(), Value::from("fall 2026"));

        let clauses = query::parse(
            "MATCH (s:Student)-[:ENROLLED_IN { semester: $semester }]->(c:Course)",
            Some(&params),
        )
        .unwrap();

        let Value::Map(root) = flat(&clauses) else {
            panic!("expected map root");
        };
        assert!(root.contains_key("s"));
        assert!(root.contains_key("c"));
        let Some(Value::Map(edge)) = root.get("ENROLLED_IN") else {
            panic!("expected top-level edge entry, got {root:?}");
        };
        assert_eq!(edge.get("semester"), Some(&Value::from("fall 2026")));

        // No nesting in the flat view.
        let Some(Value::Map(student)) = root.get("s") else {
            panic!("expected student entry");
        };
        assert!(!student.contains_key("ENROLLED_IN"));
    }

    #[test]
    fn test_alias_falls_back_to_label() {
        let clauses = query::parse("MATCH (:Movie)", None).unwrap();
        let Value::Map(root) = hierarchy(&clauses) else {
            panic!("expected map root");
        };
        assert!(root.contains_key("Movie"));
    }
}
