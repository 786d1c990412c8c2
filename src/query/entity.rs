//! Entity parser — extracts node/relationship patterns from clause text.
//!
//! Works on the raw text of a single clause record. Nodes are the
//! parenthesized spans; a relationship span runs from just after the previous
//! node's `)` to just before the next `(`, so the arrow glyphs around the
//! bracket stay inside the span and decide the direction.

use tracing::trace;

use crate::model::{Direction, Entity, NodePattern, PropertyMap, RelPattern};
use crate::query::clause::Clause;
use crate::query::params;
use crate::{Error, Result};

/// Parse the entities embedded in one clause, in scan order.
///
/// Only CREATE/MATCH-family clauses carry entities; every other kind comes
/// back untouched with an empty entity sequence. When `params` is `None`,
/// property blocks are syntax-checked but no values are bound.
pub fn parse_entities(clause: &mut Clause, params: Option<&PropertyMap>) -> Result<()> {
    if !clause.kind.carries_entities() {
        return Ok(());
    }

    let text = clause.text.clone();
    let bytes = text.as_bytes();
    let mut entities: Vec<Entity> = Vec::new();
    let mut prev_node_close = 0usize;

    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => {
                let close = text[i..].find(')').map(|off| i + off).ok_or_else(|| Error::Syntax {
                    position: i,
                    message: "unmatched '(' in node pattern".into(),
                })?;
                let node = parse_node(&text[i..=close], i, params)?;
                trace!(label = %node.label, "parsed node pattern");

                // A node appended right after a relationship is that
                // relationship's `to` endpoint.
                let idx = entities.len();
                if idx > 0 {
                    if let Entity::Relationship(rel) = &mut entities[idx - 1] {
                        if rel.to.is_none() {
                            rel.to = Some(idx);
                        }
                    }
                }
                entities.push(Entity::Node(node));
                prev_node_close = close;
                i = close + 1;
            }
            b'[' => {
                let start = (prev_node_close + 1).min(i);
                let end = text[i..].find('(').map_or(text.len(), |off| i + off);
                let mut rel = parse_relationship(&text[start..end], start, params)?;
                trace!(label = %rel.label, "parsed relationship pattern");

                // `from` is the nearest preceding entity, if it is a node.
                if let Some(last) = entities.len().checked_sub(1) {
                    if entities[last].is_node() {
                        rel.from = Some(last);
                    }
                }
                entities.push(Entity::Relationship(rel));
                i = end;
            }
            _ => i += 1,
        }
    }

    clause.entities = entities;
    Ok(())
}

/// Parse one parenthesized node span, including the parens.
fn parse_node(span: &str, offset: usize, params: Option<&PropertyMap>) -> Result<NodePattern> {
    let (header, properties) = match span.find('{') {
        Some(brace) => {
            let close = span[brace..].find('}').map(|off| brace + off).ok_or_else(|| {
                Error::Syntax {
                    position: offset + brace,
                    message: "unclosed property block in node pattern".into(),
                }
            })?;
            (
                span[1..brace].trim(),
                parse_props(&span[brace..=close], offset + brace, params)?,
            )
        }
        None => (span[1..span.len() - 1].trim(), PropertyMap::new()),
    };
    let (alias, label) = split_header(header);
    Ok(NodePattern { label, alias, properties })
}

/// Parse one relationship span: everything between the surrounding nodes,
/// arrow glyphs included.
fn parse_relationship(
    span: &str,
    offset: usize,
    params: Option<&PropertyMap>,
) -> Result<RelPattern> {
    let open = span.find('[').ok_or_else(|| Error::Syntax {
        position: offset,
        message: "missing '[' in relationship pattern".into(),
    })?;

    let (header, properties) = match span.find('{') {
        Some(brace) => {
            let close = span[brace..].find('}').map(|off| brace + off).ok_or_else(|| {
                Error::Syntax {
                    position: offset + brace,
                    message: "unclosed property block in relationship pattern".into(),
                }
            })?;
            (
                span[open + 1..brace].trim(),
                parse_props(&span[brace..=close], offset + brace, params)?,
            )
        }
        None => {
            let end = span.find(']').ok_or_else(|| Error::Syntax {
                position: offset + open,
                message: "unmatched '[' in relationship pattern".into(),
            })?;
            (span[open + 1..end].trim(), PropertyMap::new())
        }
    };

    let direction = if span.contains('<') || span.contains('>') {
        Direction::Directed
    } else {
        Direction::Bidirectional
    };

    let (alias, label) = split_header(header);
    Ok(RelPattern {
        label,
        alias,
        direction,
        from: None,
        to: None,
        properties,
    })
}

/// Split an `alias:Label` header. Either side may be absent.
fn split_header(header: &str) -> (Option<String>, String) {
    match header.split_once(':') {
        Some((alias, label)) => {
            let alias = alias.trim();
            let alias = (!alias.is_empty()).then(|| alias.to_string());
            (alias, label.trim().to_string())
        }
        None => {
            let alias = (!header.is_empty()).then(|| header.to_string());
            (alias, String::new())
        }
    }
}

/// Parse a `{ key: $param, ... }` property block, braces included.
///
/// The block is flat at the query-text level: every value token is a `$name`
/// placeholder resolved through the parameter binder. Schema-level nesting
/// is handled by dot-qualified keys at validation time instead.
fn parse_props(
    block: &str,
    offset: usize,
    params: Option<&PropertyMap>,
) -> Result<PropertyMap> {
    let inner = block[1..block.len() - 1].trim();
    let mut props = PropertyMap::new();
    if inner.is_empty() {
        return Ok(props);
    }

    if inner.ends_with(',') {
        return Err(Error::Syntax {
            position: offset,
            message: "No dangling commas allowed in queries. Remove the comma after \
                      the last property in the node or relationship."
                .into(),
        });
    }

    for entry in inner.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let (key, token) = entry.split_once(':').ok_or_else(|| Error::Syntax {
            position: offset,
            message: format!("property entry \"{entry}\" is missing a ':' separator"),
        })?;
        let name = token.trim().trim_start_matches('$');
        if let Some(params) = params {
            props.insert(key.trim().to_string(), params::bind(name, params)?);
        }
    }
    Ok(props)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::Value;
    use crate::query::clause::{ClauseKind, split};

    fn student_params() -> PropertyMap {
        let mut params = PropertyMap::new();
        params.insert("email".into(), Value::from("john@example.com"));
        params.insert("role".into(), Value::from("Jack Sparrow"));
        params
    }

    fn parse_first(query: &str, params: Option<&PropertyMap>) -> Clause {
        let mut clauses = split(query);
        assert!(!clauses.is_empty(), "no clauses in {query:?}");
        parse_entities(&mut clauses[0], params).unwrap();
        clauses.remove(0)
    }

    #[test]
    fn test_create_node_with_bound_property() {
        let params = student_params();
        let clause = parse_first("CREATE (s:Student { email: $email }) RETURN s", Some(&params));

        assert_eq!(clause.kind, ClauseKind::Create);
        assert_eq!(clause.entities.len(), 1);
        let node = clause.entities[0].as_node().unwrap();
        assert_eq!(node.label, "Student");
        assert_eq!(node.alias.as_deref(), Some("s"));
        assert_eq!(node.properties.get("email"), Some(&Value::from("john@example.com")));
    }

    #[test]
    fn test_node_without_properties() {
        let clause = parse_first("MATCH (a:Actor)", None);
        let node = clause.entities[0].as_node().unwrap();
        assert_eq!(node.label, "Actor");
        assert_eq!(node.alias.as_deref(), Some("a"));
        assert!(node.properties.is_empty());
    }

    #[test]
    fn test_dangling_comma_is_a_syntax_error() {
        let mut params = PropertyMap::new();
        params.insert("firstName".into(), Value::from("John"));
        params.insert("lastName".into(), Value::from("Doe"));
        params.insert("email".into(), Value::from("john@example.com"));

        let query = "CREATE (s:Student { firstName: $firstName, lastName: $lastName, email: $email, })";
        let mut clauses = split(query);
        let err = parse_entities(&mut clauses[0], Some(&params)).unwrap_err();
        match err {
            Error::Syntax { position, message } => {
                assert!(message.contains("dangling commas"));
                // Positions are offsets into the clause's trimmed text.
                assert_eq!(position, clauses[0].text.find('{').unwrap());
            }
            other => panic!("expected Syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_param_is_a_binding_error() {
        let params = PropertyMap::new();
        let mut clauses = split("CREATE (s:Student { email: $email })");
        let err = parse_entities(&mut clauses[0], Some(&params)).unwrap_err();
        match err {
            Error::ParameterBinding(name) => assert_eq!(name, "email"),
            other => panic!("expected ParameterBinding error, got {other:?}"),
        }
    }

    #[test]
    fn test_relationship_with_direction_and_props() {
        let params = student_params();
        let clause = parse_first("MATCH ()<-[a:ACTED_IN { role: $role }]-()", Some(&params));

        assert_eq!(clause.entities.len(), 3);
        let rel = clause.entities[1].as_relationship().unwrap();
        assert_eq!(rel.label, "ACTED_IN");
        assert_eq!(rel.alias.as_deref(), Some("a"));
        assert_eq!(rel.direction, Direction::Directed);
        assert_eq!(rel.properties.get("role"), Some(&Value::from("Jack Sparrow")));
        assert_eq!(rel.from, Some(0));
        assert_eq!(rel.to, Some(2));
    }

    #[test]
    fn test_undirected_relationship() {
        let clause = parse_first("MATCH (a:Actor)-[r:KNOWS]-(b:Actor)", None);
        let rel = clause.entities[1].as_relationship().unwrap();
        assert_eq!(rel.direction, Direction::Bidirectional);
        assert_eq!(rel.from, Some(0));
        assert_eq!(rel.to, Some(2));
    }

    #[test]
    fn test_non_entity_clauses_stay_empty() {
        let mut clauses = split("RETURN (s)");
        parse_entities(&mut clauses[0], None).unwrap();
        assert!(clauses[0].entities.is_empty());
    }

    #[test]
    fn test_unmatched_node_paren() {
        let mut clauses = split("MATCH (a:Actor");
        let err = parse_entities(&mut clauses[0], None).unwrap_err();
        assert!(matches!(err, Error::Syntax { .. }));
    }

    #[test]
    fn test_properties_skipped_without_params() {
        let clause = parse_first("CREATE (s:Student { email: $email })", None);
        let node = clause.entities[0].as_node().unwrap();
        assert!(node.properties.is_empty());
    }
}
