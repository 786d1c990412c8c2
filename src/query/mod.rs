//! # Query Parsing
//!
//! Splits a Cypher-like query string into clause records and extracts the
//! node/relationship patterns embedded in CREATE/MATCH clauses, binding
//! `$name` parameter placeholders along the way.
//!
//! Pure functions — no I/O, no state, no schema dependency.

pub mod clause;
pub mod entity;
pub mod params;

use tracing::debug;

use crate::Result;
use crate::model::PropertyMap;

pub use clause::{Clause, ClauseKind, split};
pub use params::bind;

/// Parse a query string into clause records with populated entities.
///
/// When `params` is `None`, property blocks are still checked for syntax but
/// no values are bound, so entities come back with empty property maps.
pub fn parse(query: &str, params: Option<&PropertyMap>) -> Result<Vec<Clause>> {
    let mut clauses = clause::split(query);
    debug!(clauses = clauses.len(), "split query into clause records");
    for clause in &mut clauses {
        entity::parse_entities(clause, params)?;
    }
    Ok(clauses)
}
