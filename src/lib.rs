//! # gqlint — schema-validated graph-query parsing
//!
//! A two-stage engine for a Cypher-like query dialect:
//!
//! 1. **Parse** — split a query string into clause records, extract the
//!    node/relationship patterns embedded in CREATE/MATCH clauses, and bind
//!    `$name` parameter placeholders against a supplied mapping.
//! 2. **Validate** — check every parsed entity against a declarative
//!    [`SchemaDefinition`]: label/tag lookup, required properties on writes,
//!    value-kind checks, and allowed-value constraints.
//!
//! ## Design Principles
//!
//! 1. **Parser owns nothing**: query text → clause records is a pure function
//! 2. **Explicit schema**: the definition is an argument, never a global
//! 3. **Closed tags**: type checks are a `match` over [`Value`], no reflection
//! 4. **Fail fast**: the first violation aborts the run as a typed [`Error`]
//!
//! ## Quick Start
//!
//! ```rust
//! use gqlint::{Engine, PropertyMap, Value, schema};
//!
//! # fn example() -> gqlint::Result<()> {
//! let definition = schema::from_json(r#"{
//!     "Student": {
//!         "type": "node",
//!         "label": "Student",
//!         "properties": { "email": {"kind": "string"} }
//!     }
//! }"#)?;
//! let engine = Engine::new(definition);
//!
//! let mut params = PropertyMap::new();
//! params.insert("email".into(), Value::from("john@example.com"));
//! let clauses = engine.run(
//!     "CREATE (s:Student { email: $email }) RETURN s",
//!     Some(&params),
//! )?;
//!
//! assert_eq!(clauses.len(), 2);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod config;
pub mod format;
pub mod model;
pub mod query;
pub mod schema;
pub mod validate;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{Direction, Entity, NodePattern, PropertyMap, PropertyPath, RelPattern, Value, ValueKind};

// ============================================================================
// Re-exports: Query
// ============================================================================

pub use query::{Clause, ClauseKind};

// ============================================================================
// Re-exports: Schema
// ============================================================================

pub use schema::{Constraint, PropertyRule, SchemaDefinition, SchemaEntry};

// ============================================================================
// Re-exports: Config
// ============================================================================

pub use config::Config;

// ============================================================================
// Top-level Engine handle
// ============================================================================

use tracing::debug;

/// The primary entry point. An `Engine` owns a schema definition and a
/// configuration and runs the parse + validate pipeline.
pub struct Engine {
    schema: SchemaDefinition,
    config: Config,
}

impl Engine {
    /// Create an engine with the default (development) configuration.
    pub fn new(schema: SchemaDefinition) -> Self {
        Self { schema, config: Config::default() }
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(schema: SchemaDefinition, config: Config) -> Self {
        Self { schema, config }
    }

    /// Load the schema from a JSON file and configure from the environment.
    pub fn from_schema_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let schema = schema::load(path)?;
        Ok(Self { schema, config: Config::from_env() })
    }

    pub fn schema(&self) -> &SchemaDefinition {
        &self.schema
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse a query and, per configuration, validate it against the schema.
    ///
    /// Returns the ordered clause records with their parsed entities, or the
    /// first error encountered anywhere in the pipeline.
    pub fn run(&self, query_text: &str, params: Option<&PropertyMap>) -> Result<Vec<Clause>> {
        if self.config.validate_schema() {
            self.schema.check()?;
        }

        let clauses = query::parse(query_text, params)?;
        debug!(clauses = clauses.len(), "parsed query");

        if self.config.validate_query() {
            validate::validate(&clauses, &self.schema)?;
        }

        Ok(clauses)
    }

    /// Run the pipeline and shape the result per the configuration:
    /// hierarchical when [`Config::format_hierarchically`] is set, flat
    /// otherwise. `run` and `run_hierarchical` are the explicit overrides.
    pub fn run_formatted(
        &self,
        query_text: &str,
        params: Option<&PropertyMap>,
    ) -> Result<Value> {
        let clauses = self.run(query_text, params)?;
        if self.config.format_hierarchically {
            Ok(format::hierarchy(&clauses))
        } else {
            Ok(format::flat(&clauses))
        }
    }

    /// Run the pipeline and shape the result hierarchically.
    pub fn run_hierarchical(
        &self,
        query_text: &str,
        params: Option<&PropertyMap>,
    ) -> Result<Value> {
        let clauses = self.run(query_text, params)?;
        Ok(format::hierarchy(&clauses))
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed entity text. `position` is a byte offset into the trimmed
    /// text of the clause being parsed ([`Clause::text`]), not into the
    /// original query string.
    #[error("Syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    #[error("Param \"{0}\" is undefined. Check the spelling in your query and in your params object.")]
    ParameterBinding(String),

    #[error("There is no {kind} with the label \"{label}\" in the schema. Check your query.")]
    SchemaLookup { kind: String, label: String },

    #[error("All node and relationship properties are required in CREATE and MERGE clauses. The \"{0}\" property is missing from the query.")]
    RequiredProperty(String),

    #[error("The \"{property}\" property does not match the schema: expected {expected}, got {got}")]
    TypeMismatch { property: String, expected: String, got: String },

    #[error("Constraint violation on \"{property}\": {message}")]
    Constraint { property: String, message: String },

    #[error("Cannot have duplicate labels: {0}")]
    DuplicateLabel(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Schema format error: {0}")]
    SchemaFormat(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
