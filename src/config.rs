//! Environment-based configuration.
//!
//! Which checks run depends on the deployment environment: queries are fixed
//! at development time, so production traffic can skip validation entirely
//! and pay nothing for it.

use tracing::debug;

/// The environment variable naming the active environment.
pub const ENV_VAR: &str = "GQLINT_ENV";

/// Engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Active environment name, e.g. `development`, `staging`, `production`.
    pub env: String,
    /// Environments in which the schema-authoring check runs.
    pub validate_schema_in: Vec<String>,
    /// Environments in which parsed queries are validated against the schema.
    pub validate_query_in: Vec<String>,
    /// Shape results hierarchically by default.
    pub format_hierarchically: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_env("development")
    }
}

impl Config {
    /// Defaults for a named environment: the schema check runs in
    /// development only; query validation runs everywhere except production.
    pub fn for_env(env: impl Into<String>) -> Self {
        Self {
            env: env.into(),
            validate_schema_in: vec!["development".into()],
            validate_query_in: vec![
                "development".into(),
                "test".into(),
                "staging".into(),
            ],
            format_hierarchically: true,
        }
    }

    /// Read the environment name from `GQLINT_ENV`, defaulting to
    /// `development` when unset.
    pub fn from_env() -> Self {
        let env = std::env::var(ENV_VAR).unwrap_or_else(|_| "development".into());
        debug!(%env, "resolved engine environment");
        Self::for_env(env)
    }

    pub fn validate_schema(&self) -> bool {
        self.validate_schema_in.iter().any(|e| *e == self.env)
    }

    pub fn validate_query(&self) -> bool {
        self.validate_query_in.iter().any(|e| *e == self.env)
    }
}
