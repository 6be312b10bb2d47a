//! Environment-driven runtime configuration.

use std::env;

/// Which ownership-check strategy the mutation paths use.
///
/// Advisory is the default resolve-then-act behaviour; atomic folds the
/// ownership predicate into a single conditional statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeStrategyChoice {
    #[default]
    Advisory,
    AtomicConditional,
}

/// Configuration errors surfaced at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("SCOPE_STRATEGY must be \"advisory\" or \"atomic\", got {value:?}")]
    InvalidScopeStrategy { value: String },
}

/// Runtime server configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    pub database_url: String,
    pub session_key_file: String,
    pub cookie_secure: bool,
    pub scope_strategy: ScopeStrategyChoice,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;

        let scope_strategy = match env::var("SCOPE_STRATEGY") {
            Ok(value) => parse_scope_strategy(&value)?,
            Err(_) => ScopeStrategyChoice::default(),
        };

        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_owned()),
            database_url,
            session_key_file: env::var("SESSION_KEY_FILE")
                .unwrap_or_else(|_| "/var/run/secrets/session_key".to_owned()),
            cookie_secure: env::var("SESSION_COOKIE_SECURE")
                .map(|v| v != "0")
                .unwrap_or(true),
            scope_strategy,
        })
    }
}

fn parse_scope_strategy(value: &str) -> Result<ScopeStrategyChoice, ConfigError> {
    match value {
        "advisory" => Ok(ScopeStrategyChoice::Advisory),
        "atomic" => Ok(ScopeStrategyChoice::AtomicConditional),
        other => Err(ConfigError::InvalidScopeStrategy {
            value: other.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("advisory", ScopeStrategyChoice::Advisory)]
    #[case("atomic", ScopeStrategyChoice::AtomicConditional)]
    fn scope_strategy_parses_known_values(
        #[case] input: &str,
        #[case] expected: ScopeStrategyChoice,
    ) {
        assert_eq!(parse_scope_strategy(input).expect("valid strategy"), expected);
    }

    #[rstest]
    fn scope_strategy_rejects_unknown_values() {
        assert!(matches!(
            parse_scope_strategy("optimistic"),
            Err(ConfigError::InvalidScopeStrategy { .. })
        ));
    }
}
