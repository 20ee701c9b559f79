use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Results beyond this many identifiers are dropped and the response is flagged
pub const DEFAULT_RESULT_LIMIT: usize = 100;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown value carry mode '{0}', expected 'lenient' or 'strict'")]
    InvalidValueCarry(String),
}

/// What happens to a value word that follows `ou` instead of a keyword.
///
/// `Lenient` opens a new predicate under the last keyword seen, so
/// `titre Heat ou Ronin` searches both titles. `Strict` rejects the word with
/// [`crate::QueryError::NoKeywordForValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueCarry {
    #[default]
    Lenient,
    Strict,
}

impl FromStr for ValueCarry {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(ValueCarry::Lenient),
            "strict" => Ok(ValueCarry::Strict),
            other => Err(ConfigError::InvalidValueCarry(other.to_string())),
        }
    }
}

impl Display for ValueCarry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueCarry::Lenient => write!(f, "lenient"),
            ValueCarry::Strict => write!(f, "strict"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub result_limit: usize,
    pub value_carry: ValueCarry,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            result_limit: DEFAULT_RESULT_LIMIT,
            value_carry: ValueCarry::default(),
        }
    }
}

impl SearchConfig {
    /// A limit of zero is raised to one
    pub fn with_result_limit(mut self, result_limit: usize) -> Self {
        self.result_limit = result_limit.max(1);
        self
    }

    pub fn with_value_carry(mut self, value_carry: ValueCarry) -> Self {
        self.value_carry = value_carry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.result_limit, 100);
        assert_eq!(config.value_carry, ValueCarry::Lenient);
    }

    #[test]
    fn test_builder_setters() {
        let config = SearchConfig::default()
            .with_result_limit(0)
            .with_value_carry(ValueCarry::Strict);
        assert_eq!(config.result_limit, 1);
        assert_eq!(config.value_carry, ValueCarry::Strict);
    }

    #[test]
    fn test_value_carry_parsing() {
        assert_eq!(" Strict ".parse::<ValueCarry>(), Ok(ValueCarry::Strict));
        assert_eq!("lenient".parse::<ValueCarry>(), Ok(ValueCarry::Lenient));
        assert_eq!(
            "loose".parse::<ValueCarry>(),
            Err(ConfigError::InvalidValueCarry("loose".to_string()))
        );
        assert_eq!(ValueCarry::Strict.to_string(), "strict");
    }
}
