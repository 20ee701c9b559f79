use filmsearch_core::{SearchConfig, ValueCarry};
use thiserror::Error;

use crate::edge_log;

pub static D1_BINDING_NAME: &str = "FILMS";

pub static ENV_VAR_API_KEY: &str = "API_KEY";
pub static ENV_VAR_RESULT_LIMIT: &str = "RESULT_LIMIT";
pub static ENV_VAR_VALUE_CARRY: &str = "VALUE_CARRY";
pub static ENV_VAR_QUERY_TIMEOUT_MS: &str = "QUERY_TIMEOUT_MS";

pub static DEFAULT_QUERY_TIMEOUT_MS: u64 = 10_000;

/// Role codes in the `generique` credits table
pub static ROLE_DIRECTOR: &str = "R";
pub static ROLE_ACTOR: &str = "A";

#[derive(Error, Debug)]
pub enum DataStoreError {
    #[error("No film with id '{0}' was found")]
    NotFound(u32),
    #[error("Invalid lookup value: {0}")]
    InvalidValue(String),
    #[error("Worker error: {0}")]
    Worker(#[from] worker::Error),
}

fn read_var(env: &worker::Env, name: &str) -> Option<String> {
    env.var(name).ok().map(|v| v.to_string())
}

/// Search settings from the worker environment, falling back to defaults
/// for anything unset or unparsable.
pub fn get_search_config(env: &worker::Env) -> SearchConfig {
    let mut config = SearchConfig::default();
    if let Some(raw) = read_var(env, ENV_VAR_RESULT_LIMIT) {
        match raw.trim().parse::<usize>() {
            Ok(limit) => config = config.with_result_limit(limit),
            Err(_) => edge_log!(
                console_warn,
                "config",
                ENV_VAR_RESULT_LIMIT,
                "ignoring invalid value '{}'",
                raw
            ),
        }
    }
    if let Some(raw) = read_var(env, ENV_VAR_VALUE_CARRY) {
        match raw.parse::<ValueCarry>() {
            Ok(carry) => config = config.with_value_carry(carry),
            Err(err) => edge_log!(console_warn, "config", ENV_VAR_VALUE_CARRY, "{}", err),
        }
    }
    config
}

pub fn get_query_timeout_ms(env: &worker::Env) -> u64 {
    read_var(env, ENV_VAR_QUERY_TIMEOUT_MS)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_QUERY_TIMEOUT_MS)
}

pub mod catalog;
pub mod film;
