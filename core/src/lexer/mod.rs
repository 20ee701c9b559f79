//! A query lexer that tokenizes, groups, and executes keyword search queries.
//!
//! This module provides the query language itself (keywords, predicates and
//!   their validation), the grouping of predicates into a [`plan::QueryPlan`],
//!   and the evaluator which resolves every predicate to film identifiers and
//!   merges the identifier sets with OR inside a group and AND across groups.

use std::fmt::Display;

use crate::lexer::{keyword::Keyword, predicate::Predicate};

/// Identifier of a film record in the catalog
pub type FilmId = u32;

/// Characters stripped from words before classification and from finished values
pub const PUNCTUATION: [char; 4] = [',', ';', '.', ':'];

/// The connector joining a predicate to the previous group with OR
pub static OR_CONNECTOR: &str = "ou";

pub fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

/// Describes an error that occurred during query parsing or execution
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Empty query")]
    EmptyQuery,
    #[error("A query needs at least two words")]
    TooShort,
    #[error("A query cannot start with 'ou'")]
    LeadingOr,
    #[error("A query cannot end with a keyword")]
    TrailingKeyword,
    #[error("Two keywords cannot follow each other, except 'ou'")]
    AdjacentKeywords,
    #[error("No keyword for value")]
    NoKeywordForValue,
    #[error("Request {0} is empty")]
    EmptyRequest(Keyword),
    #[error("Request {0} does not contain only numbers")]
    NonNumericRequest(Keyword),
    #[error("Request {0} does not contain only letters")]
    NonAlphabeticRequest(Keyword),
    #[error("Unknown keyword '{0}'")]
    UnknownKeyword(String),
    #[error("Malformed request '{0}'")]
    MalformedRequest(String),
    #[error("Lookup failed: {0}")]
    Lookup(String),
    #[error("Record formatting failed: {0}")]
    Format(String),
    #[error("Query was cancelled")]
    Cancelled,
}

impl QueryError {
    /// Whether the error was caused by the query text rather than a collaborator
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            QueryError::Lookup(_) | QueryError::Format(_) | QueryError::Cancelled
        )
    }
}

/// Describes a classified word of the query language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Keyword(Keyword),
    Or,
    /// A value fragment in its original case, punctuation included
    Value { text: String, punctuated: bool },
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Keyword(keyword) => write!(f, "{}", keyword.surface()),
            Token::Or => write!(f, "{}", OR_CONNECTOR),
            Token::Value { text, .. } => write!(f, "{}", text),
        }
    }
}

/// Resolves a single finished predicate to the identifiers of matching films.
///
/// The evaluator calls this once per predicate, in the order the predicates
/// were written. The order of the returned identifiers is kept as the
/// discovery order of the final result.
pub trait PredicateResolver {
    type Error: Display;

    async fn resolve(&self, predicate: &Predicate) -> Result<Vec<FilmId>, Self::Error>;
}

pub mod keyword;
pub mod lexer;
pub mod plan;
pub mod predicate;
pub mod tokenizer;
