//! Keyword query language and boolean retrieval for a film catalog.
//!
//! Queries are written with French keywords (`titre`, `de`, `avec`, `pays`,
//! `en`, `avant`, `apres`) and the `ou` connector, for example
//! `titre Inception ou titre Matrix de Nolan`. The [`lexer`] turns such a
//! string into a [`lexer::plan::QueryPlan`] of OR-groups joined by AND, then
//! resolves it to film identifiers through a [`lexer::PredicateResolver`].
//! Storage and record loading live behind traits so the worker can plug in
//! its database.

#![forbid(unsafe_code)]

pub mod config;
pub mod lexer;
pub mod record;
pub mod service;

pub use config::{SearchConfig, ValueCarry};
pub use lexer::{
    keyword::Keyword,
    lexer::{Cancellation, CandidateSet, NeverCancel, QueryLexer, SearchOutcome},
    plan::{ClauseGroup, QueryPlan},
    predicate::Predicate,
    FilmId, PredicateResolver, QueryError,
};
pub use record::{film::FilmInfo, person::PersonName, RecordFormatter};
pub use service::{validate_shape, QueryService, SearchPayload};
