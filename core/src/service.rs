//! Entry point for one query: input shape checks, parsing, evaluation and
//! record formatting.

use serde::Serialize;

use crate::{
    config::SearchConfig,
    lexer::{
        keyword::Keyword,
        lexer::{Cancellation, QueryLexer, SearchOutcome},
        plan::QueryPlan,
        tokenizer::{split_words, WordTokenizer},
        PredicateResolver, QueryError, OR_CONNECTOR,
    },
    record::{film::FilmInfo, RecordFormatter},
};

/// Successful search response body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPayload {
    pub result: Vec<FilmInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

/// Reject queries whose overall word layout can never be valid. Empty words
/// left by repeated spaces are ignored.
pub fn validate_shape(query: &str) -> Result<(), QueryError> {
    let words: Vec<&str> = split_words(query)
        .into_iter()
        .filter(|word| !word.is_empty())
        .collect();
    if words.len() < 2 {
        return Err(QueryError::TooShort);
    }
    if words[0].eq_ignore_ascii_case(OR_CONNECTOR) {
        return Err(QueryError::LeadingOr);
    }
    if words.last().is_some_and(|word| Keyword::is_surface(word)) {
        return Err(QueryError::TrailingKeyword);
    }
    if words
        .windows(2)
        .any(|pair| Keyword::is_surface(pair[0]) && Keyword::is_surface(pair[1]))
    {
        return Err(QueryError::AdjacentKeywords);
    }
    Ok(())
}

pub struct QueryService<'a, R> {
    resolver: &'a R,
    config: SearchConfig,
}

impl<'a, R: PredicateResolver> QueryService<'a, R> {
    pub fn new(resolver: &'a R, config: SearchConfig) -> Self {
        QueryService { resolver, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Check the query shape and parse it into a plan
    pub fn plan(&self, query: &str) -> Result<QueryPlan, QueryError> {
        validate_shape(query)?;
        WordTokenizer::new(self.config.value_carry).plan(query)
    }

    /// Parse and evaluate a query into capped film identifiers
    pub async fn search<C: Cancellation>(
        &self,
        query: &str,
        cancel: &C,
    ) -> Result<SearchOutcome, QueryError> {
        let plan = self.plan(query)?;
        tracing::debug!(
            groups = plan.len(),
            predicates = plan.predicate_count(),
            "query parsed"
        );
        QueryLexer::new(plan, self.resolver, self.config.result_limit)
            .query(cancel)
            .await
    }

    /// Search, then load display records for the matching films
    pub async fn retrieve<C: Cancellation, F: RecordFormatter>(
        &self,
        query: &str,
        cancel: &C,
        formatter: &F,
    ) -> Result<SearchPayload, QueryError> {
        let outcome = self.search(query, cancel).await?;
        let result = formatter
            .format(&outcome.ids)
            .await
            .map_err(|err| QueryError::Format(err.to_string()))?;
        let info = outcome
            .limited
            .then(|| format!("results limited to {}", self.config.result_limit));
        Ok(SearchPayload { result, info })
    }
}
