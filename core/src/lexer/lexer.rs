use std::collections::HashSet;

use serde::Serialize;

use crate::{
    config::SearchConfig,
    lexer::{
        plan::{ClauseGroup, QueryPlan},
        tokenizer::WordTokenizer,
        FilmId, PredicateResolver, QueryError,
    },
};

/// Consulted between two predicate lookups; a cancelled query stops there.
pub trait Cancellation {
    fn is_cancelled(&self) -> bool;
}

impl<F> Cancellation for F
where
    F: Fn() -> bool,
{
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// A cancellation check that never fires
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl Cancellation for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// De-duplicated film identifiers, kept in the order they were discovered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    ids: Vec<FilmId>,
    seen: HashSet<FilmId>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add identifiers, skipping any already present
    pub fn extend<I: IntoIterator<Item = FilmId>>(&mut self, ids: I) {
        for id in ids {
            if self.seen.insert(id) {
                self.ids.push(id);
            }
        }
    }

    /// Keep only the identifiers also present in `other`, preserving order
    pub fn retain_common(&mut self, other: &CandidateSet) {
        self.ids.retain(|id| other.contains(id));
        self.seen.retain(|id| other.contains(id));
    }

    pub fn contains(&self, id: &FilmId) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[FilmId] {
        &self.ids
    }

    pub fn into_ids(self) -> Vec<FilmId> {
        self.ids
    }
}

impl FromIterator<FilmId> for CandidateSet {
    fn from_iter<T: IntoIterator<Item = FilmId>>(iter: T) -> Self {
        let mut set = CandidateSet::new();
        set.extend(iter);
        set
    }
}

/// Film identifiers matching a query, capped to the configured limit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub ids: Vec<FilmId>,
    /// Set when matches beyond the limit were dropped
    pub limited: bool,
}

impl SearchOutcome {
    /// Keep the first `limit` identifiers in discovery order
    pub fn capped(set: CandidateSet, limit: usize) -> Self {
        let mut ids = set.into_ids();
        let limited = ids.len() > limit;
        ids.truncate(limit);
        SearchOutcome { ids, limited }
    }
}

///
/// QueryLexer executes a parsed query plan against a [`PredicateResolver`].
///
/// This struct handles the pipeline from plan into film identifiers by:
/// 1. Resolving every predicate in written order through the resolver
/// 2. `OR` merging the identifiers inside each clause group
/// 3. `AND` filtering the first group's identifiers by every later group
/// 4. Capping the result, remembering whether anything was dropped
///
pub struct QueryLexer<'a, R> {
    /// The parsed plan of OR-groups joined by AND
    plan: QueryPlan,
    /// The lookup collaborator answering single predicates
    resolver: &'a R,
    /// Maximum number of identifiers returned
    result_limit: usize,
}

impl<'a, R: PredicateResolver> QueryLexer<'a, R> {
    /// Create a new QueryLexer for a precompiled plan
    pub fn new(plan: QueryPlan, resolver: &'a R, result_limit: usize) -> QueryLexer<'a, R> {
        QueryLexer {
            plan,
            resolver,
            result_limit,
        }
    }

    /// Create a new [`QueryLexer`] through tokenization of a raw query string
    pub fn from_str(
        query: &str,
        resolver: &'a R,
        config: &SearchConfig,
    ) -> Result<QueryLexer<'a, R>, QueryError> {
        let plan = WordTokenizer::new(config.value_carry).plan(query)?;
        Ok(Self::new(plan, resolver, config.result_limit))
    }

    pub fn plan(&self) -> &QueryPlan {
        &self.plan
    }

    /// Resolve and merge the plan. The first failing lookup aborts the query and
    /// any partial merge is dropped.
    pub async fn query<C: Cancellation>(&self, cancel: &C) -> Result<SearchOutcome, QueryError> {
        tracing::debug!(plan = %self.plan, "executing query plan");

        let mut accumulator: Option<CandidateSet> = None;
        for group in self.plan.groups() {
            let matches = self.resolve_group(group, cancel).await?;
            accumulator = Some(match accumulator {
                None => matches,
                Some(mut acc) => {
                    acc.retain_common(&matches);
                    acc
                }
            });
        }

        let outcome = SearchOutcome::capped(accumulator.unwrap_or_default(), self.result_limit);
        if outcome.limited {
            tracing::info!(limit = self.result_limit, "query results limited");
        }
        tracing::debug!(matches = outcome.ids.len(), "query plan executed");
        Ok(outcome)
    }

    /// Union of the identifiers of every predicate in the group
    async fn resolve_group<C: Cancellation>(
        &self,
        group: &ClauseGroup,
        cancel: &C,
    ) -> Result<CandidateSet, QueryError> {
        let mut matches = CandidateSet::new();
        for predicate in group.predicates() {
            if cancel.is_cancelled() {
                tracing::warn!(%predicate, "query cancelled before lookup");
                return Err(QueryError::Cancelled);
            }
            let ids = self
                .resolver
                .resolve(predicate)
                .await
                .map_err(|err| QueryError::Lookup(err.to_string()))?;
            tracing::debug!(%predicate, found = ids.len(), "predicate resolved");
            matches.extend(ids);
        }
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::HashMap};

    use futures::executor::block_on;

    use super::*;
    use crate::{config::ValueCarry, lexer::predicate::Predicate};

    /// Answers serialized predicates from a fixed table and records every call
    #[derive(Default)]
    struct TableResolver {
        table: HashMap<String, Vec<FilmId>>,
        failing: Option<String>,
        calls: RefCell<Vec<String>>,
    }

    impl TableResolver {
        fn with(mut self, predicate: &str, ids: Vec<FilmId>) -> Self {
            self.table.insert(predicate.to_string(), ids);
            self
        }

        fn failing_on(mut self, predicate: &str) -> Self {
            self.failing = Some(predicate.to_string());
            self
        }
    }

    impl PredicateResolver for TableResolver {
        type Error = String;

        async fn resolve(&self, predicate: &Predicate) -> Result<Vec<FilmId>, Self::Error> {
            let key = predicate.to_string();
            self.calls.borrow_mut().push(key.clone());
            if self.failing.as_deref() == Some(key.as_str()) {
                return Err(format!("database unavailable for {}", key));
            }
            Ok(self.table.get(&key).cloned().unwrap_or_default())
        }
    }

    fn run(query: &str, resolver: &TableResolver) -> Result<SearchOutcome, QueryError> {
        let lexer = QueryLexer::from_str(query, resolver, &SearchConfig::default())?;
        block_on(lexer.query(&NeverCancel))
    }

    #[test]
    fn test_candidate_set_deduplicates_in_discovery_order() {
        let set: CandidateSet = vec![3, 1, 3, 2, 1].into_iter().collect();
        assert_eq!(set.ids(), &[3, 1, 2]);
        assert_eq!(set.len(), 3);
        assert!(set.contains(&2));
    }

    #[test]
    fn test_candidate_set_retain_common() {
        let mut set: CandidateSet = vec![5, 4, 3, 2].into_iter().collect();
        let other: CandidateSet = vec![2, 5, 9].into_iter().collect();
        set.retain_common(&other);
        assert_eq!(set.ids(), &[5, 2]);
        assert!(!set.contains(&4));
    }

    #[test]
    fn test_or_group_is_a_union() {
        let resolver = TableResolver::default()
            .with("TITRE;Inception", vec![1])
            .with("TITRE;Matrix", vec![2]);
        let outcome = run("titre Inception ou titre Matrix", &resolver).unwrap();
        assert_eq!(outcome.ids, vec![1, 2]);
        assert!(!outcome.limited);
    }

    #[test]
    fn test_union_counts_shared_ids_once() {
        let resolver = TableResolver::default()
            .with("TITRE;Heat", vec![7, 8])
            .with("AVEC;Al Pacino", vec![8, 9, 7]);
        let outcome = run("titre Heat ou avec Al Pacino", &resolver).unwrap();
        assert_eq!(outcome.ids, vec![7, 8, 9]);
    }

    #[test]
    fn test_groups_are_intersected() {
        let resolver = TableResolver::default()
            .with("EN;1999", vec![1, 2, 3])
            .with("PAYS;France", vec![2, 3, 4])
            .with("DE;Besson", vec![3, 4, 5]);
        let outcome = run("en 1999 pays France de Besson", &resolver).unwrap();
        assert_eq!(outcome.ids, vec![3]);
    }

    #[test]
    fn test_intersection_keeps_first_group_order() {
        let resolver = TableResolver::default()
            .with("AVANT;2000", vec![9, 4, 6, 1])
            .with("TITRE;Alien", vec![1, 6])
            .with("TITRE;Aliens", vec![4]);
        let outcome = run("avant 2000 titre Alien ou titre Aliens", &resolver).unwrap();
        assert_eq!(outcome.ids, vec![4, 6, 1]);
    }

    #[test]
    fn test_empty_group_empties_result() {
        let resolver = TableResolver::default().with("TITRE;Heat", vec![1, 2]);
        let outcome = run("titre Heat de Nobody", &resolver).unwrap();
        assert!(outcome.ids.is_empty());
        assert!(!outcome.limited);
    }

    #[test]
    fn test_predicates_resolved_in_written_order() {
        let resolver = TableResolver::default();
        run("titre Heat ou titre Ronin en 1995 avec Pacino", &resolver).unwrap();
        assert_eq!(
            *resolver.calls.borrow(),
            vec!["TITRE;Heat", "TITRE;Ronin", "EN;1995", "AVEC;Pacino"]
        );
    }

    #[test]
    fn test_results_are_capped() {
        let resolver = TableResolver::default().with("APRES;1900", (1..=150).collect());
        let outcome = run("apres 1900", &resolver).unwrap();
        assert_eq!(outcome.ids.len(), 100);
        assert_eq!(outcome.ids, (1..=100).collect::<Vec<FilmId>>());
        assert!(outcome.limited);
    }

    #[test]
    fn test_exact_limit_is_not_flagged() {
        let resolver = TableResolver::default().with("APRES;1900", (1..=100).collect());
        let outcome = run("apres 1900", &resolver).unwrap();
        assert_eq!(outcome.ids.len(), 100);
        assert!(!outcome.limited);
    }

    #[test]
    fn test_configured_limit() {
        let resolver = TableResolver::default().with("APRES;1900", vec![5, 6, 7]);
        let config = SearchConfig::default().with_result_limit(2);
        let lexer = QueryLexer::from_str("apres 1900", &resolver, &config).unwrap();
        let outcome = block_on(lexer.query(&NeverCancel)).unwrap();
        assert_eq!(outcome.ids, vec![5, 6]);
        assert!(outcome.limited);
    }

    #[test]
    fn test_lookup_error_aborts_query() {
        let resolver = TableResolver::default()
            .with("TITRE;Heat", vec![1])
            .failing_on("EN;1995");
        let result = run("titre Heat en 1995 avec Pacino", &resolver);
        assert_eq!(
            result,
            Err(QueryError::Lookup("database unavailable for EN;1995".to_string()))
        );
        assert_eq!(resolver.calls.borrow().len(), 2);
    }

    #[test]
    fn test_cancellation_between_predicates() {
        let resolver = TableResolver::default().with("TITRE;Heat", vec![1]);
        let lexer =
            QueryLexer::from_str("titre Heat en 1995", &resolver, &SearchConfig::default())
                .unwrap();
        let cancel = || resolver.calls.borrow().len() >= 1;
        let result = block_on(lexer.query(&cancel));
        assert_eq!(result, Err(QueryError::Cancelled));
        assert_eq!(*resolver.calls.borrow(), vec!["TITRE;Heat"]);
    }

    #[test]
    fn test_strict_carry_from_config() {
        let resolver = TableResolver::default();
        let config = SearchConfig::default().with_value_carry(ValueCarry::Strict);
        let result = QueryLexer::from_str("titre Heat ou Ronin", &resolver, &config);
        assert!(matches!(result, Err(QueryError::NoKeywordForValue)));
    }
}
