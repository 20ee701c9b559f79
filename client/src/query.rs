use std::fmt::Display;

use filmsearch_core::{
    lexer::{predicate::clean_value, OR_CONNECTOR},
    Keyword,
};

/// One `keyword value` pair of a query
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub keyword: Keyword,
    pub value: String,
}

impl Clause {
    /// Punctuation in the value is dropped, since it would split the value
    /// into a separate condition on the server.
    pub fn new<S: AsRef<str>>(keyword: Keyword, value: S) -> Self {
        Clause {
            keyword,
            value: clean_value(value.as_ref()),
        }
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.keyword.surface(), self.value)
    }
}

/// A query as AND-ed groups of OR-ed clauses.
///
/// Values are written as-is, so a value containing a keyword word (for
/// example `De Niro`, where `de` introduces a director) is read back
/// differently by the server.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryExpr {
    groups: Vec<Vec<Clause>>,
}

impl QueryExpr {
    pub fn clause<S: AsRef<str>>(keyword: Keyword, value: S) -> Self {
        QueryExpr {
            groups: vec![vec![Clause::new(keyword, value)]],
        }
    }

    /// Require another clause
    pub fn and(mut self, clause: Clause) -> Self {
        self.groups.push(vec![clause]);
        self
    }

    /// Accept another clause in place of the last group
    pub fn or(mut self, clause: Clause) -> Self {
        match self.groups.last_mut() {
            Some(group) => group.push(clause),
            None => self.groups.push(vec![clause]),
        }
        self
    }

    pub fn groups(&self) -> &[Vec<Clause>] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Convert the expression to a query string that can be parsed by the
    /// search endpoint
    pub fn to_query_string(&self) -> String {
        self.groups
            .iter()
            .map(|group| {
                group
                    .iter()
                    .map(|clause| clause.to_string())
                    .collect::<Vec<_>>()
                    .join(&format!(" {} ", OR_CONNECTOR))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Display for QueryExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_query_string())
    }
}

/// Builder for constructing film queries fluently
#[derive(Default)]
pub struct QueryBuilder {
    expr: QueryExpr,
}

impl QueryBuilder {
    /// Create a new empty query builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition every result must meet
    pub fn and<S: AsRef<str>>(mut self, keyword: Keyword, value: S) -> Self {
        self.expr = self.expr.and(Clause::new(keyword, value));
        self
    }

    /// Add an alternative to the previous condition
    pub fn or<S: AsRef<str>>(mut self, keyword: Keyword, value: S) -> Self {
        self.expr = self.expr.or(Clause::new(keyword, value));
        self
    }

    pub fn title<S: AsRef<str>>(self, title: S) -> Self {
        self.and(Keyword::Title, title)
    }

    pub fn director<S: AsRef<str>>(self, name: S) -> Self {
        self.and(Keyword::Director, name)
    }

    pub fn actor<S: AsRef<str>>(self, name: S) -> Self {
        self.and(Keyword::Actor, name)
    }

    pub fn country<S: AsRef<str>>(self, country: S) -> Self {
        self.and(Keyword::Country, country)
    }

    pub fn year(self, year: u32) -> Self {
        self.and(Keyword::Year, year.to_string())
    }

    pub fn before(self, year: u32) -> Self {
        self.and(Keyword::BeforeYear, year.to_string())
    }

    pub fn after(self, year: u32) -> Self {
        self.and(Keyword::AfterYear, year.to_string())
    }

    /// Build the final query expression
    pub fn build(self) -> Option<QueryExpr> {
        (!self.expr.is_empty()).then_some(self.expr)
    }

    /// Build and convert to query string
    pub fn to_query_string(self) -> Option<String> {
        self.build().map(|expr| expr.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause() {
        let clause = Clause::new(Keyword::Title, "Inception");
        assert_eq!(clause.to_string(), "titre Inception");
    }

    #[test]
    fn test_clause_drops_punctuation() {
        let clause = Clause::new(Keyword::Actor, "Tom Hanks, ");
        assert_eq!(clause.value, "Tom Hanks");
    }

    #[test]
    fn test_query_expr_or() {
        let expr = QueryExpr::clause(Keyword::Title, "Inception")
            .or(Clause::new(Keyword::Title, "Matrix"));
        assert_eq!(expr.to_query_string(), "titre Inception ou titre Matrix");
        assert_eq!(expr.groups().len(), 1);
    }

    #[test]
    fn test_query_expr_and() {
        let expr = QueryExpr::clause(Keyword::Director, "Nolan")
            .and(Clause::new(Keyword::AfterYear, "2000"));
        assert_eq!(expr.to_query_string(), "de Nolan apres 2000");
        assert_eq!(expr.groups().len(), 2);
    }

    #[test]
    fn test_query_builder_mixed() {
        let query = QueryBuilder::new()
            .title("Inception")
            .or(Keyword::Title, "Matrix")
            .director("Nolan")
            .to_query_string();
        assert_eq!(
            query,
            Some("titre Inception ou titre Matrix de Nolan".to_string())
        );
    }

    #[test]
    fn test_query_builder_years() {
        let query = QueryBuilder::new()
            .country("France")
            .after(1960)
            .before(1970)
            .or(Keyword::Year, "1975")
            .to_query_string();
        assert_eq!(
            query,
            Some("pays France apres 1960 avant 1970 ou en 1975".to_string())
        );
    }

    #[test]
    fn test_query_builder_or_first() {
        let query = QueryBuilder::new().or(Keyword::Actor, "Tom Hanks").to_query_string();
        assert_eq!(query, Some("avec Tom Hanks".to_string()));
    }

    #[test]
    fn test_query_builder_empty() {
        assert_eq!(QueryBuilder::new().to_query_string(), None);
    }

    #[test]
    fn test_built_query_parses() {
        let query = QueryBuilder::new()
            .actor("Tom Hanks")
            .or(Keyword::Actor, "Meg Ryan")
            .year(1998)
            .to_query_string()
            .unwrap();
        let plan = filmsearch_core::lexer::tokenizer::WordTokenizer::new(Default::default())
            .plan(&query)
            .unwrap();
        assert_eq!(plan.to_string(), "(AVEC;Tom Hanks || AVEC;Meg Ryan) && (EN;1998)");
    }
}
