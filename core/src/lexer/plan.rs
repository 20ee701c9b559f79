use std::fmt::Display;

use crate::lexer::predicate::Predicate;

/// Predicates combined with OR. Never empty once part of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseGroup {
    predicates: Vec<Predicate>,
}

impl ClauseGroup {
    fn new(first: Predicate) -> Self {
        ClauseGroup {
            predicates: vec![first],
        }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl Display for ClauseGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .predicates
            .iter()
            .map(|predicate| predicate.to_string())
            .collect::<Vec<String>>()
            .join(" || ");
        write!(f, "({})", joined)
    }
}

/// Ordered clause groups combined with AND, as produced by parsing one query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPlan {
    groups: Vec<ClauseGroup>,
}

impl QueryPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a finished predicate: an OR-joined predicate goes into the most
    /// recently opened group, any other predicate opens a new group.
    pub fn add_predicate(&mut self, predicate: Predicate, or_joined: bool) {
        match self.groups.last_mut() {
            Some(group) if or_joined => group.predicates.push(predicate),
            _ => self.groups.push(ClauseGroup::new(predicate)),
        }
    }

    pub fn groups(&self) -> &[ClauseGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All predicates in the order they were written
    pub fn predicates(&self) -> impl Iterator<Item = &Predicate> {
        self.groups.iter().flat_map(|group| group.predicates.iter())
    }

    pub fn predicate_count(&self) -> usize {
        self.groups.iter().map(ClauseGroup::len).sum()
    }
}

impl Display for QueryPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .groups
            .iter()
            .map(|group| group.to_string())
            .collect::<Vec<String>>()
            .join(" && ");
        write!(f, "{}", joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::keyword::Keyword;

    fn title(value: &str) -> Predicate {
        Predicate::new(Keyword::Title, value).unwrap()
    }

    #[test]
    fn test_first_predicate_opens_group() {
        let mut plan = QueryPlan::new();
        assert!(plan.is_empty());
        plan.add_predicate(title("Heat"), false);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.groups()[0].predicates(), &[title("Heat")]);
    }

    #[test]
    fn test_or_joined_predicate_extends_current_group() {
        let mut plan = QueryPlan::new();
        plan.add_predicate(title("Heat"), false);
        plan.add_predicate(title("Ronin"), true);
        plan.add_predicate(Predicate::new(Keyword::Year, "1995").unwrap(), false);

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.groups()[0].len(), 2);
        assert_eq!(plan.groups()[1].len(), 1);
        assert_eq!(plan.predicate_count(), 3);
        assert_eq!(
            plan.to_string(),
            "(TITRE;Heat || TITRE;Ronin) && (EN;1995)"
        );
    }

    #[test]
    fn test_or_joined_predicate_without_group_opens_one() {
        let mut plan = QueryPlan::new();
        plan.add_predicate(title("Heat"), true);
        assert_eq!(plan.len(), 1);
        assert!(!plan.groups()[0].is_empty());
    }

    #[test]
    fn test_predicates_keep_written_order() {
        let mut plan = QueryPlan::new();
        plan.add_predicate(title("A"), false);
        plan.add_predicate(title("B"), false);
        plan.add_predicate(title("C"), true);
        let values: Vec<&str> = plan.predicates().map(|p| p.value()).collect();
        assert_eq!(values, vec!["A", "B", "C"]);
    }
}
