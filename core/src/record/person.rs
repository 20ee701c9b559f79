use std::{cmp::Ordering, fmt::Display};

use serde::{Deserialize, Serialize};

/// Family name and optional first name of a director or actor.
///
/// Sorting skips a leading lower-case particle of the family name, so
/// `von Stroheim` sorts under S and `de Funès` under F, while `De Niro`
/// stays under D.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub last: String,
    pub first: Option<String>,
}

impl PersonName {
    pub fn new<S: Into<String>>(last: S, first: Option<S>) -> Self {
        PersonName {
            last: last.into(),
            first: first.map(Into::into),
        }
    }

    /// The family name from its first character that is not lower-case
    pub fn sort_key(&self) -> &str {
        let start = self
            .last
            .char_indices()
            .find(|(_, c)| !is_lower_or_caseless(*c))
            .map(|(i, _)| i)
            .unwrap_or(self.last.len());
        &self.last[start..]
    }
}

fn is_lower_or_caseless(c: char) -> bool {
    let mut lower = c.to_lowercase();
    lower.next() == Some(c) && lower.next().is_none()
}

impl Ord for PersonName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(other.sort_key())
            .then_with(|| self.first.cmp(&other.first))
            .then_with(|| self.last.cmp(&other.last))
    }
}

impl PartialOrd for PersonName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// First name then family name. A parenthesised mention stored with the
/// first name, such as `(Jr.)`, moves to the end.
impl Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.first.as_deref() {
            None => write!(f, "{}", self.last),
            Some(first) => match first.find('(') {
                None => write!(f, "{} {}", first, self.last),
                Some(pos) => {
                    let given = first[..pos].trim();
                    let mention = first[pos..].trim();
                    if given.is_empty() {
                        write!(f, "{} {}", self.last, mention)
                    } else {
                        write!(f, "{} {} {}", given, self.last, mention)
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(PersonName::new("Nolan", Some("Christopher")).to_string(), "Christopher Nolan");
        assert_eq!(PersonName::new("Fernandel", None).to_string(), "Fernandel");
        assert_eq!(
            PersonName::new("Davis", Some("Sammy (Jr.)")).to_string(),
            "Sammy Davis (Jr.)"
        );
        assert_eq!(PersonName::new("Lumière", Some("(père)")).to_string(), "Lumière (père)");
    }

    #[test]
    fn test_sort_key_skips_particles() {
        assert_eq!(PersonName::new("von Stroheim", Some("Erich")).sort_key(), "Stroheim");
        assert_eq!(PersonName::new("de la Huerta", Some("Paz")).sort_key(), "Huerta");
        assert_eq!(PersonName::new("de Funès", Some("Louis")).sort_key(), "Funès");
        assert_eq!(PersonName::new("De Niro", Some("Robert")).sort_key(), "De Niro");
    }

    #[test]
    fn test_ordering() {
        let mut names = vec![
            PersonName::new("von Stroheim", Some("Erich")),
            PersonName::new("De Niro", Some("Robert")),
            PersonName::new("de Funès", Some("Louis")),
            PersonName::new("Funès", Some("Alice")),
        ];
        names.sort();
        let shown: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        assert_eq!(
            shown,
            vec!["Robert De Niro", "Alice Funès", "Louis de Funès", "Erich von Stroheim"]
        );
    }

    #[test]
    fn test_missing_first_name_sorts_first() {
        let alone = PersonName::new("Arletty", None);
        let named = PersonName::new("Arletty", Some("Léonie"));
        assert!(alone < named);
    }
}
