use std::{fmt::Display, str::FromStr};

use crate::lexer::{is_punctuation, keyword::Keyword, QueryError};

/// A finished, validated search condition: one keyword and its value.
///
/// The value never carries punctuation or boundary whitespace. Year keywords
/// hold ASCII digits only; the other keywords hold letters and spaces only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Predicate {
    keyword: Keyword,
    value: String,
}

impl Predicate {
    /// Clean and validate a raw value for the given keyword
    pub fn new(keyword: Keyword, raw_value: &str) -> Result<Predicate, QueryError> {
        let value = clean_value(raw_value);
        validate(keyword, &value)?;
        Ok(Predicate { keyword, value })
    }

    pub fn keyword(&self) -> Keyword {
        self.keyword
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The value of a year keyword as a number, `None` for other keywords.
    /// Years beyond `u32::MAX` saturate, so `en` and `apres` match nothing
    /// and `avant` matches everything.
    pub fn year(&self) -> Option<u32> {
        if !self.keyword.is_numeric() {
            return None;
        }
        Some(self.value.parse::<u32>().unwrap_or(u32::MAX))
    }
}

/// Serializes into the `KEYWORD;value` form
impl Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{};{}", self.keyword, self.value)
    }
}

impl FromStr for Predicate {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (keyword, value) = s
            .split_once(';')
            .ok_or_else(|| QueryError::MalformedRequest(s.to_string()))?;
        Predicate::new(keyword.parse::<Keyword>()?, value)
    }
}

/// Remove punctuation anywhere in the value, leaving words separated by
/// single spaces
pub fn clean_value(raw_value: &str) -> String {
    raw_value
        .chars()
        .filter(|c| !is_punctuation(*c))
        .collect::<String>()
        .split(' ')
        .filter(|word| !word.is_empty())
        .collect::<Vec<&str>>()
        .join(" ")
}

fn validate(keyword: Keyword, value: &str) -> Result<(), QueryError> {
    if value.is_empty() {
        return Err(QueryError::EmptyRequest(keyword));
    }
    if keyword.is_numeric() {
        if !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(QueryError::NonNumericRequest(keyword));
        }
    } else if !value.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return Err(QueryError::NonAlphabeticRequest(keyword));
    }
    Ok(())
}

/// A predicate still accumulating value words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPredicate {
    keyword: Keyword,
    value: String,
    or_joined: bool,
    punctuated: bool,
}

impl PendingPredicate {
    pub fn new(keyword: Keyword, or_joined: bool) -> Self {
        PendingPredicate {
            keyword,
            value: String::new(),
            or_joined,
            punctuated: false,
        }
    }

    /// Append a word in its original case, followed by a single space
    pub fn with_word(mut self, word: &str, punctuated: bool) -> Self {
        self.value.push_str(word);
        self.value.push(' ');
        self.punctuated |= punctuated;
        self
    }

    pub fn keyword(&self) -> Keyword {
        self.keyword
    }

    pub fn is_or_joined(&self) -> bool {
        self.or_joined
    }

    /// Whether the accumulated value already holds punctuation
    pub fn is_punctuated(&self) -> bool {
        self.punctuated
    }

    pub fn raw_value(&self) -> &str {
        &self.value
    }

    pub fn finish(self) -> Result<Predicate, QueryError> {
        Predicate::new(self.keyword, &self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_form() {
        let predicate = Predicate::new(Keyword::Title, "Inception ").unwrap();
        assert_eq!(predicate.to_string(), "TITRE;Inception");

        let predicate = Predicate::new(Keyword::Director, "Christopher Nolan").unwrap();
        assert_eq!(predicate.to_string(), "DE;Christopher Nolan");
    }

    #[test]
    fn test_serialized_form_round_trip() {
        let pending = PendingPredicate::new(Keyword::Actor, false)
            .with_word("Brad", false)
            .with_word("Pitt,", true);
        let predicate = pending.finish().unwrap();
        assert_eq!(predicate.to_string(), "AVEC;Brad Pitt");

        let parsed: Predicate = predicate.to_string().parse().unwrap();
        assert_eq!(parsed, predicate);
        assert_eq!(parsed.keyword(), Keyword::Actor);
        assert_eq!(parsed.value(), "Brad Pitt");
    }

    #[test]
    fn test_malformed_serialized_form() {
        assert_eq!(
            "TITRE Inception".parse::<Predicate>(),
            Err(QueryError::MalformedRequest("TITRE Inception".to_string()))
        );
        assert_eq!(
            "NOPE;Inception".parse::<Predicate>(),
            Err(QueryError::UnknownKeyword("NOPE".to_string()))
        );
    }

    #[test]
    fn test_clean_value_strips_punctuation_and_spaces() {
        assert_eq!(clean_value("Inception, "), "Inception");
        assert_eq!(clean_value("Le.Fabuleux;Destin: "), "LeFabuleuxDestin");
        assert_eq!(clean_value("  Amelie   "), "Amelie");
        assert_eq!(clean_value("Brad  Pitt "), "Brad Pitt");
        assert_eq!(clean_value("Le ,  Mépris"), "Le Mépris");
    }

    #[test]
    fn test_value_words_single_spaced() {
        let predicate = PendingPredicate::new(Keyword::Actor, false)
            .with_word("Brad", false)
            .with_word("", false)
            .with_word("Pitt", false)
            .finish()
            .unwrap();
        assert_eq!(predicate.value(), "Brad Pitt");
        assert_eq!("AVEC;Brad  Pitt".parse::<Predicate>(), Ok(predicate));
    }

    #[test]
    fn test_clean_value_is_idempotent() {
        let clean = "Le fabuleux destin";
        assert_eq!(clean_value(clean), clean);
        assert_eq!(clean_value(&clean_value("Matrix. ")), clean_value("Matrix. "));
    }

    #[test]
    fn test_empty_request() {
        assert_eq!(
            Predicate::new(Keyword::Country, " , "),
            Err(QueryError::EmptyRequest(Keyword::Country))
        );
        assert_eq!(
            PendingPredicate::new(Keyword::Title, false).finish(),
            Err(QueryError::EmptyRequest(Keyword::Title))
        );
    }

    #[test]
    fn test_year_must_be_numeric() {
        assert_eq!(
            Predicate::new(Keyword::Year, "abc"),
            Err(QueryError::NonNumericRequest(Keyword::Year))
        );
        assert_eq!(
            Predicate::new(Keyword::BeforeYear, "19 80"),
            Err(QueryError::NonNumericRequest(Keyword::BeforeYear))
        );
        let predicate = Predicate::new(Keyword::AfterYear, "1999.").unwrap();
        assert_eq!(predicate.year(), Some(1999));
    }

    #[test]
    fn test_year_too_large_saturates() {
        let predicate = Predicate::new(Keyword::Year, "99999999999").unwrap();
        assert_eq!(predicate.to_string(), "EN;99999999999");
        assert_eq!(predicate.year(), Some(u32::MAX));
        let predicate = Predicate::new(Keyword::BeforeYear, "0042").unwrap();
        assert_eq!(predicate.year(), Some(42));
    }

    #[test]
    fn test_names_must_be_alphabetic() {
        assert_eq!(
            Predicate::new(Keyword::Director, "123"),
            Err(QueryError::NonAlphabeticRequest(Keyword::Director))
        );
        assert_eq!(
            Predicate::new(Keyword::Title, "Alien 3"),
            Err(QueryError::NonAlphabeticRequest(Keyword::Title))
        );
        assert!(Predicate::new(Keyword::Actor, "Louis de Funès").is_ok());
    }

    #[test]
    fn test_year_of_non_numeric_keyword() {
        let predicate = Predicate::new(Keyword::Title, "Heat").unwrap();
        assert_eq!(predicate.year(), None);
    }

    #[test]
    fn test_pending_tracks_punctuation() {
        let pending = PendingPredicate::new(Keyword::Title, true).with_word("Alien", false);
        assert!(!pending.is_punctuated());
        assert!(pending.is_or_joined());
        assert_eq!(pending.raw_value(), "Alien ");

        let pending = pending.with_word("Aliens;", true);
        assert!(pending.is_punctuated());
        assert_eq!(pending.raw_value(), "Alien Aliens; ");
    }
}
