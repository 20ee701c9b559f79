use std::{collections::HashMap, fmt::Display, str::FromStr};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::lexer::QueryError;

/// Describes a search keyword of the query language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Title,
    Director,
    Actor,
    Country,
    Year,
    BeforeYear,
    AfterYear,
}

static SURFACE_TOKENS: Lazy<HashMap<&'static str, Keyword>> = Lazy::new(|| {
    Keyword::ALL
        .iter()
        .map(|keyword| (keyword.surface(), *keyword))
        .collect()
});

impl Keyword {
    pub const ALL: [Keyword; 7] = [
        Keyword::Title,
        Keyword::Director,
        Keyword::Actor,
        Keyword::Country,
        Keyword::Year,
        Keyword::BeforeYear,
        Keyword::AfterYear,
    ];

    /// The lower-case word that introduces this keyword in a query
    pub fn surface(&self) -> &'static str {
        match self {
            Keyword::Title => "titre",
            Keyword::Director => "de",
            Keyword::Actor => "avec",
            Keyword::Country => "pays",
            Keyword::Year => "en",
            Keyword::BeforeYear => "avant",
            Keyword::AfterYear => "apres",
        }
    }

    /// The upper-case name used in the serialized `KEYWORD;value` form
    pub fn canonical(&self) -> &'static str {
        match self {
            Keyword::Title => "TITRE",
            Keyword::Director => "DE",
            Keyword::Actor => "AVEC",
            Keyword::Country => "PAYS",
            Keyword::Year => "EN",
            Keyword::BeforeYear => "AVANT",
            Keyword::AfterYear => "APRES",
        }
    }

    /// Year keywords take digits, every other keyword takes letters
    pub fn is_numeric(&self) -> bool {
        match self {
            Keyword::Year | Keyword::BeforeYear | Keyword::AfterYear => true,
            Keyword::Title
            | Keyword::Director
            | Keyword::Actor
            | Keyword::Country => false,
        }
    }

    /// Match a query word against the surface tokens, ignoring case
    pub fn from_surface(word: &str) -> Option<Keyword> {
        SURFACE_TOKENS.get(word.to_lowercase().as_str()).copied()
    }

    pub fn is_surface(word: &str) -> bool {
        Self::from_surface(word).is_some()
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl FromStr for Keyword {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Keyword::ALL
            .iter()
            .find(|keyword| keyword.canonical() == s)
            .copied()
            .ok_or_else(|| QueryError::UnknownKeyword(s.to_string()))
    }
}
