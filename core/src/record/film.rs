use std::cmp::Ordering;

use serde::{Serialize, Serializer};

use crate::record::person::PersonName;

/// Summary of a film as shown in search results.
///
/// Directors, actors and alternative titles are sorted on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilmInfo {
    #[serde(rename = "titre")]
    pub title: String,
    #[serde(rename = "realisateurs", serialize_with = "serialize_names")]
    pub directors: Vec<PersonName>,
    #[serde(rename = "acteurs", serialize_with = "serialize_names")]
    pub actors: Vec<PersonName>,
    #[serde(rename = "pays")]
    pub country: String,
    #[serde(rename = "annee")]
    pub year: i32,
    /// Minutes; zero or negative when unknown
    #[serde(rename = "duree", serialize_with = "serialize_duration")]
    pub duration: i32,
    #[serde(rename = "autres titres")]
    pub other_titles: Vec<String>,
}

impl FilmInfo {
    pub fn new(
        title: String,
        mut directors: Vec<PersonName>,
        mut actors: Vec<PersonName>,
        country: String,
        year: i32,
        duration: i32,
        mut other_titles: Vec<String>,
    ) -> Self {
        directors.sort();
        actors.sort();
        other_titles.sort();
        FilmInfo {
            title,
            directors,
            actors,
            country,
            year,
            duration,
            other_titles,
        }
    }
}

/// Films order by title, then year, then country
impl Ord for FilmInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.title
            .cmp(&other.title)
            .then_with(|| self.year.cmp(&other.year))
            .then_with(|| self.country.cmp(&other.country))
            .then_with(|| self.duration.cmp(&other.duration))
            .then_with(|| self.directors.cmp(&other.directors))
            .then_with(|| self.actors.cmp(&other.actors))
            .then_with(|| self.other_titles.cmp(&other.other_titles))
    }
}

impl PartialOrd for FilmInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Render a duration in minutes as `2h` or `1h35mn`, `None` when unknown
pub fn format_duration(minutes: i32) -> Option<String> {
    if minutes <= 0 {
        return None;
    }
    let (hours, rest) = (minutes / 60, minutes % 60);
    if rest > 0 {
        Some(format!("{}h{}mn", hours, rest))
    } else {
        Some(format!("{}h", hours))
    }
}

fn serialize_names<S: Serializer>(names: &[PersonName], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(names.iter().map(|name| name.to_string()))
}

fn serialize_duration<S: Serializer>(minutes: &i32, serializer: S) -> Result<S::Ok, S::Error> {
    match format_duration(*minutes) {
        Some(duration) => serializer.serialize_str(&duration),
        None => serializer.serialize_none(),
    }
}
