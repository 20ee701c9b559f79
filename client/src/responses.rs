use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub ready: bool,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub result: Vec<Film>,
    /// Set when the result list was cut at the server's limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl SearchResponse {
    pub fn is_limited(&self) -> bool {
        self.info.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    #[serde(rename = "titre")]
    pub title: String,
    #[serde(rename = "realisateurs")]
    pub directors: Vec<String>,
    #[serde(rename = "acteurs")]
    pub actors: Vec<String>,
    #[serde(rename = "pays")]
    pub country: String,
    #[serde(rename = "annee")]
    pub year: i32,
    #[serde(rename = "duree")]
    pub duration: Option<String>,
    #[serde(rename = "autres titres", default)]
    pub other_titles: Vec<String>,
}
