use crate::{
    query::{QueryBuilder, QueryExpr},
    ClientError, ErrorResponse, Result, SearchResponse, StatusResponse,
};

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;

pub struct Client {
    base_url: String,
    api_key: Option<String>,
}

pub enum HttpMethod {
    GET,
    POST,
}

static HEADER_API_KEY: &str = "X-API-Key";

impl Client {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    /// Create a client after checking that `base_url` is an absolute URL
    pub fn parse(base_url: &str) -> Result<Self> {
        let url = url::Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self::new(url.to_string()))
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // Status endpoint
    pub fn status(&self) -> Result<StatusResponse> {
        self.request::<StatusResponse>(HttpMethod::GET, "/", None)
    }

    // Search endpoints
    pub fn search(&self, query: &str) -> Result<SearchResponse> {
        let url = format!("/search?query={}", urlencoding::encode(query));
        self.request::<SearchResponse>(HttpMethod::GET, &url, None)
    }

    /// Send the query as the raw POST body
    pub fn search_post(&self, query: &str) -> Result<SearchResponse> {
        self.request::<SearchResponse>(HttpMethod::POST, "/search", Some(query.to_string()))
    }

    /// Search using a QueryExpr
    pub fn search_expr(&self, expr: &QueryExpr) -> Result<SearchResponse> {
        self.search(&expr.to_query_string())
    }

    /// Search using a QueryBuilder
    pub fn search_builder(&self, builder: QueryBuilder) -> Result<SearchResponse> {
        match builder.to_query_string() {
            Some(query) => self.search(&query),
            None => Err(ClientError::Api("Empty query builder".to_string())),
        }
    }

    fn request<T>(&self, method: HttpMethod, path: &str, body: Option<String>) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.base_url, path);
        let client = reqwest::blocking::Client::new();
        let mut headers = HeaderMap::new();

        if let Some(api_key) = &self.api_key {
            let value = HeaderValue::from_str(api_key)
                .map_err(|e| ClientError::InvalidHeader(e.to_string()))?;
            headers.insert(HEADER_API_KEY, value);
        }

        let response = match method {
            HttpMethod::GET => client.get(&url).headers(headers).send(),
            HttpMethod::POST => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
                client
                    .post(&url)
                    .headers(headers)
                    .body(body.unwrap_or_default())
                    .send()
            }
        }
        .map_err(ClientError::Reqwest)?;

        self.handle_response::<T>(response)
    }

    fn handle_response<T>(&self, response: reqwest::blocking::Response) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status_code = response.status().as_u16();
        let raw_body = response.text().map_err(ClientError::Reqwest)?;
        if (200..300).contains(&status_code) {
            return Ok(serde_json::from_str::<T>(&raw_body)?);
        }
        // Try to parse as error response first
        match serde_json::from_str::<ErrorResponse>(&raw_body) {
            Ok(error_response) => Err(ClientError::Api(error_response.error)),
            Err(_) => Err(ClientError::Http(format!(
                "HTTP {}: {}",
                status_code, raw_body
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = Client::new("https://films.example.com/".to_string());
        assert_eq!(client.base_url(), "https://films.example.com");
    }

    #[test]
    fn test_parse_rejects_invalid_url() {
        assert!(matches!(
            Client::parse("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            Client::parse("mailto:someone@example.com"),
            Err(ClientError::InvalidUrl(_))
        ));
        let client = Client::parse("https://films.example.com").unwrap();
        assert_eq!(client.base_url(), "https://films.example.com");
    }
}
