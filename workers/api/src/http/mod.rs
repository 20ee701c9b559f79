pub mod index;
pub mod search;

#[derive(serde::Serialize)]
pub struct StatusResponse {
    pub ready: bool,
    pub version: &'static str,
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<ErrorResponse> for String {
    fn from(response: ErrorResponse) -> String {
        serde_json::to_string(&response)
            .unwrap_or_else(|_| "{\"error\":\"internal error\"}".into())
    }
}
