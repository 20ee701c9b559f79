use url::form_urlencoded;

/// Pull the query text out of a POST body.
///
/// Form-encoded bodies (`query=titre+Heat`) are decoded, anything else is
/// taken as the raw query with its line ending removed.
pub fn query_from_body(body: &str) -> String {
    let body = body.trim_end_matches(['\r', '\n']);
    if body.starts_with("query=") || body.contains("&query=") {
        if let Some((_, value)) =
            form_urlencoded::parse(body.as_bytes()).find(|(key, _)| key == "query")
        {
            return value.into_owned();
        }
    }
    body.to_string()
}
