use filmsearch_core::QueryService;
use worker::{Date, Method, Request, Response, Result, RouteContext};

use crate::{
    edge_log,
    data::{catalog::FilmCatalog, film::FilmStore, get_query_timeout_ms, get_search_config},
    http::ErrorResponse,
    util::{d1::get_film_database, http::query_from_body},
};

#[derive(serde::Deserialize)]
struct SearchQuery {
    pub query: Option<String>,
}

/// Query text from the `query` URL parameter, or the POST body
async fn read_query(req: &mut Request) -> Option<String> {
    if let Ok(SearchQuery { query: Some(query) }) = req.query::<SearchQuery>() {
        return Some(query);
    }
    if req.method() == Method::Post {
        return req.text().await.ok().map(|body| query_from_body(&body));
    }
    None
}

pub async fn handle_search(mut req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let Some(query) = read_query(&mut req).await else {
        return Response::error(
            ErrorResponse {
                error: "Missing 'query' parameter".into(),
            },
            400,
        );
    };

    let db = get_film_database(&ctx)?;
    let catalog = FilmCatalog::new(&db);
    let store = FilmStore::new(&db);
    let config = get_search_config(&ctx.env);

    let deadline = Date::now().as_millis() + get_query_timeout_ms(&ctx.env);
    let cancel = move || Date::now().as_millis() > deadline;

    let service = QueryService::new(&catalog, config);
    match service.retrieve(&query, &cancel, &store).await {
        Ok(payload) => {
            edge_log!(
                console_log,
                "search",
                query,
                "{} results{}",
                (payload.result.len()),
                (if payload.info.is_some() { " (limited)" } else { "" })
            );
            Response::from_json(&payload)
        }
        Err(err) => {
            let status = if err.is_client_error() { 400 } else { 500 };
            if status == 500 {
                edge_log!(console_error, "search", query, "{}", err);
            }
            Response::error(
                ErrorResponse {
                    error: err.to_string(),
                },
                status,
            )
        }
    }
}
