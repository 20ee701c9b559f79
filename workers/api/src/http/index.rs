use worker::{Request, Response, Result, RouteContext};

use crate::http::StatusResponse;

pub async fn handle_index(_req: Request, _ctx: RouteContext<()>) -> Result<Response> {
    Response::from_json(&StatusResponse {
        ready: true,
        version: env!("CARGO_PKG_VERSION"),
    })
}
