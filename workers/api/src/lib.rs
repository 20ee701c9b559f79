// Load before other modules which depend on macros in here.
#[forbid(unsafe_code)]
#[macro_use]
mod util;
mod data;
mod http;

use worker::{event, Context, Env, Request, Response, Result, RouteContext, Router};

use crate::data::ENV_VAR_API_KEY;

static HEADER_API_KEY: &str = "X-API-Key";

/// Compare a request's API key header to the API_KEY env var, if one exists.
fn check_auth(req: &Request, ctx: &RouteContext<()>) -> bool {
    // No API_KEY configured means the catalog is public
    match ctx.env.var(ENV_VAR_API_KEY) {
        Err(_) => true,
        Ok(expected) => {
            let api_key = req.headers().get(HEADER_API_KEY).unwrap_or(None);
            api_key.as_deref() == Some(expected.to_string().as_str())
        }
    }
}

macro_rules! with_auth {
    ($handler:expr) => {
        |req: Request, ctx: RouteContext<()>| async move {
            if crate::check_auth(&req, &ctx) {
                $handler(req, ctx).await
            } else {
                worker::Response::error(
                    crate::http::ErrorResponse {
                        error: "Unauthorized".into(),
                    },
                    401,
                )
            }
        }
    };
}

#[event(fetch)]
pub async fn main(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    return Router::new()
        .get_async("/", http::index::handle_index)
        // Search endpoints
        .get_async("/search", with_auth!(http::search::handle_search))
        .post_async("/search", with_auth!(http::search::handle_search))
        // Run router
        .run(req, env)
        .await;
}

#[macro_export]
macro_rules! edge_log {
    ($level:ident, $module:expr, $scope:expr, $msg:expr $(, $args:tt)* ) => {
        worker::$level!(
            "[{}][{}] {}", $module, $scope, format!($msg $(, $args)*)
        )
    }
}
