use worker::{D1Database, RouteContext};

use crate::data::D1_BINDING_NAME;

pub fn get_film_database(ctx: &RouteContext<()>) -> worker::Result<D1Database> {
    get_film_database_from_env(&ctx.env)
}

pub fn get_film_database_from_env(env: &worker::Env) -> worker::Result<D1Database> {
    env.d1(D1_BINDING_NAME)
}
