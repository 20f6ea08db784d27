pub mod handlers;
pub mod models;

use axum::{http::Method, routing::post};
use saddle::Engine;

use crate::features::v1::models::HelloWorldRequest;

pub const HELLO_WORLD_PATH: &str = "/v1/hello-world";

pub fn attach_routes(engine: &mut Engine) {
    engine
        .expect_payload::<HelloWorldRequest>(Method::POST, HELLO_WORLD_PATH)
        .route(HELLO_WORLD_PATH, post(handlers::hello_world));
}
