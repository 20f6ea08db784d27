use http_contracts::MessageResponse;
use saddle::Payload;
use tracing::{info, instrument};

use crate::features::v1::models::HelloWorldRequest;

pub const GREETING: &str = "Hello there, saddle up friend!";

#[instrument(name = "hello_world", skip_all)]
pub async fn hello_world(payload: Payload<HelloWorldRequest>) -> MessageResponse {
    info!(message = %payload.message, "greeting requested");
    GREETING.into()
}
