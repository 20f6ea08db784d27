use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct HelloWorldRequest {
    #[validate(length(min = 1, code = "required"))]
    pub message: String,
}
