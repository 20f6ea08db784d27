pub mod implementation;

use serde::{Deserialize, Serialize};

/// Single-message JSON body, `{"message": "..."}`.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct MessageResponse {
    pub message: String,
}
