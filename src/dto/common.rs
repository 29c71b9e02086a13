use serde::Serialize;
use utoipa::ToSchema;

/// Plain acknowledgement body returned by mutating endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
