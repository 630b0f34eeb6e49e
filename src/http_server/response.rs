//! # Response Formatting
//!
//! Success bodies for mutating endpoints. List endpoints return bare JSON
//! arrays of [`Topping`](crate::storage::Topping) and
//! [`Pizza`](crate::storage::Pizza).

use serde::Serialize;

/// Body returned by create, update and delete
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
    pub id: i64,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>, id: i64) -> Self {
        Self {
            message: message.into(),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_response_serialization() {
        let response = MessageResponse::new("Topping removed successfully", 4);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["message"], "Topping removed successfully");
        assert_eq!(json["id"], 4);
    }
}
