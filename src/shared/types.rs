use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Success envelope used by mutating endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Error body returned for every failed request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Serializes as `{}`; returned where a lookup finds no row but the
/// client expects an object rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmptyObject {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let value = serde_json::to_value(ErrorResponse::new("Already assigned")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "success": false, "error": "Already assigned" })
        );
    }

    #[test]
    fn test_empty_object_serializes_to_braces() {
        assert_eq!(serde_json::to_string(&EmptyObject {}).unwrap(), "{}");
    }
}
