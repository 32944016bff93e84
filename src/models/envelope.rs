//! Uniform response envelope wrapping every API payload

use chrono::Utc;
use serde::Serialize;

use crate::error::InternalCode;

pub const SUCCESS_MESSAGE: &str = "Request processed successfully";
pub const ERROR_MESSAGE_PREFIX: &str = "Unable to process request: ";

/// Envelope carried by every response: success flag, human message,
/// internal outcome code, timestamp and optional payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub internal_code: InternalCode,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a successful payload
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            internal_code: InternalCode::Success,
            timestamp: now_timestamp(),
            data: Some(data),
        }
    }
}

impl ApiResponse<serde_json::Value> {
    /// Wrap a failure outcome, with an optional detail payload
    /// (e.g. a field -> message map from structural validation)
    pub fn failure(
        internal_code: InternalCode,
        message: String,
        data: Option<serde_json::Value>,
    ) -> Self {
        Self {
            success: false,
            message,
            internal_code,
            timestamp: now_timestamp(),
            data,
        }
    }
}

fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_carries_payload_and_code() {
        let envelope = ApiResponse::ok(vec![1, 2, 3]);
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["message"], SUCCESS_MESSAGE);
        assert_eq!(value["internalCode"]["code"], "001");
        assert_eq!(value["data"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn failure_envelope_omits_absent_data() {
        let envelope = ApiResponse::failure(
            InternalCode::NotFound,
            format!("{}Book not found", ERROR_MESSAGE_PREFIX),
            None,
        );
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["internalCode"]["code"], "003");
        assert!(value.get("data").is_none());
    }
}
