// src/api/envelope.rs

//! Uniform outcome of every gateway call.
//!
//! On the wire an envelope is either `{"success": true, "data": ...}` or
//! `{"success": false, "error": "..."}`; there is no partial or multi-error form.

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Message used when a failure carries no text of its own
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Success { data: T },
    Failure { error: String },
}

/// Typed error for callers that prefer `?` over matching the envelope
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiFailure {
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::Success { data }
    }

    /// Failure envelope; a blank message is replaced by [`UNKNOWN_ERROR`]
    pub fn failure(error: impl Into<String>) -> Self {
        let error = error.into();
        let error = if error.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            error
        };
        Self::Failure { error }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<T, ApiFailure> {
        match self {
            Self::Success { data } => Ok(data),
            Self::Failure { error } => Err(ApiFailure { message: error }),
        }
    }

    pub fn map<U, F>(self, f: F) -> ApiResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success { data } => ApiResponse::Success { data: f(data) },
            Self::Failure { error } => ApiResponse::Failure { error },
        }
    }
}

impl<T> From<crate::error::Result<T>> for ApiResponse<T> {
    fn from(result: crate::error::Result<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(error) => Self::failure(error.message),
        }
    }
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ApiResponse", 2)?;
        match self {
            Self::Success { data } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Self::Failure { error } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ApiResponse<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawEnvelope {
            success: bool,
            #[serde(default)]
            data: Value,
            #[serde(default)]
            error: Option<String>,
        }

        let raw = RawEnvelope::deserialize(deserializer)?;
        if raw.success {
            serde_json::from_value(raw.data)
                .map(Self::success)
                .map_err(D::Error::custom)
        } else {
            Ok(Self::failure(raw.error.unwrap_or_default()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_wire_shape() {
        let envelope = ApiResponse::success(vec![1, 2, 3]);
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            serde_json::json!({"success": true, "data": [1, 2, 3]})
        );
    }

    #[test]
    fn test_failure_wire_shape() {
        let envelope: ApiResponse<()> = ApiResponse::failure("HTTP error! status: 500");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            serde_json::json!({"success": false, "error": "HTTP error! status: 500"})
        );
    }

    #[test]
    fn test_blank_failure_gets_fallback_message() {
        let envelope: ApiResponse<u8> = ApiResponse::failure("  ");
        assert_eq!(envelope.error(), Some(UNKNOWN_ERROR));

        let decoded: ApiResponse<u8> = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(decoded.error(), Some(UNKNOWN_ERROR));
    }

    #[test]
    fn test_decode_success_with_null_data() {
        let decoded: ApiResponse<Option<String>> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(decoded, ApiResponse::success(None));
    }

    #[test]
    fn test_accessors() {
        let ok: ApiResponse<&str> = ApiResponse::success("x");
        assert!(ok.is_success());
        assert_eq!(ok.data(), Some(&"x"));
        assert_eq!(ok.error(), None);
        assert_eq!(ok.clone().map(str::len).into_data(), Some(1));

        let failed: ApiResponse<&str> = ApiResponse::failure("boom");
        assert!(!failed.is_success());
        assert!(failed.data().is_none());
        assert_eq!(failed.into_result().unwrap_err().to_string(), "boom");
    }

    #[test]
    fn test_from_crate_result() {
        let failed: ApiResponse<u8> = Err(crate::error::Error::network("/health", "connection refused")).into();
        assert_eq!(failed.error(), Some("connection refused"));
    }
}
