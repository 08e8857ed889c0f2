//! Wire envelope shared by every `/api/event-volunteer` response, and the
//! tagged result it is folded into before the rest of the crate sees it.
//!
//! The backend answers `{ success, data?, error? }` (older deployments also
//! send `message`). Probing those optional fields happens here, once.

use serde::Deserialize;
use serde_json::Value;

/// Raw JSON body as sent by the backend.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<Value>,
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Backend-supplied explanation, if any: `error` when it is a string,
    /// otherwise `message`.
    pub fn reason(&self) -> Option<String> {
        let from_error = match &self.error {
            Some(Value::String(text)) => Some(text.clone()),
            _ => None,
        };
        from_error
            .or_else(|| self.message.clone())
            .filter(|text| !text.trim().is_empty())
    }
}

/// Why the backend refused a request it understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Non-2xx status with a JSON body.
    Status(u16),
    /// 2xx status but `success: false`.
    Unsuccessful,
}

/// Tagged form of [`Envelope`]: either the payload or a refusal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse<T> {
    Ok(T),
    Err(ApiErrorKind, Option<String>),
}

impl<T> ApiResponse<Option<T>> {
    /// Folds an HTTP status and a decoded envelope into a tagged response.
    /// The payload stays optional because some endpoints (delete) carry none.
    pub fn from_envelope(status: u16, envelope: Envelope<T>) -> Self {
        if !(200..300).contains(&status) {
            let reason = envelope.reason();
            return ApiResponse::Err(ApiErrorKind::Status(status), reason);
        }
        if !envelope.success {
            let reason = envelope.reason();
            return ApiResponse::Err(ApiErrorKind::Unsuccessful, reason);
        }
        ApiResponse::Ok(envelope.data)
    }
}
