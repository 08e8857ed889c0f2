//! Client for the remote event-volunteer API.
//!
//! [`SignupClient`] turns the five signup operations into HTTP requests and
//! folds every way they can fail into one [`SignupError`]. The actual I/O sits
//! behind [`HttpTransport`] (gloo-net in the browser, a stub in tests), so
//! everything here runs natively.
//!
//! Nothing is retried. A failed call surfaces once, and retrying means the
//! visitor clicks the button again.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{GENERIC_FAILURE, NOT_YOUR_SIGNUP, Operation, SignupError};
use crate::model::api::{ApiErrorKind, ApiResponse, Envelope};
use crate::model::signup::{PublicSignupRecord, SignupRecord};
use crate::requests::{CreateSignupRequest, UpdateSignupRequest};

pub const VOLUNTEER_PATH: &str = "/api/event-volunteer";
pub const PUBLIC_ROSTER_PATH: &str = "/api/event-volunteer/page-hydrate";

const CREATE_UNSUCCESSFUL: &str = "Failed to submit signup";

// ---------------------------------------------------------------------------
// Transport seam
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute or same-origin URL, without query string.
    pub url: String,
    /// Unencoded query pairs; the transport encodes them.
    pub query: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the `content-type` header announces JSON. Intermediaries that
    /// fail upstream tend to answer with an HTML page instead.
    pub fn is_json(&self) -> bool {
        self.content_type.as_deref().is_some_and(|value| {
            let mime = value.split(';').next().unwrap_or_default().trim();
            mime.eq_ignore_ascii_case("application/json") || mime.to_ascii_lowercase().ends_with("+json")
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request could not be built: {0}")]
    Build(String),

    #[error("request failed: {0}")]
    Network(String),
}

#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// ---------------------------------------------------------------------------
// Signup operations
// ---------------------------------------------------------------------------

/// The operations slot rows and the roster need from the backend.
#[async_trait(?Send)]
pub trait SignupApi {
    /// `Ok(None)` when the backend confirmed the signup without echoing a
    /// usable record; the next roster fetch fills it in.
    async fn create(&self, request: &CreateSignupRequest)
    -> Result<Option<SignupRecord>, SignupError>;

    /// Full records including email; for the admin roster.
    async fn list(&self, event_id: &str) -> Result<Vec<SignupRecord>, SignupError>;

    /// Records with email omitted by the backend; for every public view.
    async fn list_public(&self, event_id: &str) -> Result<Vec<PublicSignupRecord>, SignupError>;

    async fn update(
        &self,
        record_id: &str,
        request: &UpdateSignupRequest,
    ) -> Result<SignupRecord, SignupError>;

    async fn remove(&self, record_id: &str, verifying_email: &str) -> Result<(), SignupError>;
}

pub struct SignupClient<T> {
    config: ApiConfig,
    transport: T,
}

impl<T: HttpTransport> SignupClient<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn send(
        &self,
        operation: Operation,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<String>,
    ) -> Result<HttpResponse, SignupError> {
        let request = HttpRequest {
            method,
            url: self.config.url(path),
            query,
            body,
        };
        log::debug!("{:?} {}", request.method, request.url);

        self.transport.send(request).await.map_err(|err| {
            log::error!("volunteer API unreachable while trying to {operation}: {err}");
            SignupError::Network {
                operation,
                detail: err.to_string(),
            }
        })
    }
}

#[async_trait(?Send)]
impl<T: HttpTransport> SignupApi for SignupClient<T> {
    async fn create(
        &self,
        request: &CreateSignupRequest,
    ) -> Result<Option<SignupRecord>, SignupError> {
        let body = encode(request)?;
        let response = self
            .send(Operation::Create, Method::Post, VOLUNTEER_PATH, Vec::new(), Some(body))
            .await?;
        let status = response.status;
        // The signup is stored once the backend says so; a missing or odd
        // echo must not turn that into a failure.
        match read_envelope::<Value>(&response)? {
            ApiResponse::Ok(data) => {
                let record = data.and_then(|data| {
                    serde_json::from_value::<SignupRecord>(data)
                        .map_err(|err| log::warn!("signup echo not understood ({err}); relying on refetch"))
                        .ok()
                });
                match &record {
                    Some(record) => log::info!("signed up {} for '{}'", record.name, record.role),
                    None => log::info!("signed up for '{}' (no record echoed)", request.role),
                }
                Ok(record)
            }
            ApiResponse::Err(kind, reason) => Err(refusal(Operation::Create, status, kind, reason)),
        }
    }

    async fn list(&self, event_id: &str) -> Result<Vec<SignupRecord>, SignupError> {
        let query = vec![("eventId".to_string(), event_id.to_string())];
        let response = self
            .send(Operation::List, Method::Get, VOLUNTEER_PATH, query, None)
            .await?;
        read_list(&response)
    }

    async fn list_public(&self, event_id: &str) -> Result<Vec<PublicSignupRecord>, SignupError> {
        let query = vec![("eventId".to_string(), event_id.to_string())];
        let response = self
            .send(Operation::List, Method::Get, PUBLIC_ROSTER_PATH, query, None)
            .await?;
        read_list(&response)
    }

    async fn update(
        &self,
        record_id: &str,
        request: &UpdateSignupRequest,
    ) -> Result<SignupRecord, SignupError> {
        let body = encode(request)?;
        let path = record_path(record_id);
        let response = self
            .send(Operation::Update, Method::Put, &path, Vec::new(), Some(body))
            .await?;
        let status = response.status;
        match read_envelope::<SignupRecord>(&response)? {
            ApiResponse::Ok(Some(record)) => Ok(record),
            ApiResponse::Ok(None) => Err(missing_data(status)),
            ApiResponse::Err(kind, reason) => Err(refusal(Operation::Update, status, kind, reason)),
        }
    }

    async fn remove(&self, record_id: &str, verifying_email: &str) -> Result<(), SignupError> {
        let email = verifying_email.trim();
        if email.is_empty() {
            return Err(SignupError::validation(
                "Enter the email you signed up with to remove this signup.",
            ));
        }
        let path = record_path(record_id);
        let query = vec![("email".to_string(), email.to_string())];
        let response = self
            .send(Operation::Remove, Method::Delete, &path, query, None)
            .await?;
        let status = response.status;
        match read_envelope::<Value>(&response)? {
            ApiResponse::Ok(_) => Ok(()),
            ApiResponse::Err(kind, reason) => Err(refusal(Operation::Remove, status, kind, reason)),
        }
    }
}

// ---------------------------------------------------------------------------
// Response decoding
// ---------------------------------------------------------------------------

fn record_path(record_id: &str) -> String {
    format!("{VOLUNTEER_PATH}/{}", record_id.trim())
}

fn encode<B: serde::Serialize>(body: &B) -> Result<String, SignupError> {
    serde_json::to_string(body).map_err(|err| {
        log::error!("could not encode request body: {err}");
        SignupError::validation(GENERIC_FAILURE)
    })
}

/// Decodes the response body into a tagged envelope. Only protocol problems
/// (non-JSON, malformed JSON, wrong payload shape) are errors here; a
/// well-formed refusal comes back as `ApiResponse::Err`.
fn read_envelope<T: DeserializeOwned>(
    response: &HttpResponse,
) -> Result<ApiResponse<Option<T>>, SignupError> {
    let status = response.status;
    if response.is_success() && response.body.trim().is_empty() {
        return Ok(ApiResponse::Ok(None));
    }
    if !response.is_json() {
        log::error!(
            "volunteer API answered {status} with {:?} instead of JSON: {}",
            response.content_type,
            response.body
        );
        return Err(SignupError::Protocol { status });
    }

    let envelope: Envelope<Value> = serde_json::from_str(&response.body).map_err(|err| {
        log::error!("volunteer API answered {status} with malformed JSON ({err}): {}", response.body);
        SignupError::Protocol { status }
    })?;

    match ApiResponse::from_envelope(status, envelope) {
        ApiResponse::Ok(None) => Ok(ApiResponse::Ok(None)),
        ApiResponse::Ok(Some(data)) => serde_json::from_value(data)
            .map(|data| ApiResponse::Ok(Some(data)))
            .map_err(|err| {
                log::error!("volunteer API payload did not match the expected shape: {err}");
                SignupError::Protocol { status }
            }),
        ApiResponse::Err(kind, reason) => Ok(ApiResponse::Err(kind, reason)),
    }
}

/// Lists tolerate `success: false` and a missing `data` on a 2xx by
/// returning an empty roster.
fn read_list<T: DeserializeOwned>(response: &HttpResponse) -> Result<Vec<T>, SignupError> {
    match read_envelope::<Vec<T>>(response)? {
        ApiResponse::Ok(records) => Ok(records.unwrap_or_default()),
        ApiResponse::Err(ApiErrorKind::Unsuccessful, reason) => {
            log::warn!("roster request unsuccessful: {}", reason.unwrap_or_default());
            Ok(Vec::new())
        }
        ApiResponse::Err(kind, reason) => {
            Err(refusal(Operation::List, response.status, kind, reason))
        }
    }
}

fn refusal(
    operation: Operation,
    status: u16,
    kind: ApiErrorKind,
    reason: Option<String>,
) -> SignupError {
    let mutating = matches!(operation, Operation::Update | Operation::Remove);
    match kind {
        ApiErrorKind::Status(401 | 403) if mutating => {
            SignupError::OwnershipMismatch(reason.unwrap_or_else(|| NOT_YOUR_SIGNUP.to_string()))
        }
        ApiErrorKind::Status(status) => SignupError::Remote {
            status,
            message: reason.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
        },
        ApiErrorKind::Unsuccessful => {
            let fallback = match operation {
                Operation::Create => CREATE_UNSUCCESSFUL,
                _ => GENERIC_FAILURE,
            };
            SignupError::Remote {
                status,
                message: reason.unwrap_or_else(|| fallback.to_string()),
            }
        }
    }
}

fn missing_data(status: u16) -> SignupError {
    log::error!("volunteer API answered {status} without the signup record");
    SignupError::Protocol { status }
}
