//! Typed calls against the BrightPath backend.
//!
//! Every function takes the shared [`Client`] and validates its required
//! inputs before touching the network. Non-2xx responses become
//! [`ApiError::Rejected`] carrying the backend's `detail` verbatim.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::{EnvelopeShape, ShapeError};
use crate::http::{RequestBuilder, Response};
use crate::session::UnknownRole;

pub mod announcements;
pub mod auth;
pub mod parents;
pub mod records;
pub mod results;
pub mod students;
pub mod subjects;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// A required input was empty; nothing was sent.
    #[error("{0}")]
    Validation(String),
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error(transparent)]
    UnknownRole(#[from] UnknownRole),
    #[error("network error: {0}")]
    Network(String),
    #[error("{}", rejected_message(.status, .detail))]
    Rejected { status: u16, detail: Option<String> },
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

fn rejected_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("request failed with status {status}"),
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Body of most mutation responses: `{ success, message }`, both optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageResponse {
    /// The backend's message, or `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(fallback)
            .to_owned()
    }
}

/// Backend ids are integers on some tables and strings on others.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct Id(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Text(String),
}

impl From<RawId> for Id {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(id) => Self(id.to_string()),
            RawId::Text(id) => Self(id),
        }
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed value of a required field.
pub(crate) fn require<'a>(label: &str, value: &'a str) -> ApiResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        Err(ApiError::Validation(format!("{label} is required.")))
    } else {
        Ok(value)
    }
}

pub(crate) fn with_json<B: Serialize>(request: RequestBuilder, body: &B) -> ApiResult<RequestBuilder> {
    request
        .json(body)
        .map_err(|e| ApiError::Parse(format!("failed to serialize request: {e}")))
}

/// Send and turn non-2xx into [`ApiError::Rejected`].
pub(crate) async fn send(request: RequestBuilder) -> ApiResult<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.message))?;

    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Rejected {
            status: response.status,
            detail: detail(&response),
        })
    }
}

/// `detail` of an error body. FastAPI validation errors carry a list there.
fn detail(response: &Response) -> Option<String> {
    match response.json::<Value>().ok()?.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Decode a mutation response. An empty body counts as success without message.
pub(crate) fn message(response: &Response) -> ApiResult<MessageResponse> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(MessageResponse::default());
    }
    response
        .json()
        .map_err(|e| ApiError::Parse(e.to_string()))
}

pub(crate) fn decode<T: DeserializeOwned>(response: &Response) -> ApiResult<T> {
    response
        .json()
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// GET a list endpoint and decode every record of its envelope.
pub(crate) async fn fetch_list<T: DeserializeOwned>(
    request: RequestBuilder,
    shape: &EnvelopeShape,
) -> ApiResult<Vec<T>> {
    let response = send(request).await?;
    let body: Value = decode(&response)?;
    shape
        .extract(body)?
        .into_iter()
        .map(|record| serde_json::from_value(record).map_err(|e| ApiError::Parse(e.to_string())))
        .collect()
}
