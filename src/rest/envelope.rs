//! The Gumroad response envelope and the tagged accessor result.
//!
//! Every Gumroad response wraps its payload as
//! `{"success": bool, "<resource_key>": ..., "next_page_url"?: ..., "message"?: ...}`.
//! [`Envelope`] parses that wrapper; [`ApiOutcome`] is what accessors hand
//! back to callers.
//!
//! # Outcomes
//!
//! | Envelope | Outcome |
//! |---|---|
//! | `success: true`, key holds data | [`ApiOutcome::Success`] |
//! | `success: true`, key missing, `null`, `[]` or `{}` | [`ApiOutcome::Empty`] |
//! | `success: false` | [`ApiOutcome::Failed`] with the server message |
//!
//! A reported failure is never an `Err`. Callers who only want the legacy
//! "default value on failure" behavior can call
//! [`ApiOutcome::unwrap_or_default`].

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::clients::{json_type_name, HttpResponse};
use crate::rest::GumroadError;

/// Result of a resource accessor.
///
/// # Example
///
/// ```rust
/// use gumroad_api::rest::ApiOutcome;
///
/// let failed: ApiOutcome<Vec<u32>> = ApiOutcome::Failed("Unauthorized".to_string());
/// assert!(failed.is_failed());
/// assert_eq!(failed.unwrap_or_default(), Vec::<u32>::new());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiOutcome<T> {
    /// The request succeeded and returned data.
    Success(T),
    /// The server reported `success: false`.
    Failed(String),
    /// The request succeeded but carried no data.
    Empty,
}

impl<T> ApiOutcome<T> {
    /// Returns `true` for [`ApiOutcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for [`ApiOutcome::Failed`].
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns `true` for [`ApiOutcome::Empty`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the data, if any.
    #[must_use]
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failed(_) | Self::Empty => None,
        }
    }

    /// Returns the failure message, if the server reported one.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            Self::Success(_) | Self::Empty => None,
        }
    }

    /// Maps the data of a successful outcome.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiOutcome<U> {
        match self {
            Self::Success(data) => ApiOutcome::Success(f(data)),
            Self::Failed(message) => ApiOutcome::Failed(message),
            Self::Empty => ApiOutcome::Empty,
        }
    }

    /// Returns the data, or `T::default()` when failed or empty.
    #[must_use]
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.ok().unwrap_or_default()
    }
}

/// A parsed Gumroad response envelope.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    status: u16,
    success: bool,
    message: Option<String>,
    next_page_url: Option<String>,
    fields: Map<String, Value>,
}

impl Envelope {
    /// Parses the envelope out of a response body.
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError::MalformedResponse`] if the body is not a JSON
    /// object with a boolean `success` field. An empty `204 No Content` body
    /// counts as success.
    pub fn from_response(response: &HttpResponse) -> Result<Self, GumroadError> {
        let Value::Object(fields) = &response.body else {
            return Err(GumroadError::MalformedResponse {
                status: response.code,
                reason: format!("expected a JSON object, found {}", json_type_name(&response.body)),
            });
        };

        if response.code == 204 && fields.is_empty() {
            return Ok(Self {
                status: response.code,
                success: true,
                message: None,
                next_page_url: None,
                fields: Map::new(),
            });
        }

        let success = fields
            .get("success")
            .and_then(Value::as_bool)
            .ok_or_else(|| GumroadError::MalformedResponse {
                status: response.code,
                reason: "missing boolean 'success' field".to_string(),
            })?;

        let message = fields.get("message").and_then(Value::as_str).map(String::from);

        let next_page_url = match fields.get("next_page_url") {
            None | Some(Value::Null) => None,
            Some(Value::String(url)) => Some(url.clone()),
            Some(other) => Some(other.to_string()),
        };

        Ok(Self {
            status: response.code,
            success,
            message,
            next_page_url,
            fields: fields.clone(),
        })
    }

    /// Returns the HTTP status the envelope arrived with.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the envelope's `success` flag.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.success
    }

    /// Returns the server's `message`, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the non-null `next_page_url`, if any.
    #[must_use]
    pub fn next_page_url(&self) -> Option<&str> {
        self.next_page_url.as_deref()
    }

    /// Returns `true` if the server reported another page.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.next_page_url.is_some()
    }

    /// Returns a raw envelope field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Projects the field `key` into an outcome.
    ///
    /// `failure` describes the operation and is logged when the server
    /// reports `success: false`.
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError::MalformedResponse`] if the field is present
    /// but does not deserialize into `T`.
    pub fn into_outcome<T: DeserializeOwned>(
        self,
        key: &str,
        failure: &str,
    ) -> Result<ApiOutcome<T>, GumroadError> {
        if !self.success {
            return Ok(self.into_failure(failure));
        }

        let status = self.status;
        let mut fields = self.fields;
        let value = match fields.remove(key) {
            None | Some(Value::Null) => return Ok(ApiOutcome::Empty),
            Some(Value::Array(items)) if items.is_empty() => return Ok(ApiOutcome::Empty),
            Some(Value::Object(map)) if map.is_empty() => return Ok(ApiOutcome::Empty),
            Some(value) => value,
        };

        serde_json::from_value(value)
            .map(ApiOutcome::Success)
            .map_err(|e| GumroadError::MalformedResponse {
                status,
                reason: format!("unable to decode '{key}': {e}"),
            })
    }

    /// Reduces an envelope without a resource payload to an acknowledgement.
    #[must_use]
    pub fn into_ack(self, failure: &str) -> ApiOutcome<()> {
        if self.success {
            ApiOutcome::Success(())
        } else {
            self.into_failure(failure)
        }
    }

    fn into_failure<T>(self, failure: &str) -> ApiOutcome<T> {
        let message = self.message.unwrap_or_else(|| failure.to_string());
        tracing::warn!("{} Server said: {} (HTTP {})", failure, message, self.status);
        ApiOutcome::Failed(message)
    }
}
