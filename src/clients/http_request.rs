//! HTTP request types for the Gumroad API client.
//!
//! This module provides the [`ApiRequest`] type and its builder for
//! constructing requests to the Gumroad API.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::clients::errors::InvalidArgumentError;

/// HTTP methods supported by the Gumroad API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET; the payload travels as query parameters.
    Get,
    /// HTTP POST; the payload travels as a JSON body.
    Post,
    /// HTTP PUT; the payload travels as a JSON body.
    Put,
    /// HTTP DELETE; the payload travels as a JSON body.
    Delete,
}

impl HttpMethod {
    /// Status codes that count as success for this method.
    ///
    /// A response outside this set is still returned to the caller; it only
    /// triggers a diagnostic dump.
    #[must_use]
    pub const fn expected_statuses(self) -> &'static [u16] {
        match self {
            Self::Get | Self::Put => &[200],
            // Gumroad answers most creates with 200.
            Self::Post => &[200, 201],
            Self::Delete => &[204],
        }
    }

    /// Returns `true` if `code` is an expected status for this method.
    #[must_use]
    pub fn is_expected_status(self, code: u16) -> bool {
        self.expected_statuses().contains(&code)
    }

    /// Returns `true` if the payload is sent as a JSON body.
    #[must_use]
    pub const fn sends_json_body(self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

impl FromStr for HttpMethod {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(InvalidArgumentError::InvalidMethod {
                method: s.to_string(),
            }),
        }
    }
}

/// Returns the JSON type name of a value, for error messages.
#[must_use]
pub const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}

/// A request to be sent to the Gumroad API.
///
/// `headers` and `payload` are kept as loose JSON values so that callers
/// assembling requests from dynamic data get an
/// [`InvalidArgumentError`] rather than a panic when either is not a mapping.
/// Use [`ApiRequest::builder`] for the common case.
///
/// # Example
///
/// ```rust
/// use gumroad_api::clients::{ApiRequest, HttpMethod};
/// use serde_json::json;
///
/// let request = ApiRequest::builder(HttpMethod::Post, "/products/abc/offer_codes")
///     .param("name", "SUMMER")
///     .param("amount_off", 500)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.payload, Some(json!({"name": "SUMMER", "amount_off": 500})));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The endpoint path, appended to the base URI (e.g., "/products").
    pub path: String,
    /// Headers overriding the client defaults. Must be a mapping of strings.
    pub headers: Option<Value>,
    /// Payload fields merged over the authentication payload. Must be a mapping.
    pub payload: Option<Value>,
}

impl ApiRequest {
    /// Creates a new builder for constructing an `ApiRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> ApiRequestBuilder {
        ApiRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] if `headers` is not a mapping of
    /// strings or `payload` is not a mapping.
    pub fn verify(&self) -> Result<(), InvalidArgumentError> {
        self.header_overrides()?;
        self.payload_overrides()?;
        Ok(())
    }

    /// Returns the caller header overrides as a validated mapping.
    ///
    /// # Errors
    ///
    /// See [`ApiRequest::verify`].
    pub fn header_overrides(&self) -> Result<Map<String, Value>, InvalidArgumentError> {
        let headers = match &self.headers {
            None => return Ok(Map::new()),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(InvalidArgumentError::HeadersNotMapping {
                    found: json_type_name(other),
                })
            }
        };

        if let Some((name, value)) = headers.iter().find(|(_, v)| !v.is_string()) {
            return Err(InvalidArgumentError::HeaderValueNotString {
                name: name.clone(),
                found: json_type_name(value),
            });
        }

        Ok(headers.clone())
    }

    /// Returns the caller payload overrides as a validated mapping.
    ///
    /// # Errors
    ///
    /// See [`ApiRequest::verify`].
    pub fn payload_overrides(&self) -> Result<Map<String, Value>, InvalidArgumentError> {
        match &self.payload {
            None => Ok(Map::new()),
            Some(Value::Object(map)) => Ok(map.clone()),
            Some(other) => Err(InvalidArgumentError::PayloadNotMapping {
                found: json_type_name(other),
            }),
        }
    }
}

/// Builder for constructing [`ApiRequest`] instances.
#[derive(Debug)]
pub struct ApiRequestBuilder {
    http_method: HttpMethod,
    path: String,
    headers: Option<Value>,
    payload: Option<Value>,
}

impl ApiRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            headers: None,
            payload: None,
        }
    }

    /// Sets all header overrides at once.
    #[must_use]
    pub fn headers(mut self, headers: Value) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Adds a single header override.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        insert_field(&mut self.headers, name.into(), Value::String(value.into()));
        self
    }

    /// Sets the whole payload at once.
    #[must_use]
    pub fn payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Adds a single payload field.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        insert_field(&mut self.payload, key.into(), value.into());
        self
    }

    /// Builds the [`ApiRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] if the request fails validation.
    pub fn build(self) -> Result<ApiRequest, InvalidArgumentError> {
        let request = ApiRequest {
            http_method: self.http_method,
            path: self.path,
            headers: self.headers,
            payload: self.payload,
        };
        request.verify()?;
        Ok(request)
    }
}

/// Inserts into an optional JSON object, replacing a non-object value.
fn insert_field(target: &mut Option<Value>, key: String, value: Value) {
    match target {
        Some(Value::Object(map)) => {
            map.insert(key, value);
        }
        _ => {
            let mut map = Map::new();
            map.insert(key, value);
            *target = Some(Value::Object(map));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_http_method_parses_case_insensitively() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Post".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert_eq!("PUT".parse::<HttpMethod>().unwrap(), HttpMethod::Put);
        assert_eq!("delete".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
    }

    #[test]
    fn test_unsupported_method_is_invalid_argument() {
        let result = "PATCH".parse::<HttpMethod>();
        assert!(matches!(
            result,
            Err(InvalidArgumentError::InvalidMethod { method }) if method == "PATCH"
        ));
    }

    #[test]
    fn test_expected_statuses_per_method() {
        assert!(HttpMethod::Get.is_expected_status(200));
        assert!(!HttpMethod::Get.is_expected_status(201));
        assert!(HttpMethod::Post.is_expected_status(200));
        assert!(HttpMethod::Post.is_expected_status(201));
        assert!(HttpMethod::Put.is_expected_status(200));
        assert!(HttpMethod::Delete.is_expected_status(204));
        assert!(!HttpMethod::Delete.is_expected_status(200));
    }

    #[test]
    fn test_only_get_sends_query_parameters() {
        assert!(!HttpMethod::Get.sends_json_body());
        assert!(HttpMethod::Post.sends_json_body());
        assert!(HttpMethod::Put.sends_json_body());
        assert!(HttpMethod::Delete.sends_json_body());
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = ApiRequest::builder(HttpMethod::Get, "/products")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.path, "/products");
        assert!(request.headers.is_none());
        assert!(request.payload.is_none());
    }

    #[test]
    fn test_builder_accumulates_params_and_headers() {
        let request = ApiRequest::builder(HttpMethod::Get, "/sales")
            .param("page", 2)
            .param("email", "buyer@example.com")
            .header("X-Trace", "abc")
            .build()
            .unwrap();

        assert_eq!(
            request.payload,
            Some(json!({"page": 2, "email": "buyer@example.com"}))
        );
        assert_eq!(request.headers, Some(json!({"X-Trace": "abc"})));
    }

    #[test]
    fn test_param_replaces_non_mapping_payload() {
        let request = ApiRequest::builder(HttpMethod::Get, "/sales")
            .payload(json!([1, 2]))
            .param("page", 1)
            .build()
            .unwrap();

        assert_eq!(request.payload, Some(json!({"page": 1})));
    }

    #[test]
    fn test_verify_rejects_non_mapping_headers() {
        let result = ApiRequest::builder(HttpMethod::Get, "/products")
            .headers(json!("User-Agent: test"))
            .build();

        assert!(matches!(
            result,
            Err(InvalidArgumentError::HeadersNotMapping { found: "string" })
        ));
    }

    #[test]
    fn test_verify_rejects_non_string_header_value() {
        let result = ApiRequest::builder(HttpMethod::Get, "/products")
            .headers(json!({"X-Count": 3}))
            .build();

        assert!(matches!(
            result,
            Err(InvalidArgumentError::HeaderValueNotString { name, found: "number" }) if name == "X-Count"
        ));
    }

    #[test]
    fn test_verify_rejects_non_mapping_payload() {
        let request = ApiRequest {
            http_method: HttpMethod::Post,
            path: "/products".to_string(),
            headers: None,
            payload: Some(json!(["access_token"])),
        };

        assert!(matches!(
            request.verify(),
            Err(InvalidArgumentError::PayloadNotMapping { found: "array" })
        ));
    }

    #[test]
    fn test_json_type_names() {
        assert_eq!(json_type_name(&Value::Null), "null");
        assert_eq!(json_type_name(&json!(true)), "boolean");
        assert_eq!(json_type_name(&json!(1.5)), "number");
        assert_eq!(json_type_name(&json!({})), "mapping");
    }
}
