//! HTTP response types for the Gumroad API client.
//!
//! This module provides the [`HttpResponse`] type along with
//! [`status_description`], a plain-text lookup of HTTP status codes used in
//! diagnostics.

use std::collections::HashMap;

/// An HTTP response from the Gumroad API.
///
/// Responses are transient: the dispatcher hands them to the caller and
/// keeps no copy.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Creates an `HttpResponse` from raw body text.
    ///
    /// An empty body becomes `{}`. A body that is not valid JSON is kept as
    /// `{"raw_body": "..."}` so it still shows up in diagnostics.
    #[must_use]
    pub fn from_text(code: u16, headers: HashMap<String, Vec<String>>, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| serde_json::json!({ "raw_body": text }))
        };

        Self::new(code, headers, body)
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the plain-text description of this response's status code.
    #[must_use]
    pub const fn status_text(&self) -> &'static str {
        status_description(self.code)
    }
}

/// Returns a plain-text description of an HTTP status code.
///
/// Unknown codes map to `"NA"`.
///
/// # Example
///
/// ```rust
/// use gumroad_api::clients::status_description;
///
/// assert_eq!(status_description(404), "Client Error: Not Found");
/// assert_eq!(status_description(999), "NA");
/// ```
#[must_use]
pub const fn status_description(code: u16) -> &'static str {
    match code {
        200 => "OK",
        201 => "OK: Created",
        202 => "OK: Accepted",
        203 => "OK: Non-Authoritative Information",
        204 => "OK: No Content",
        205 => "OK: Reset Content",
        206 => "OK: Partial Content",
        207 => "OK: Multi-Status",
        208 => "OK: Already Reported",
        226 => "OK: IM Used",
        300 => "Redirected: Multiple Choices",
        301 => "Redirected: Moved Permanently",
        302 => "Redirected: Found",
        303 => "Redirected: See Other",
        304 => "Redirected: Not Modified",
        305 => "Redirected: Use Proxy",
        306 => "Redirected: Switch Proxy",
        307 => "Redirected: Temporary Redirect",
        308 => "Redirected: Permanent Redirect",
        400 => "Client Error: Bad Request",
        401 => "Client Error: Unauthorized",
        402 => "Client Error: Payment Required",
        403 => "Client Error: Forbidden",
        404 => "Client Error: Not Found",
        405 => "Client Error: Method Not Allowed",
        406 => "Client Error: Not Acceptable",
        407 => "Client Error: Proxy Authentication Required",
        408 => "Client Error: Request Timeout",
        409 => "Client Error: Conflict",
        410 => "Client Error: Gone",
        411 => "Client Error: Length Required",
        412 => "Client Error: Precondition Failed",
        413 => "Client Error: Payload Too Large",
        414 => "Client Error: URI Too Large",
        415 => "Client Error: Unsupported Media Type",
        416 => "Client Error: Range Not Satisfiable",
        417 => "Client Error: Expectation Failed",
        418 => "Client Error: I'm a teapot",
        421 => "Client Error: Misdirected Request",
        422 => "Client Error: Un-processable Entity",
        423 => "Client Error: Locked",
        424 => "Client Error: Failed Dependency",
        426 => "Client Error: Upgrade Required",
        428 => "Client Error: Precondition Required",
        429 => "Client Error: Too Many Requests",
        431 => "Client Error: Request Header Fields Too Large",
        440 => "Client Error: Login Time-Out",
        444 => "Client Error: No Response",
        449 => "Client Error: Retry With",
        451 => "Client Error: Unavailable For Legal Reasons",
        495 => "Client Error: SSL Certificate Error",
        496 => "Client Error: SSL Certificate Required",
        497 => "Client Error: HTTP Request Sent to HTTPS Port",
        499 => "Client Error: Client Closed Request",
        500 => "Server Error: Internal Server Error",
        501 => "Server Error: Not Implemented",
        502 => "Server Error: Bad Gateway",
        503 => "Server Error: Service Unavailable",
        504 => "Server Error: Gateway Timeout",
        505 => "Server Error: HTTP Version Not Supported",
        507 => "Server Error: Insufficient Storage",
        508 => "Server Error: Loop Detected",
        510 => "Server Error: Not Extended",
        511 => "Server Error: Network Authentication Required",
        520 => "Server Error: Unknown Error when connecting to server behind load balancer",
        521 => "Server Error: Web Server behind load balancer is down",
        522 => "Server Error: Connection Timed Out to server behind load balancer",
        523 => "Server Error: Server behind load balancer is unreachable",
        524 => "Server Error: TCP handshake with server behind load balancer completed but timed out",
        525 => "Server Error: Load balancer could not negotiate a SSL/TLS handshake with server behind load balancer",
        526 => "Server Error: Server behind load balancer returned invalid SSL/TLS cert to load balancer",
        527 => "Server Error: Load balancer request timed out/failed after WAN connection was established to origin server",
        _ => "NA",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_text_parses_json_body() {
        let response = HttpResponse::from_text(200, HashMap::new(), r#"{"success": true}"#);
        assert_eq!(response.body, json!({"success": true}));
    }

    #[test]
    fn test_from_text_empty_body_is_empty_object() {
        let response = HttpResponse::from_text(204, HashMap::new(), "");
        assert_eq!(response.body, json!({}));
    }

    #[test]
    fn test_from_text_keeps_non_json_body() {
        let response = HttpResponse::from_text(502, HashMap::new(), "<html>Bad Gateway</html>");
        assert_eq!(response.body, json!({"raw_body": "<html>Bad Gateway</html>"}));
    }

    #[test]
    fn test_is_ok_range() {
        assert!(HttpResponse::new(200, HashMap::new(), json!({})).is_ok());
        assert!(HttpResponse::new(204, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(302, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(404, HashMap::new(), json!({})).is_ok());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), vec!["application/json".to_string()]);
        let response = HttpResponse::new(200, headers, json!({}));

        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn test_status_descriptions() {
        assert_eq!(status_description(200), "OK");
        assert_eq!(status_description(201), "OK: Created");
        assert_eq!(status_description(429), "Client Error: Too Many Requests");
        assert_eq!(status_description(503), "Server Error: Service Unavailable");
        assert_eq!(status_description(0), "NA");
        assert_eq!(
            HttpResponse::new(401, HashMap::new(), json!({})).status_text(),
            "Client Error: Unauthorized"
        );
    }
}
