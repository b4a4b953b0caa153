//! Integration tests for client configuration and credential loading.

use std::time::Duration;

use gumroad_api::{ClientConfig, ConfigError, Credentials, GumroadClient, GumroadError};

fn write_secrets(name: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!(
        "gumroad-api-rust-{}-{name}.json",
        std::process::id()
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_client_from_secrets_file() {
    let path = write_secrets(
        "valid",
        r#"{"gumroad": {"host": "api.gumroad.com", "token": "file-token"}}"#,
    );

    let client = GumroadClient::from_secrets_file(&path, ClientConfig::default()).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(client.http_client().base_uri(), "https://api.gumroad.com");
}

#[test]
fn test_missing_token_in_secrets_file() {
    let path = write_secrets("no-token", r#"{"gumroad": {"host": "api.gumroad.com"}}"#);

    let result = GumroadClient::from_secrets_file(&path, ClientConfig::default());
    std::fs::remove_file(&path).unwrap();

    assert!(matches!(
        result,
        Err(GumroadError::Config(ConfigError::MissingRequiredField { field: "token" }))
    ));
}

#[test]
fn test_missing_secrets_file() {
    let result = Credentials::from_file("/nonexistent/gumroad_secrets.json");
    assert!(matches!(result, Err(ConfigError::InvalidSecrets { .. })));
}

#[test]
fn test_empty_token_rejected_at_construction() {
    let result = Credentials::new("api.gumroad.com", "   ");
    assert_eq!(result.unwrap_err(), ConfigError::EmptyAccessToken);
}

#[test]
fn test_token_is_masked_in_debug_output() {
    let credentials = Credentials::new("api.gumroad.com", "super-secret").unwrap();
    let debug = format!("{credentials:?}");
    assert!(!debug.contains("super-secret"));
}

#[test]
fn test_explicit_scheme_host_is_used_verbatim() {
    let credentials = Credentials::new("http://127.0.0.1:8080", "token").unwrap();
    let client = GumroadClient::new(credentials, ClientConfig::default()).unwrap();
    assert_eq!(client.http_client().base_uri(), "http://127.0.0.1:8080");
}

#[test]
fn test_config_defaults() {
    let config = ClientConfig::default();

    assert_eq!(config.timeout(), Duration::from_secs(30));
    assert_eq!(config.max_attempts(), 3);
    assert_eq!(config.max_results_per_page(), 10);
    assert!(config.verify_tls());
    assert_eq!(config.base_path(), "/v2");
    assert!(config.user_agent().starts_with("gumroad-api-rust-v"));
}

#[test]
fn test_config_builder_rejects_zero_attempts() {
    let result = ClientConfig::builder().max_attempts(0).build();
    assert!(matches!(
        result,
        Err(ConfigError::InvalidSetting { field: "max_attempts", .. })
    ));
}

#[test]
fn test_config_flows_into_dispatcher() {
    let config = ClientConfig::builder()
        .base_path("v3/")
        .max_attempts(7)
        .user_agent("my-app/1.0")
        .build()
        .unwrap();
    let credentials = Credentials::new("api.gumroad.com", "token").unwrap();
    let client = GumroadClient::new(credentials, config).unwrap();

    let http = client.http_client();
    assert_eq!(http.base_path(), "/v3");
    assert_eq!(http.retry_policy().max_attempts, 7);
    assert_eq!(
        http.default_headers().get("User-Agent"),
        Some(&"my-app/1.0".to_string())
    );
}
