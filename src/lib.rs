//! # Gumroad API Rust Client
//!
//! A Rust client for the Gumroad REST API: product catalog, offer codes and
//! sales reporting behind typed, async method calls.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated credentials ([`ApiHost`], [`AccessToken`]) loadable from a
//!   JSON secrets file via [`Credentials`]
//! - A request dispatcher ([`clients::HttpClient`]) that attaches the access
//!   token and retries connection failures and timeouts
//! - Resource accessors on [`GumroadClient`] returning [`ApiOutcome`]
//! - Sales pagination and unique offer-code generation
//!
//! ## Quick Start
//!
//! ```rust
//! use gumroad_api::{ClientConfig, Credentials};
//! use std::time::Duration;
//!
//! let credentials = Credentials::new("api.gumroad.com", "your-access-token").unwrap();
//! let config = ClientConfig::builder()
//!     .timeout(Duration::from_secs(10))
//!     .max_attempts(5)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(credentials.host().base_uri(), "https://api.gumroad.com");
//! assert_eq!(config.max_attempts(), 5);
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use gumroad_api::{ClientConfig, Credentials, GumroadClient};
//!
//! let client = GumroadClient::new(
//!     Credentials::from_file("./gumroad_secrets.json")?,
//!     ClientConfig::default(),
//! )?;
//!
//! let products = client.retrieve_all_products().await?;
//! let sales = client.retrieve_all_sales(None, 1).await?;
//! let code = client
//!     .generate_new_offer_code_for_a_product("product-id", 32, None)
//!     .await?;
//! ```
//!
//! ## Logging
//!
//! Diagnostics (retries, unexpected statuses, `success: false` envelopes,
//! request/response dumps) are emitted through [`tracing`]. The crate never
//! installs a subscriber.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No silent failures**: Reported failures are [`ApiOutcome::Failed`],
//!   never a default value

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{
    AccessToken, ApiHost, ClientConfig, ClientConfigBuilder, Credentials, DEFAULT_SECRETS_FILE,
};
pub use error::ConfigError;

// Re-export dispatcher types
pub use clients::{
    ApiRequest, ApiRequestBuilder, HttpClient, HttpError, HttpMethod, HttpResponse,
    InvalidArgumentError, MaxRetriesExceededError, Transport, TransportError,
};

// Re-export resource accessor types
pub use rest::{ApiOutcome, GumroadClient, GumroadError};
