//! Resource accessors for the Gumroad API.
//!
//! This module sits on top of the [`clients`](crate::clients) dispatcher:
//!
//! - **[`GumroadClient`]**: one async method per API resource action
//! - **[`Envelope`]**: the parsed `{success, ...}` response wrapper
//! - **[`ApiOutcome<T>`]**: `Success`, `Failed` or `Empty` accessor results
//! - **[`GumroadError`]**: errors the caller cannot continue from
//! - **[`resources`]**: typed records (`Product`, `OfferCode`, `Sale`) and
//!   their parameters
//!
//! # Example
//!
//! ```rust,ignore
//! use gumroad_api::{ClientConfig, Credentials, GumroadClient};
//! use gumroad_api::rest::ApiOutcome;
//!
//! let client = GumroadClient::new(
//!     Credentials::from_default_file()?,
//!     ClientConfig::default(),
//! )?;
//!
//! match client.retrieve_product_info("product-id").await? {
//!     ApiOutcome::Success(product) => println!("{:?}", product.name),
//!     ApiOutcome::Failed(message) => eprintln!("Gumroad said: {message}"),
//!     ApiOutcome::Empty => println!("no such product"),
//! }
//!
//! let sales = client.retrieve_all_sales(None, 1).await?.unwrap_or_default();
//! ```

mod client;
mod envelope;
mod errors;
mod offer_code_generator;
pub mod resources;

pub use client::GumroadClient;
pub use envelope::{ApiOutcome, Envelope};
pub use errors::GumroadError;
pub use offer_code_generator::{
    generate_unique_offer_code, random_offer_code, DEFAULT_OFFER_CODE_LENGTH, OFFER_CODE_ALPHABET,
};
