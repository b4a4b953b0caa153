//! Product resource.
//!
//! - `GET /products`
//! - `GET /products/{id}`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::HttpMethod;
use crate::rest::{ApiOutcome, GumroadClient, GumroadError};

/// A product in the seller's Gumroad catalog.
///
/// Only the commonly used fields are typed; everything else the API returns
/// is kept in [`Product::extra`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Product {
    /// The unique identifier of the product.
    #[serde(default)]
    pub id: Option<String>,

    /// The product name.
    #[serde(default)]
    pub name: Option<String>,

    /// The product description (HTML).
    #[serde(default)]
    pub description: Option<String>,

    /// The price in the smallest currency unit.
    #[serde(default)]
    pub price: Option<i64>,

    /// ISO currency code, lowercase.
    #[serde(default)]
    pub currency: Option<String>,

    /// The short `gum.co` URL.
    #[serde(default)]
    pub short_url: Option<String>,

    /// The price formatted for display (e.g. `"$1"`).
    #[serde(default)]
    pub formatted_price: Option<String>,

    /// Whether the product is published.
    #[serde(default)]
    pub published: Option<bool>,

    /// The custom permalink, if one is set.
    #[serde(default)]
    pub custom_permalink: Option<String>,

    /// Fields not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GumroadClient {
    /// Retrieves every product of the authenticated seller.
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError`] if the request cannot be delivered or the
    /// response is not a Gumroad envelope.
    pub async fn retrieve_all_products(&self) -> Result<ApiOutcome<Vec<Product>>, GumroadError> {
        self.call(HttpMethod::Get, "/products", None)
            .await?
            .into_outcome("products", "Unable to retrieve all product info.")
    }

    /// Retrieves one product.
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError`] if the request cannot be delivered or the
    /// response is not a Gumroad envelope.
    pub async fn retrieve_product_info(&self, product_id: &str) -> Result<ApiOutcome<Product>, GumroadError> {
        self.call(HttpMethod::Get, &format!("/products/{product_id}"), None)
            .await?
            .into_outcome("product", "Unable to retrieve product info.")
    }
}
