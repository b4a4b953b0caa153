//! OfferCode resource.
//!
//! Offer codes are discount codes nested under a product:
//! - `GET /products/{product_id}/offer_codes`
//! - `GET /products/{product_id}/offer_codes/{id}`
//! - `POST /products/{product_id}/offer_codes`
//! - `PUT /products/{product_id}/offer_codes/{id}`
//! - `DELETE /products/{product_id}/offer_codes/{id}`
//!
//! # Example
//!
//! ```rust,ignore
//! use gumroad_api::rest::resources::{OfferCodeParams, OfferType};
//!
//! let name = client
//!     .generate_new_offer_code_for_a_product("product-id", 12, None)
//!     .await?
//!     .ok()
//!     .unwrap_or_default();
//!
//! let params = OfferCodeParams {
//!     name,
//!     amount_off: 25,
//!     offer_type: Some(OfferType::Percent),
//!     max_purchase_count: Some(1),
//!     universal: None,
//! };
//! let created = client.create_offer_code_for_product("product-id", &params).await?;
//! ```

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::HttpMethod;
use crate::rest::client::encode_params;
use crate::rest::offer_code_generator::{generate_unique_offer_code, random_offer_code};
use crate::rest::{ApiOutcome, GumroadClient, GumroadError};

/// How an offer code's `amount_off` is interpreted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OfferType {
    /// `amount_off` is in cents.
    #[default]
    Cents,
    /// `amount_off` is a percentage.
    Percent,
}

/// A discount code attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OfferCode {
    /// The unique identifier of the offer code.
    #[serde(default)]
    pub id: Option<String>,

    /// The code customers enter at checkout.
    #[serde(default)]
    pub name: Option<String>,

    /// Fixed discount in cents, for cents offers.
    #[serde(default)]
    pub amount_cents: Option<i64>,

    /// Percentage discount, for percent offers.
    #[serde(default)]
    pub percent_off: Option<i64>,

    /// Maximum number of purchases, if limited.
    #[serde(default)]
    pub max_purchase_count: Option<i64>,

    /// Whether the code applies to every product of the seller.
    #[serde(default)]
    pub universal: Option<bool>,

    /// Number of times the code has been used.
    #[serde(default)]
    pub times_used: Option<i64>,

    /// Fields not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for creating an offer code.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct OfferCodeParams {
    /// The code customers enter at checkout.
    pub name: String,

    /// Discount amount, in cents or percent depending on `offer_type`.
    pub amount_off: i64,

    /// Defaults to cents on the server side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_type: Option<OfferType>,

    /// Maximum number of purchases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_purchase_count: Option<u32>,

    /// Apply the code to every product of the seller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub universal: Option<bool>,
}

/// Parameters for updating an offer code.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct OfferCodeUpdate {
    /// New maximum number of purchases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_purchase_count: Option<u32>,
}

impl GumroadClient {
    /// Retrieves the offer codes of a product.
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError`] if the request cannot be delivered or the
    /// response is not a Gumroad envelope.
    pub async fn retrieve_offer_codes_for_product(
        &self,
        product_id: &str,
    ) -> Result<ApiOutcome<Vec<OfferCode>>, GumroadError> {
        self.call(HttpMethod::Get, &format!("/products/{product_id}/offer_codes"), None)
            .await?
            .into_outcome(
                "offer_codes",
                &format!("Unable to retrieve all offer codes for product ID: {product_id}"),
            )
    }

    /// Retrieves one offer code of a product.
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError`] if the request cannot be delivered or the
    /// response is not a Gumroad envelope.
    pub async fn retrieve_offer_code_details_for_product(
        &self,
        product_id: &str,
        offer_code_id: &str,
    ) -> Result<ApiOutcome<OfferCode>, GumroadError> {
        self.call(
            HttpMethod::Get,
            &format!("/products/{product_id}/offer_codes/{offer_code_id}"),
            None,
        )
        .await?
        .into_outcome("offer_code", "Unable to retrieve the offer code.")
    }

    /// Creates an offer code for a product.
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError`] if the request cannot be delivered or the
    /// response is not a Gumroad envelope.
    pub async fn create_offer_code_for_product(
        &self,
        product_id: &str,
        params: &OfferCodeParams,
    ) -> Result<ApiOutcome<OfferCode>, GumroadError> {
        let payload = encode_params(params)?;
        self.call(
            HttpMethod::Post,
            &format!("/products/{product_id}/offer_codes"),
            Some(payload),
        )
        .await?
        .into_outcome("offer_code", "Unable to create the offer code.")
    }

    /// Updates an offer code of a product.
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError`] if the request cannot be delivered or the
    /// response is not a Gumroad envelope.
    pub async fn update_offer_code_for_product(
        &self,
        product_id: &str,
        offer_code_id: &str,
        update: &OfferCodeUpdate,
    ) -> Result<ApiOutcome<OfferCode>, GumroadError> {
        let payload = encode_params(update)?;
        self.call(
            HttpMethod::Put,
            &format!("/products/{product_id}/offer_codes/{offer_code_id}"),
            Some(payload),
        )
        .await?
        .into_outcome("offer_code", "Unable to update the offer code.")
    }

    /// Deletes an offer code of a product.
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError`] if the request cannot be delivered or the
    /// response is not a Gumroad envelope.
    pub async fn delete_offer_code_for_product(
        &self,
        product_id: &str,
        offer_code_id: &str,
    ) -> Result<ApiOutcome<()>, GumroadError> {
        let envelope = self
            .call(
                HttpMethod::Delete,
                &format!("/products/{product_id}/offer_codes/{offer_code_id}"),
                None,
            )
            .await?;
        Ok(envelope.into_ack("Unable to delete the offer code."))
    }

    /// Retrieves the names of every offer code of a product.
    ///
    /// Offer codes without a name are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError`] if the request cannot be delivered or the
    /// response is not a Gumroad envelope.
    pub async fn retrieve_all_offer_code_names_for_a_product(
        &self,
        product_id: &str,
    ) -> Result<ApiOutcome<Vec<String>>, GumroadError> {
        let offer_codes = self.retrieve_offer_codes_for_product(product_id).await?;
        Ok(offer_codes.map(|codes| codes.into_iter().filter_map(|code| code.name).collect()))
    }

    /// Generates a random offer-code name not yet used by the product.
    ///
    /// When `current_offer_codes` is `None`, the existing names are fetched
    /// first. An empty fetch result counts as "no names taken".
    ///
    /// Returns [`ApiOutcome::Failed`] when the existing names cannot be
    /// fetched, since uniqueness cannot be checked.
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError::InvalidOfferCodeLength`] for a zero length,
    /// [`GumroadError::OfferCodeSpaceExhausted`] when every name of that
    /// length is taken, and any error of the name fetch.
    pub async fn generate_new_offer_code_for_a_product(
        &self,
        product_id: &str,
        offer_code_length: usize,
        current_offer_codes: Option<&HashSet<String>>,
    ) -> Result<ApiOutcome<String>, GumroadError> {
        let mut rng = StdRng::from_entropy();
        self.generate_new_offer_code_with(product_id, offer_code_length, current_offer_codes, |len| {
            random_offer_code(&mut rng, len)
        })
        .await
    }

    /// Same as [`GumroadClient::generate_new_offer_code_for_a_product`], with
    /// the random draw supplied by the caller.
    ///
    /// # Errors
    ///
    /// See [`GumroadClient::generate_new_offer_code_for_a_product`].
    pub async fn generate_new_offer_code_with<F>(
        &self,
        product_id: &str,
        offer_code_length: usize,
        current_offer_codes: Option<&HashSet<String>>,
        draw: F,
    ) -> Result<ApiOutcome<String>, GumroadError>
    where
        F: FnMut(usize) -> String + Send,
    {
        if offer_code_length == 0 {
            return Err(GumroadError::InvalidOfferCodeLength);
        }

        if let Some(existing) = current_offer_codes {
            return generate_unique_offer_code(existing, offer_code_length, draw).map(ApiOutcome::Success);
        }

        let existing: HashSet<String> = match self
            .retrieve_all_offer_code_names_for_a_product(product_id)
            .await?
        {
            ApiOutcome::Success(names) => names.into_iter().collect(),
            ApiOutcome::Empty => HashSet::new(),
            ApiOutcome::Failed(message) => return Ok(ApiOutcome::Failed(message)),
        };

        generate_unique_offer_code(&existing, offer_code_length, draw).map(ApiOutcome::Success)
    }
}
