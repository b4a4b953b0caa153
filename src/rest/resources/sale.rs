//! Sale resource and sales pagination.
//!
//! - `GET /sales` (paged with the `page` parameter)
//! - `GET /sales/{id}`
//!
//! The server returns a fixed number of sales per page and a non-null
//! `next_page_url` while more pages remain.
//! [`GumroadClient::retrieve_all_sales`] follows pages in order until that
//! field is absent or null.
//!
//! # Example
//!
//! ```rust,ignore
//! use gumroad_api::rest::resources::SaleListParams;
//!
//! let params = SaleListParams {
//!     after: Some("2024-01-01".to_string()),
//!     ..Default::default()
//! };
//! let sales = client.retrieve_all_sales(Some(&params), 1).await?;
//! println!("{} sales", sales.unwrap_or_default().len());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::HttpMethod;
use crate::rest::client::encode_params;
use crate::rest::{ApiOutcome, Envelope, GumroadClient, GumroadError};

/// The page sales listings start at.
pub const FIRST_PAGE: u32 = 1;

/// A sale made by the authenticated seller.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Sale {
    /// The unique identifier of the sale.
    #[serde(default)]
    pub id: Option<String>,

    /// The buyer's email address.
    #[serde(default)]
    pub email: Option<String>,

    /// The purchased product's identifier.
    #[serde(default)]
    pub product_id: Option<String>,

    /// The purchased product's name.
    #[serde(default)]
    pub product_name: Option<String>,

    /// The price paid in the smallest currency unit.
    #[serde(default)]
    pub price: Option<i64>,

    /// The total formatted for display.
    #[serde(default)]
    pub formatted_total_price: Option<String>,

    /// Creation timestamp as returned by the API.
    #[serde(default)]
    pub created_at: Option<String>,

    /// Whether the sale was refunded.
    #[serde(default)]
    pub refunded: Option<bool>,

    /// Fields not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Filters for listing sales.
///
/// Dates use the `YYYY-MM-DD` form the API expects.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct SaleListParams {
    /// Only sales after this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,

    /// Only sales before this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,

    /// Only sales of this product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    /// Only sales to this buyer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Only the sale with this order number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

/// One page of a sales listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesPage {
    /// The page number that was requested.
    pub page: u32,
    /// The sales on this page.
    pub sales: Vec<Sale>,
    /// The server's link to the next page, if any.
    pub next_page_url: Option<String>,
}

impl SalesPage {
    /// Returns `true` if the server reported another page.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.next_page_url.is_some()
    }
}

impl GumroadClient {
    /// Retrieves one page of sales.
    ///
    /// `params` is not modified; the page number is added to a copy.
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError`] if the request cannot be delivered or the
    /// response is not a Gumroad envelope.
    pub async fn retrieve_sales(
        &self,
        params: Option<&SaleListParams>,
        page: u32,
    ) -> Result<ApiOutcome<Vec<Sale>>, GumroadError> {
        self.fetch_sales_page(params, page)
            .await?
            .into_outcome("sales", "Unable to retrieve sales.")
    }

    /// Retrieves one page of sales together with its pagination link.
    ///
    /// A successful page without sales yields a [`SalesPage`] with an empty
    /// `sales` list.
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError`] if the request cannot be delivered or the
    /// response is not a Gumroad envelope.
    pub async fn retrieve_sales_page(
        &self,
        params: Option<&SaleListParams>,
        page: u32,
    ) -> Result<ApiOutcome<SalesPage>, GumroadError> {
        let envelope = self.fetch_sales_page(params, page).await?;
        let next_page_url = envelope.next_page_url().map(String::from);

        let sales = match envelope.into_outcome::<Vec<Sale>>("sales", "Unable to retrieve sales.")? {
            ApiOutcome::Success(sales) => sales,
            ApiOutcome::Empty => Vec::new(),
            ApiOutcome::Failed(message) => return Ok(ApiOutcome::Failed(message)),
        };

        Ok(ApiOutcome::Success(SalesPage {
            page,
            sales,
            next_page_url,
        }))
    }

    /// Retrieves one sale.
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError`] if the request cannot be delivered or the
    /// response is not a Gumroad envelope.
    pub async fn retrieve_sale(&self, sale_id: &str) -> Result<ApiOutcome<Sale>, GumroadError> {
        self.call(HttpMethod::Get, &format!("/sales/{sale_id}"), None)
            .await?
            .into_outcome("sale", "Unable to retrieve the sale.")
    }

    /// Retrieves every sale from `start_page` onwards.
    ///
    /// Pages are requested one at a time, in order, and their sales are
    /// concatenated. The loop ends on the first page whose `next_page_url`
    /// is absent or null.
    ///
    /// A page reporting `success: false` ends the loop and the whole call
    /// yields [`ApiOutcome::Failed`], tagged with the page number. When no
    /// page carries any sale the result is [`ApiOutcome::Empty`].
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError::PaginationLimitExceeded`] if the server still
    /// reports a next page after the configured `max_pages` pages or past
    /// page `u32::MAX`, and any error of an individual page request.
    pub async fn retrieve_all_sales(
        &self,
        params: Option<&SaleListParams>,
        start_page: u32,
    ) -> Result<ApiOutcome<Vec<Sale>>, GumroadError> {
        let max_pages = self.config().max_pages();
        let mut all_sales = Vec::new();
        let mut page = start_page;
        let mut fetched: u32 = 0;

        loop {
            let envelope = self.fetch_sales_page(params, page).await?;
            let has_next = envelope.has_next_page();
            fetched += 1;

            let sales = match envelope.into_outcome::<Vec<Sale>>("sales", "Unable to retrieve sales.")? {
                ApiOutcome::Success(sales) => sales,
                ApiOutcome::Empty => Vec::new(),
                ApiOutcome::Failed(message) => {
                    return Ok(ApiOutcome::Failed(format!("page {page}: {message}")));
                }
            };

            tracing::debug!(
                "Fetched sales page {} with {} sales (page size {})",
                page,
                sales.len(),
                self.config().max_results_per_page()
            );
            all_sales.extend(sales);

            if !has_next {
                break;
            }
            let next_page = page.checked_add(1).filter(|_| fetched < max_pages);
            let Some(next_page) = next_page else {
                tracing::error!(
                    "Sales pagination still reports a next page after {} pages (last page {})",
                    fetched,
                    page
                );
                return Err(GumroadError::PaginationLimitExceeded { pages: fetched });
            };
            page = next_page;
        }

        if all_sales.is_empty() {
            Ok(ApiOutcome::Empty)
        } else {
            Ok(ApiOutcome::Success(all_sales))
        }
    }

    async fn fetch_sales_page(
        &self,
        params: Option<&SaleListParams>,
        page: u32,
    ) -> Result<Envelope, GumroadError> {
        let mut payload = match params {
            Some(params) => encode_params(params)?,
            None => Value::Object(Map::new()),
        };
        if let Value::Object(fields) = &mut payload {
            fields.insert("page".to_string(), Value::from(page));
        }

        self.call(HttpMethod::Get, "/sales", Some(payload)).await
    }
}
