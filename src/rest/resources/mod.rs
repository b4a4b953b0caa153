//! Gumroad REST resources.
//!
//! Each module defines the typed records of one resource and adds its
//! accessors to [`GumroadClient`](crate::rest::GumroadClient).
//!
//! # Available Resources
//!
//! | Resource | Accessors |
//! |---|---|
//! | [`Product`] | `retrieve_all_products`, `retrieve_product_info` |
//! | [`OfferCode`] | `retrieve_offer_codes_for_product`, `retrieve_offer_code_details_for_product`, `create_offer_code_for_product`, `update_offer_code_for_product`, `delete_offer_code_for_product`, `retrieve_all_offer_code_names_for_a_product`, `generate_new_offer_code_for_a_product` |
//! | [`Sale`] | `retrieve_sales`, `retrieve_sales_page`, `retrieve_sale`, `retrieve_all_sales` |
//!
//! Typed records keep any field they do not model in an `extra` map, so
//! new API fields are never lost.

mod offer_code;
mod product;
mod sale;

pub use offer_code::{OfferCode, OfferCodeParams, OfferCodeUpdate, OfferType};
pub use product::Product;
pub use sale::{Sale, SaleListParams, SalesPage, FIRST_PAGE};
