//! WooCommerce catalog access.
//!
//! The pipelines only see the [`PageSource`] and [`CatalogWriter`] traits;
//! [`WooCommerceApi`] is the HTTP implementation of both.

mod client;
mod pagination;

use reqwest::blocking::Client;

use crate::config::Config;
use crate::error::Result;
use crate::models::{ImagePatch, Product, ResourceId};

pub use pagination::{fetch_all_products, fetch_limited, PageWalker};

/// One page of a product listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number that was requested
    pub number: u32,
    pub products: Vec<Product>,
    /// Total page count as reported by this response
    pub total_pages: u32,
    /// Total product count as reported by this response
    pub total_items: u64,
}

/// Anything that can return one page of the product listing
pub trait PageSource {
    /// Fetches `page` (1-based) with `per_page` products per page
    fn fetch_page(&self, page: u32, per_page: u32) -> Result<Page>;

    /// Page size used for a full walk
    fn page_size(&self) -> u32;
}

/// Anything that can replace the image metadata of a product
pub trait CatalogWriter {
    fn update_images(&self, product_id: &ResourceId, images: &[ImagePatch]) -> Result<()>;
}

/// Blocking WooCommerce REST client.
pub struct WooCommerceApi {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) consumer_key: String,
    pub(crate) consumer_secret: String,
    pub(crate) per_page: u32,
}

impl WooCommerceApi {
    /// Creates a client for the shop described by `config`
    pub fn new(config: &Config) -> Result<Self> {
        log::info!("Connecting to {}", config.url);
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("wc-image-alt/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base(),
            consumer_key: config.consumer_key.clone(),
            consumer_secret: config.consumer_secret.clone(),
            per_page: config.per_page,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
