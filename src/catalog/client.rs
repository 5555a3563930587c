//! HTTP implementation of the catalog traits.

use log::{debug, error, warn};
use reqwest::blocking::{RequestBuilder, Response};
use reqwest::header::HeaderMap;
use serde::Serialize;

use super::{CatalogWriter, Page, PageSource, WooCommerceApi};
use crate::config::MAX_PER_PAGE;
use crate::error::{Error, Result};
use crate::models::{ImagePatch, Product, ResourceId};

const TOTAL_PAGES_HEADER: &str = "X-WP-TotalPages";
const TOTAL_ITEMS_HEADER: &str = "X-WP-Total";

#[derive(Serialize)]
struct ImagesPayload<'a> {
    images: &'a [ImagePatch],
}

impl WooCommerceApi {
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.consumer_key, Some(&self.consumer_secret))
    }

    /// Turns non-2xx responses into `Error::HttpStatus`
    fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        debug!("Response status: {status}");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        error!("Request failed with status {status}: {body}");
        Err(Error::HttpStatus { status, body })
    }
}

impl PageSource for WooCommerceApi {
    fn fetch_page(&self, page: u32, per_page: u32) -> Result<Page> {
        let per_page = if per_page > MAX_PER_PAGE {
            warn!("per_page {per_page} exceeds the API maximum, using {MAX_PER_PAGE}");
            MAX_PER_PAGE
        } else {
            per_page
        };

        let url = format!("{}/products", self.base_url);
        debug!("GET {url} page={page} per_page={per_page}");

        let response = self
            .authorized(self.client.get(&url))
            .query(&[("per_page", per_page), ("page", page)])
            .send()?;
        let response = Self::check_status(response)?;

        let total_pages = parse_header::<u32>(response.headers(), TOTAL_PAGES_HEADER)?;
        let total_items = parse_header::<u64>(response.headers(), TOTAL_ITEMS_HEADER)?;

        let body = response.text()?;
        let products: Vec<Product> = serde_json::from_str(&body)?;
        debug!("Page {page}: {} products", products.len());

        Ok(Page {
            number: page,
            products,
            total_pages,
            total_items,
        })
    }

    fn page_size(&self) -> u32 {
        self.per_page
    }
}

impl CatalogWriter for WooCommerceApi {
    fn update_images(&self, product_id: &ResourceId, images: &[ImagePatch]) -> Result<()> {
        let url = format!("{}/products/{}", self.base_url, product_id);
        debug!("PUT {url} with {} images", images.len());

        let response = self
            .authorized(self.client.put(&url))
            .json(&ImagesPayload { images })
            .send()?;
        Self::check_status(response)?;
        Ok(())
    }
}

fn parse_header<T: std::str::FromStr>(headers: &HeaderMap, name: &'static str) -> Result<T> {
    let value = headers.get(name).ok_or(Error::MissingHeader(name))?;
    let text = value.to_str().map_err(|_| Error::InvalidHeader {
        name,
        value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
    })?;
    text.trim().parse().map_err(|_| Error::InvalidHeader {
        name,
        value: text.to_string(),
    })
}
