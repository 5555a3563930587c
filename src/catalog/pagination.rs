//! Walking a paginated product listing to completion.

use std::iter::FusedIterator;

use super::{Page, PageSource};
use crate::error::Result;
use crate::models::Product;

/// Lazy iterator over the pages of a listing.
///
/// Starts at page 1 and stops once the page just fetched is the last one
/// according to that same response. The total is re-read from every response,
/// so a listing that grows or shrinks mid-walk is followed as reported. The
/// first error is yielded and ends the walk. Not restartable.
pub struct PageWalker<'a, S: PageSource + ?Sized> {
    source: &'a S,
    per_page: u32,
    next_page: u32,
    total_pages: Option<u32>,
    done: bool,
}

impl<'a, S: PageSource + ?Sized> PageWalker<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self::with_page_size(source, source.page_size())
    }

    pub fn with_page_size(source: &'a S, per_page: u32) -> Self {
        Self {
            source,
            per_page,
            next_page: 1,
            total_pages: None,
            done: false,
        }
    }
}

impl<S: PageSource + ?Sized> Iterator for PageWalker<'_, S> {
    type Item = Result<Page>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if let Some(total) = self.total_pages {
            if self.next_page > total {
                self.done = true;
                return None;
            }
        }

        log::info!("page={}", self.next_page);
        match self.source.fetch_page(self.next_page, self.per_page) {
            Ok(page) => {
                self.total_pages = Some(page.total_pages);
                self.next_page += 1;
                Some(Ok(page))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<S: PageSource + ?Sized> FusedIterator for PageWalker<'_, S> {}

/// Fetches every product of the listing, page by page.
///
/// Products come back in page order. Nothing is deduplicated. On error the
/// products gathered so far are dropped.
pub fn fetch_all_products<S: PageSource + ?Sized>(source: &S) -> Result<Vec<Product>> {
    let mut products = Vec::new();
    let mut total_items = 0;

    for page in PageWalker::new(source) {
        let page = page?;
        total_items = page.total_items;
        products.extend(page.products);
    }

    log::info!("num_products={total_items}, items={}", products.len());
    Ok(products)
}

/// Fetches at most `limit` products with a single request, no pagination
pub fn fetch_limited<S: PageSource + ?Sized>(source: &S, limit: u32) -> Result<Vec<Product>> {
    let page = source.fetch_page(1, limit)?;
    log::info!(
        "Requested {limit} products, received {}",
        page.products.len()
    );
    Ok(page.products)
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
