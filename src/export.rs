//! Export pipeline: catalog -> rows -> CSV

use std::path::{Path, PathBuf};

use crate::alt_text::suggest_alt;
use crate::catalog::{fetch_all_products, fetch_limited, PageSource};
use crate::error::Result;
use crate::models::{Product, Row};
use crate::table::write_rows_to_path;

/// Flattens products into one row per image, keeping product and image order.
///
/// Products without images produce no rows.
pub fn flatten_products(products: &[Product]) -> Vec<Row> {
    products
        .iter()
        .flat_map(|product| {
            let suggested = suggest_alt(&product.name);
            product.images.iter().map(move |image| Row {
                product_name: product.name.clone(),
                image_name: image.name.clone(),
                alt: image.alt.clone(),
                suggested: suggested.clone(),
                src: image.src.clone(),
                permalink: product.permalink.clone(),
                product_id: product.id.to_string(),
                image_id: image.id.to_string(),
            })
        })
        .collect()
}

/// Outcome of an export run
#[derive(Debug)]
pub struct ExportSummary {
    /// Products returned by the catalog, including those without images
    pub products: usize,
    pub rows: Vec<Row>,
    pub output: PathBuf,
}

/// Fetches products, flattens them and writes the CSV.
///
/// `limit` of `None` walks every page; `Some(n)` makes a single request for at
/// most `n` products.
pub fn run_export<S: PageSource + ?Sized>(
    source: &S,
    limit: Option<u32>,
    output: &Path,
) -> Result<ExportSummary> {
    let products = match limit {
        Some(limit) => fetch_limited(source, limit)?,
        None => fetch_all_products(source)?,
    };

    let skipped = products.iter().filter(|p| p.images.is_empty()).count();
    if skipped > 0 {
        log::info!("{skipped} products have no images and are not exported");
    }

    let rows = flatten_products(&products);
    write_rows_to_path(output, &rows)?;
    log::info!("Exported {} rows to {}", rows.len(), output.display());

    Ok(ExportSummary {
        products: products.len(),
        rows,
        output: output.to_path_buf(),
    })
}
