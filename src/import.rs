//! Import pipeline: CSV -> reconciled update -> one write per product

use std::path::Path;

use crate::catalog::CatalogWriter;
use crate::error::{Error, Result};
use crate::models::{ImagePatch, ReconciledUpdate, ResourceId, Row};
use crate::table::read_rows_from_path_limited;

/// Policy flags for an import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Also set the image title (name) to the alt text
    pub replace_title: bool,
    /// Only the first `n` rows are processed
    pub row_limit: Option<usize>,
}

/// Alt text to push for a row: the reviewed `Alt` column when filled in,
/// otherwise the suggestion. May be empty, which clears the alt text.
pub fn effective_alt(row: &Row) -> &str {
    if row.alt.is_empty() {
        &row.suggested
    } else {
        &row.alt
    }
}

/// Groups rows by product into image patches.
///
/// Rows are taken in file order up to the row limit. No row is dropped.
pub fn reconcile(rows: &[Row], options: &ImportOptions) -> ReconciledUpdate {
    let mut update = ReconciledUpdate::new();

    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;
        if options.row_limit.is_some_and(|limit| row_number > limit) {
            log::debug!("Row limit reached after {} rows", row_number - 1);
            break;
        }

        let alt = effective_alt(row).to_string();
        let name = options.replace_title.then(|| alt.clone());
        update.push(
            ResourceId::from(row.product_id.as_str()),
            ImagePatch {
                id: ResourceId::from(row.image_id.as_str()),
                alt,
                name,
            },
        );
    }

    update
}

/// Rows read and the update built from them
#[derive(Debug)]
pub struct ImportPlan {
    pub rows: usize,
    pub update: ReconciledUpdate,
}

/// Reads the CSV and reconciles it. Any malformed row within the row limit
/// fails the whole plan; rows past the limit are never read.
pub fn prepare_import(input: &Path, options: &ImportOptions) -> Result<ImportPlan> {
    let rows = read_rows_from_path_limited(input, options.row_limit)?;
    log::info!("Read {} rows from {}", rows.len(), input.display());

    let update = reconcile(&rows, options);
    log::info!(
        "Reconciled {} images across {} products",
        update.image_count(),
        update.len()
    );

    Ok(ImportPlan {
        rows: rows.len(),
        update,
    })
}

/// Result of writing one product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub product_id: ResourceId,
    pub images: usize,
    pub error: Option<String>,
}

impl WriteOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Sends one write per product. A product the API rejects is recorded and
/// the remaining products are still written. A network failure aborts the
/// batch and is returned.
pub fn push_updates<W: CatalogWriter + ?Sized>(
    writer: &W,
    update: &ReconciledUpdate,
) -> Result<Vec<WriteOutcome>> {
    let mut outcomes = Vec::with_capacity(update.len());

    for product in update.iter() {
        log::info!(
            "Updating product {} ({} images)",
            product.product_id,
            product.images.len()
        );
        let error = match writer.update_images(&product.product_id, &product.images) {
            Ok(()) => None,
            Err(e @ Error::Network(_)) => {
                log::error!(
                    "Network failure on product {}, aborting after {} writes",
                    product.product_id,
                    outcomes.len()
                );
                return Err(e);
            }
            Err(e) => {
                log::error!("Failed to update product {}: {e}", product.product_id);
                Some(e.to_string())
            }
        };
        outcomes.push(WriteOutcome {
            product_id: product.product_id.clone(),
            images: product.images.len(),
            error,
        });
    }

    Ok(outcomes)
}

#[cfg(test)]
#[path = "import_tests.rs"]
mod tests;
