//! WooCommerce Image Alt - accessibility metadata sync
//!
//! Exports every product image of a WooCommerce catalog to a CSV file together
//! with a suggested alt text, and pushes (possibly hand-edited) alt text from
//! that file back to the shop, one update per product.

pub mod alt_text;
pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod table;

// Re-export commonly used items
pub use alt_text::suggest_alt;
pub use catalog::{
    fetch_all_products, fetch_limited, CatalogWriter, Page, PageSource, PageWalker, WooCommerceApi,
};
pub use config::Config;
pub use error::{Error, Result};
pub use export::{flatten_products, run_export, ExportSummary};
pub use import::{
    effective_alt, prepare_import, push_updates, reconcile, ImportOptions, ImportPlan,
    WriteOutcome,
};
pub use models::{Image, ImagePatch, Product, ProductUpdate, ReconciledUpdate, ResourceId, Row};
pub use table::{
    read_rows, read_rows_from_path, read_rows_from_path_limited, read_rows_limited, write_rows,
    write_rows_to_path, COLUMNS,
};
