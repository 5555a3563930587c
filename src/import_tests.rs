//! Tests for import reconciliation and write batching.

use std::cell::RefCell;
use std::io::Write;

use super::{effective_alt, prepare_import, push_updates, reconcile, ImportOptions};
use crate::catalog::CatalogWriter;
use crate::error::{Error, Result};
use crate::models::{ImagePatch, ResourceId, Row};

fn row(product_id: &str, image_id: &str, alt: &str, suggested: &str) -> Row {
    Row {
        product_id: product_id.to_string(),
        image_id: image_id.to_string(),
        alt: alt.to_string(),
        suggested: suggested.to_string(),
        ..Row::default()
    }
}

fn patch(id: &str, alt: &str) -> ImagePatch {
    ImagePatch {
        id: id.into(),
        alt: alt.to_string(),
        name: None,
    }
}

/// Records every write; rejects the products in `fail_for` and loses the
/// connection on the products in `disconnect_on`
#[derive(Default)]
struct RecordingWriter {
    fail_for: Vec<&'static str>,
    disconnect_on: Vec<&'static str>,
    calls: RefCell<Vec<(ResourceId, Vec<ImagePatch>)>>,
}

impl CatalogWriter for RecordingWriter {
    fn update_images(&self, product_id: &ResourceId, images: &[ImagePatch]) -> Result<()> {
        self.calls
            .borrow_mut()
            .push((product_id.clone(), images.to_vec()));
        if self.disconnect_on.iter().any(|id| *id == product_id.as_str()) {
            return Err(connection_refused());
        }
        if self.fail_for.iter().any(|id| *id == product_id.as_str()) {
            return Err(Error::HttpStatus {
                status: reqwest::StatusCode::BAD_REQUEST,
                body: "woocommerce_product_invalid_image_id".to_string(),
            });
        }
        Ok(())
    }
}

/// A real transport error from a request to a closed local port
fn connection_refused() -> Error {
    let err = reqwest::blocking::Client::new()
        .get("http://127.0.0.1:1/")
        .send()
        .unwrap_err();
    Error::Network(err)
}

// ── effective_alt ────────────────────────────────────────────────────

#[test]
fn reviewed_alt_wins_over_suggestion() {
    assert_eq!(effective_alt(&row("1", "1", "Reviewed", "Suggested")), "Reviewed");
}

#[test]
fn suggestion_fills_empty_alt() {
    assert_eq!(effective_alt(&row("1", "1", "", "Suggested")), "Suggested");
}

#[test]
fn both_empty_gives_empty_alt() {
    assert_eq!(effective_alt(&row("1", "1", "", "")), "");
}

// ── reconcile ────────────────────────────────────────────────────────

#[test]
fn merges_rows_of_one_product_into_one_update() {
    let rows = vec![row("1", "1", "", "Cat"), row("1", "2", "Dog", "X")];

    let update = reconcile(&rows, &ImportOptions::default());

    assert_eq!(update.len(), 1);
    assert_eq!(
        update.get(&"1".into()).unwrap(),
        &[patch("1", "Cat"), patch("2", "Dog")]
    );
}

#[test]
fn groups_by_product_id_preserving_row_order() {
    let rows = vec![
        row("10", "100", "a", ""),
        row("20", "200", "b", ""),
        row("10", "101", "c", ""),
    ];

    let update = reconcile(&rows, &ImportOptions::default());

    assert_eq!(update.len(), 2);
    assert_eq!(
        update.get(&"10".into()).unwrap(),
        &[patch("100", "a"), patch("101", "c")]
    );
    assert_eq!(update.get(&"20".into()).unwrap(), &[patch("200", "b")]);
}

#[test]
fn row_limit_stops_processing() {
    let rows: Vec<Row> = (1..=5)
        .map(|i| row(&i.to_string(), &format!("{i}0"), "alt", ""))
        .collect();
    let options = ImportOptions {
        row_limit: Some(2),
        ..ImportOptions::default()
    };

    let update = reconcile(&rows, &options);

    assert_eq!(update.len(), 2);
    assert_eq!(update.image_count(), 2);
    assert!(update.get(&"1".into()).is_some());
    assert!(update.get(&"2".into()).is_some());
    assert!(update.get(&"3".into()).is_none());
}

#[test]
fn row_limit_larger_than_file_processes_everything() {
    let rows = vec![row("1", "1", "a", ""), row("2", "2", "b", "")];
    let options = ImportOptions {
        row_limit: Some(10),
        ..ImportOptions::default()
    };

    assert_eq!(reconcile(&rows, &options).image_count(), 2);
}

#[test]
fn replace_title_copies_alt_into_name() {
    let rows = vec![row("1", "1", "", "Cat"), row("1", "2", "Dog", "X")];
    let options = ImportOptions {
        replace_title: true,
        ..ImportOptions::default()
    };

    let update = reconcile(&rows, &options);

    let images = update.get(&"1".into()).unwrap();
    assert_eq!(images[0].name.as_deref(), Some("Cat"));
    assert_eq!(images[1].name.as_deref(), Some("Dog"));
}

#[test]
fn empty_alt_is_still_pushed() {
    let rows = vec![row("1", "1", "", "")];

    let update = reconcile(&rows, &ImportOptions::default());

    assert_eq!(update.get(&"1".into()).unwrap(), &[patch("1", "")]);
}

// ── push_updates ─────────────────────────────────────────────────────

#[test]
fn one_write_per_product_with_images_in_order() {
    let rows = vec![row("1", "1", "", "Cat"), row("1", "2", "Dog", "X")];
    let update = reconcile(&rows, &ImportOptions::default());
    let writer = RecordingWriter::default();

    let outcomes = push_updates(&writer, &update).unwrap();

    let calls = writer.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, ResourceId::from("1"));
    assert_eq!(calls[0].1, vec![patch("1", "Cat"), patch("2", "Dog")]);
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].is_success());
    assert_eq!(outcomes[0].images, 2);
}

#[test]
fn failed_product_does_not_block_others() {
    let rows = vec![
        row("1", "10", "a", ""),
        row("2", "20", "b", ""),
        row("3", "30", "c", ""),
    ];
    let update = reconcile(&rows, &ImportOptions::default());
    let writer = RecordingWriter {
        fail_for: vec!["2"],
        ..RecordingWriter::default()
    };

    let outcomes = push_updates(&writer, &update).unwrap();

    assert_eq!(writer.calls.borrow().len(), 3);
    assert!(outcomes[0].is_success());
    assert!(!outcomes[1].is_success());
    assert!(outcomes[1]
        .error
        .as_deref()
        .unwrap()
        .contains("invalid_image_id"));
    assert!(outcomes[2].is_success());
}

#[test]
fn network_failure_aborts_remaining_writes() {
    let rows = vec![
        row("1", "10", "a", ""),
        row("2", "20", "b", ""),
        row("3", "30", "c", ""),
    ];
    let update = reconcile(&rows, &ImportOptions::default());
    let writer = RecordingWriter {
        disconnect_on: vec!["2"],
        ..RecordingWriter::default()
    };

    let result = push_updates(&writer, &update);

    assert!(matches!(result, Err(Error::Network(_))));
    let calls = writer.calls.borrow();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|(id, _)| id.as_str() != "3"));
}

// ── prepare_import ───────────────────────────────────────────────────

#[test]
fn prepare_import_reads_and_reconciles_file() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    write!(
        tmp,
        "Product name,Image name,Alt,Suggested,Src,Product,Product ID,Image ID\n\
         Pets,cat.jpg,,Cat,https://s/cat.jpg,https://s/p/1,1,1\n\
         Pets,dog.jpg,Dog,X,https://s/dog.jpg,https://s/p/1,1,2\n"
    )
    .unwrap();

    let plan = prepare_import(tmp.path(), &ImportOptions::default()).unwrap();

    assert_eq!(plan.rows, 2);
    assert_eq!(
        plan.update.get(&"1".into()).unwrap(),
        &[patch("1", "Cat"), patch("2", "Dog")]
    );
}

#[test]
fn prepare_import_stops_reading_at_row_limit() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    write!(tmp, "Product ID,Image ID,Alt\n1,1,Cat\n1,2,Dog\n2,,Broken\n").unwrap();
    let options = ImportOptions {
        row_limit: Some(2),
        ..ImportOptions::default()
    };

    let plan = prepare_import(tmp.path(), &options).unwrap();

    assert_eq!(plan.rows, 2);
    assert_eq!(plan.update.image_count(), 2);
    assert!(plan.update.get(&"2".into()).is_none());
}

#[test]
fn prepare_import_rejects_malformed_file() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    write!(tmp, "Product ID,Image ID,Alt\n1,1,Cat\n1,,Dog\n").unwrap();

    let result = prepare_import(tmp.path(), &ImportOptions::default());

    assert!(matches!(result, Err(Error::MissingValue { .. })));
}
