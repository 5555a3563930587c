//! Plain-text tables for terminal output

use crate::import::WriteOutcome;
use crate::models::{ReconciledUpdate, Row};
use crate::table::COLUMNS;

/// Longer cells are cut and end in `...`
const MAX_CELL_WIDTH: usize = 40;

fn clean_cell(value: &str) -> String {
    let flat: String = value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if flat.chars().count() > MAX_CELL_WIDTH {
        let cut: String = flat.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{cut}...")
    } else {
        flat
    }
}

fn render_table(title: &str, headers: &[&str], rows: &[Vec<String>]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|c| clean_cell(c)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |values: &[String]| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(value, width)| {
                let pad = width - value.chars().count();
                format!("{value}{}", " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut output = String::new();
    output.push_str(title);
    output.push('\n');

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    output.push_str(&line(&header_cells));
    output.push('\n');

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    output.push_str(&separator.join("-+-"));
    output.push('\n');

    for row in &cells {
        output.push_str(&line(row));
        output.push('\n');
    }
    output
}

/// Table of exported rows, columns as in the CSV
pub fn format_rows_table(rows: &[Row]) -> String {
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.product_name.clone(),
                r.image_name.clone(),
                r.alt.clone(),
                r.suggested.clone(),
                r.src.clone(),
                r.permalink.clone(),
                r.product_id.clone(),
                r.image_id.clone(),
            ]
        })
        .collect();
    render_table("Product Images", &COLUMNS, &body)
}

/// Table of the image patches that an import would send
pub fn format_update(update: &ReconciledUpdate) -> String {
    let body: Vec<Vec<String>> = update
        .iter()
        .flat_map(|product| {
            product.images.iter().map(move |image| {
                vec![
                    product.product_id.to_string(),
                    image.id.to_string(),
                    image.alt.clone(),
                    image.name.clone().unwrap_or_default(),
                ]
            })
        })
        .collect();

    let mut output = render_table(
        "Image Updates",
        &["Product ID", "Image ID", "Alt", "Name"],
        &body,
    );
    output.push_str(&format!(
        "{} images across {} products\n",
        update.image_count(),
        update.len()
    ));
    output
}

/// Per-product result of an import run
pub fn format_write_outcomes(outcomes: &[WriteOutcome]) -> String {
    let body: Vec<Vec<String>> = outcomes
        .iter()
        .map(|o| {
            let status = match &o.error {
                None => "ok".to_string(),
                Some(e) => format!("failed: {e}"),
            };
            vec![o.product_id.to_string(), o.images.to_string(), status]
        })
        .collect();

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    let mut output = render_table("Write Results", &["Product ID", "Images", "Status"], &body);
    output.push_str(&format!(
        "{} products updated, {failed} failed\n",
        outcomes.len() - failed
    ));
    output
}
