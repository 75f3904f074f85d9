//! CSV fixtures shared by the integration tests.

#![allow(dead_code)]

use loss_ratio_studio::utils::config::CANONICAL_COLUMNS;
use std::io::Write;
use tempfile::NamedTempFile;

/// Raw cells of one policy row, in canonical column order
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    /// A complete, valid row
    pub fn new(id: &str) -> Self {
        let cells = [
            id,
            "2019-01-01",
            "365.0",
            "100.0",
            "0.0",
            "0.0",
            "10.0",
            "1980-05-12",
            "M",
            "Campinas",
            "SP",
            "13000.0",
            "-22.9",
            "-47.06",
            "1.0",
            "Fiat",
            "Uno",
            "2010.0",
            "A",
            "25000.0",
        ];
        Self {
            cells: cells.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Replace the cell of `column`
    pub fn set(mut self, column: &str, value: &str) -> Self {
        let idx = CANONICAL_COLUMNS
            .iter()
            .position(|c| *c == column)
            .unwrap_or_else(|| panic!("unknown column {}", column));
        self.cells[idx] = value.to_string();
        self
    }

    pub fn region(self, region: &str) -> Self {
        self.set("policy_holder_residence_region", region)
    }

    pub fn amounts(self, premium: f64, claims: f64) -> Self {
        self.set("policy_premium_received_brl", &premium.to_string())
            .set("policy_claims_total_amount_paid_brl", &claims.to_string())
    }

    pub fn line(&self) -> String {
        self.cells.join(",")
    }
}

/// CSV text with the canonical header
pub fn csv_text(rows: &[Row]) -> String {
    let mut text = CANONICAL_COLUMNS.join(",");
    text.push('\n');
    for row in rows {
        text.push_str(&row.line());
        text.push('\n');
    }
    text
}

/// Write rows to a temporary CSV file
pub fn dataset_file(rows: &[Row]) -> NamedTempFile {
    write_file(&csv_text(rows))
}

pub fn write_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Three region "A" policies: premiums 100/200/50, claims 10/100/5
pub fn region_a_rows() -> Vec<Row> {
    vec![
        Row::new("a1").region("A").amounts(100.0, 10.0),
        Row::new("a2").region("A").amounts(200.0, 100.0),
        Row::new("a3").region("A").amounts(50.0, 5.0),
    ]
}
