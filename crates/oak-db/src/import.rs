//! CSV menu ingestion: `name,price,category` rows -> menu_items.
//!
//! Safety policy for bad rows: REJECT, count, and continue.  A blank name,
//! a malformed price, or an undecodable record is never inserted and never
//! aborts the rest of the batch.  Prices are parsed as decimal strings into
//! micros — no floats anywhere on the import path.  A storage failure, by
//! contrast, aborts the whole import.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{insert_menu_item, NewMenuItem};
use oak_checkout::Micros;

/// Outcome of one CSV import batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuImportReport {
    pub rows_ok: u64,
    pub rows_rejected: u64,
    /// First few reject reasons, for operator display.
    pub sample_rejects: Vec<String>,
}

const SAMPLE_REJECTS_MAX: usize = 8;

#[derive(Debug, Deserialize)]
struct MenuCsvRow {
    name: String,
    price: String,
    #[serde(default)]
    category: String,
}

/// Import menu items from CSV with a `name,price,category` header.
pub async fn import_menu_csv<R: std::io::Read>(
    pool: &SqlitePool,
    reader: R,
) -> Result<MenuImportReport> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut report = MenuImportReport::default();

    for (i, record) in rdr.deserialize::<MenuCsvRow>().enumerate() {
        let line_no = i + 2; // line 1 is the header

        let row = match record {
            Ok(r) => r,
            Err(e) => {
                reject(&mut report, line_no, &e.to_string());
                continue;
            }
        };

        if row.name.trim().is_empty() {
            reject(&mut report, line_no, "blank name");
            continue;
        }

        let price = match Micros::parse_decimal(&row.price) {
            Ok(p) => p,
            Err(e) => {
                reject(&mut report, line_no, &e.to_string());
                continue;
            }
        };

        insert_menu_item(
            pool,
            &NewMenuItem {
                name: row.name,
                price_micros: price.raw(),
                category: row.category,
            },
        )
        .await?;
        report.rows_ok += 1;
    }

    Ok(report)
}

fn reject(report: &mut MenuImportReport, line_no: usize, reason: &str) {
    report.rows_rejected += 1;
    if report.sample_rejects.len() < SAMPLE_REJECTS_MAX {
        report.sample_rejects.push(format!("line {line_no}: {reason}"));
    }
}
