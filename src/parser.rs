use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{KhataError, Result};
use crate::models::RawTable;
use crate::standardizer::parse_amount;

/// Parse output: a raw record set plus the number of lines/records the
/// parser could not read. Noise is counted, never fatal.
#[derive(Debug)]
pub struct Parsed {
    pub table: RawTable,
    pub skipped_lines: usize,
}

/// Dispatch on the extension hint. Fails only for unsupported
/// extensions or files that cannot be decoded as the claimed format;
/// malformed rows inside a readable file are dropped or zeroed.
pub fn parse_file(path: &Path) -> Result<Parsed> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        #[cfg(feature = "pdf")]
        "pdf" => parse_pdf(path),
        "csv" => parse_csv(path),
        #[cfg(feature = "xlsx")]
        "xlsx" => parse_xlsx(path),
        _ => Err(KhataError::Format(format!(
            "only PDF/CSV/XLSX statements are supported: {}",
            path.display()
        ))),
    }
}

// ---------------------------------------------------------------------------
// Free-text (PDF) variant
// ---------------------------------------------------------------------------

// Matches lines like: Aug 15, 2025 Paid to ABC Store DEBIT ₹1,200
fn txn_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^([A-Za-z]{3,9}\s+\d{1,2},\s+\d{4}).*?(?:paid to|received from)\s+(.*?)\s+(debit|credit)\s*₹?([\d,]+)",
        )
        .expect("txn line regex")
    })
}

fn parse_month_name_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDate::parse_from_str(&cleaned, "%b %d, %Y")
        .or_else(|_| NaiveDate::parse_from_str(&cleaned, "%B %d, %Y"))
        .ok()
}

#[cfg(feature = "pdf")]
fn parse_pdf(path: &Path) -> Result<Parsed> {
    let text = pdf_extract::extract_text(path)
        .map_err(|e| KhataError::Format(format!("failed to read PDF text: {e}")))?;
    Ok(parse_statement_text(&text))
}

/// Scan extracted statement text line by line. Amounts are
/// sign-encoded at this stage (negative for DEBIT, positive for
/// CREDIT); rows sharing (date, description, type) are merged by
/// summing, collapsing split line captures of one logical transaction.
pub fn parse_statement_text(text: &str) -> Parsed {
    let re = txn_line_re();
    let mut merged: BTreeMap<(String, String, String), f64> = BTreeMap::new();
    let mut skipped = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(caps) = re.captures(line) else {
            skipped += 1;
            continue;
        };
        let date = parse_month_name_date(&caps[1])
            .map(|d| d.to_string())
            .unwrap_or_else(|| caps[1].trim().to_string());
        let description = caps[2].trim().to_string();
        let txn_type = caps[3].to_uppercase();
        let mut amount = caps[4].replace(',', "").parse::<f64>().unwrap_or(0.0);
        if txn_type == "DEBIT" {
            amount = -amount;
        }
        *merged.entry((date, description, txn_type)).or_insert(0.0) += amount;
    }

    let rows = merged
        .into_iter()
        .map(|((date, description, txn_type), amount)| {
            vec![date, description, txn_type, format!("{amount:.2}")]
        })
        .collect();

    Parsed {
        table: RawTable {
            headers: vec![
                "Date".to_string(),
                "Description".to_string(),
                "Type".to_string(),
                "Amount".to_string(),
            ],
            rows,
        },
        skipped_lines: skipped,
    }
}

// ---------------------------------------------------------------------------
// Tabular (CSV/XLSX) variant
// ---------------------------------------------------------------------------

/// Raw-ingestion header cleanup: trim + capitalize the first letter,
/// lowercasing the rest ("TXN DATE" → "Txn date"). Full alias
/// resolution happens downstream in the standardizer.
fn weak_normalize(header: &str) -> String {
    let mut chars = header.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// An `Amount` column is coerced numeric with unreadable entries
/// zeroed; every other column passes through untouched.
fn coerce_amount_column(table: &mut RawTable) {
    let Some(idx) = table.column_index("Amount") else {
        return;
    };
    for row in &mut table.rows {
        if let Some(cell) = row.get_mut(idx) {
            *cell = format!("{:.2}", parse_amount(cell));
        }
    }
}

fn parse_csv(path: &Path) -> Result<Parsed> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));

    let headers: Vec<String> = rdr.headers()?.iter().map(weak_normalize).collect();
    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let Ok(record) = result else {
            skipped += 1;
            continue;
        };
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    let mut table = RawTable { headers, rows };
    coerce_amount_column(&mut table);
    Ok(Parsed {
        table,
        skipped_lines: skipped,
    })
}

#[cfg(feature = "xlsx")]
fn parse_xlsx(path: &Path) -> Result<Parsed> {
    use calamine::Reader;

    let mut workbook = calamine::open_workbook_auto(path)
        .map_err(|e| KhataError::Format(format!("failed to open XLSX: {e}")))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| KhataError::Format("workbook has no sheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| KhataError::Format(format!("failed to read sheet '{sheet}': {e}")))?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = rows_iter
        .next()
        .map(|row| row.iter().map(|c| weak_normalize(&cell_text(c))).collect())
        .unwrap_or_default();
    let mut rows = Vec::new();
    for row in rows_iter {
        let mut cells: Vec<String> = row.iter().map(cell_text).collect();
        cells.resize(headers.len(), String::new());
        rows.push(cells);
    }

    let mut table = RawTable { headers, rows };
    coerce_amount_column(&mut table);
    Ok(Parsed {
        table,
        skipped_lines: 0,
    })
}

#[cfg(feature = "xlsx")]
fn cell_text(cell: &calamine::Data) -> String {
    use calamine::Data;
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

#[cfg(any(feature = "xlsx", test))]
fn excel_serial_to_date(serial: f64) -> String {
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    let base = chrono::NaiveDate::from_ymd_opt(1899, 12, 30).unwrap();
    let date = base + chrono::Duration::days(serial as i64);
    date.format("%Y-%m-%d").to_string()
}
