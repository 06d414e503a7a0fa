use chrono::NaiveDate;

use crate::models::{RawTable, Transaction, TxnType};

// ---------------------------------------------------------------------------
// Cell coercion helpers
// ---------------------------------------------------------------------------

/// Lenient numeric parse: strips separators, quotes and currency glyphs,
/// reads parenthesized negatives. Anything unreadable is 0.0.
pub fn parse_amount(raw: &str) -> f64 {
    let s = raw
        .replace(',', "")
        .replace('"', "")
        .replace('$', "")
        .replace('\u{20b9}', "");
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return -inner.trim().parse::<f64>().unwrap_or(0.0);
    }
    s.parse().unwrap_or(0.0)
}

/// Indian statements are day-first, so %d/%m/%Y is tried before %m/%d/%Y.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d/%m/%y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d-%b-%Y",
    "%Y/%m/%d",
];

/// Permissive date parse; unreadable values become None, never an error.
pub fn parse_date_any(raw: &str) -> Option<NaiveDate> {
    let cleaned = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, format) {
            return Some(date);
        }
    }
    // Datetime cells like "2025-08-15 00:00:00" — retry on the date part.
    let first = cleaned.split(' ').next().unwrap_or("");
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(first, format) {
            return Some(date);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Column resolution
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum Field {
    Date,
    Description,
    Type,
    Amount,
    Reference,
}

const COLUMN_ALIASES: &[(&str, Field)] = &[
    ("date", Field::Date),
    ("txn date", Field::Date),
    ("transaction date", Field::Date),
    ("value date", Field::Date),
    ("description", Field::Description),
    ("transaction details", Field::Description),
    ("narration", Field::Description),
    ("details", Field::Description),
    ("amount", Field::Amount),
    ("amt", Field::Amount),
    ("transaction amount", Field::Amount),
    ("type", Field::Type),
    ("dr/cr", Field::Type),
    ("transaction type", Field::Type),
    ("upi", Field::Reference),
    ("upi ref", Field::Reference),
    ("upi id", Field::Reference),
    ("reference", Field::Reference),
    ("ref no", Field::Reference),
];

#[derive(Default)]
struct ResolvedColumns {
    date: Option<usize>,
    description: Option<usize>,
    txn_type: Option<usize>,
    amount: Option<usize>,
    reference: Option<usize>,
    /// Set when the amount came from a split "debit amount"/"credit
    /// amount" column; an explicit Type column still wins over this.
    forced_type: Option<TxnType>,
}

fn resolve_columns(table: &RawTable) -> ResolvedColumns {
    let mut cols = ResolvedColumns::default();
    for (i, header) in table.headers.iter().enumerate() {
        let key = header.trim().to_lowercase();
        if let Some((_, field)) = COLUMN_ALIASES.iter().find(|(alias, _)| *alias == key) {
            match field {
                Field::Date => cols.date.get_or_insert(i),
                Field::Description => cols.description.get_or_insert(i),
                Field::Type => cols.txn_type.get_or_insert(i),
                Field::Amount => cols.amount.get_or_insert(i),
                Field::Reference => cols.reference.get_or_insert(i),
            };
        } else if key.contains("debit") && key.contains("amount") {
            if cols.amount.is_none() {
                cols.amount = Some(i);
                cols.forced_type = Some(TxnType::Debit);
            }
        } else if key.contains("credit") && key.contains("amount") {
            if cols.amount.is_none() {
                cols.amount = Some(i);
                cols.forced_type = Some(TxnType::Credit);
            }
        }
    }
    cols
}

/// Whether any description-like column resolves. Categorization is
/// meaningless without one; callers surface this as a schema error,
/// distinct from "all descriptions empty" which is valid input.
pub fn has_description(table: &RawTable) -> bool {
    resolve_columns(table).description.is_some()
}

// ---------------------------------------------------------------------------
// standardize
// ---------------------------------------------------------------------------

/// Force a raw record set into canonical {Date, Description, Type,
/// Amount} rows. Tolerant of any source layout: required fields that
/// never resolve are synthesized (null date, empty description, zero
/// amount, DEBIT type) and malformed cells fall back the same way.
/// Never fails.
pub fn standardize(table: &RawTable) -> Vec<Transaction> {
    let cols = resolve_columns(table);
    table
        .rows
        .iter()
        .map(|row| {
            let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(String::as_str);
            let txn_type = match cell(cols.txn_type) {
                Some(marker) => TxnType::from_raw(Some(marker)),
                None => cols.forced_type.unwrap_or(TxnType::Debit),
            };
            Transaction {
                date: cell(cols.date).and_then(parse_date_any),
                description: cell(cols.description).unwrap_or("").trim().to_string(),
                txn_type,
                amount: parse_amount(cell(cols.amount).unwrap_or("")).abs(),
                reference: cell(cols.reference)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
                category: None,
            }
        })
        .collect()
}
