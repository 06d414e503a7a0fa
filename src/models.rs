use chrono::NaiveDate;

/// Raw tabular record set straight out of a parser, before column
/// standardization. Header names are whatever the source file used;
/// every cell is a string.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnType {
    Debit,
    Credit,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "DEBIT",
            Self::Credit => "CREDIT",
        }
    }

    /// Resolve a raw type marker: C* is a credit, everything else —
    /// including empty, "NONE" and "NAN" placeholders — is a debit
    /// (safer to overcount spend than to miss it).
    pub fn from_raw(raw: Option<&str>) -> TxnType {
        let marker = raw.unwrap_or("").trim().to_uppercase();
        if marker.starts_with('C') {
            TxnType::Credit
        } else {
            TxnType::Debit
        }
    }
}

/// Canonical statement row: {Date, Description, Type, Amount}.
/// `amount` is a non-negative magnitude; the sign lives in `txn_type`.
/// `category` stays None until the categorizer assigns one.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: Option<NaiveDate>,
    pub description: String,
    pub txn_type: TxnType,
    pub amount: f64,
    pub reference: Option<String>,
    pub category: Option<String>,
}

/// Uncategorized rows aggregated by trimmed description, with the
/// signed sum of their amounts. Drives human-assisted mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownGroup {
    pub name: String,
    pub upi: String,
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txn_type_from_raw() {
        assert_eq!(TxnType::from_raw(Some("DEBIT")), TxnType::Debit);
        assert_eq!(TxnType::from_raw(Some("CREDIT")), TxnType::Credit);
        assert_eq!(TxnType::from_raw(Some("dr")), TxnType::Debit);
        assert_eq!(TxnType::from_raw(Some("cr")), TxnType::Credit);
        assert_eq!(TxnType::from_raw(Some("  Cr  ")), TxnType::Credit);
    }

    #[test]
    fn test_txn_type_defaults_to_debit() {
        assert_eq!(TxnType::from_raw(None), TxnType::Debit);
        assert_eq!(TxnType::from_raw(Some("")), TxnType::Debit);
        assert_eq!(TxnType::from_raw(Some("NONE")), TxnType::Debit);
        assert_eq!(TxnType::from_raw(Some("NAN")), TxnType::Debit);
        assert_eq!(TxnType::from_raw(Some("withdrawal")), TxnType::Debit);
    }

    #[test]
    fn test_column_index() {
        let table = RawTable {
            headers: vec!["Date".into(), "Amount".into()],
            rows: vec![],
        };
        assert_eq!(table.column_index("Amount"), Some(1));
        assert_eq!(table.column_index("Description"), None);
    }
}
