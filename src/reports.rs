use std::collections::BTreeMap;

use crate::categorizer::UNCATEGORIZED;
use crate::models::{Transaction, TxnType};

pub struct CategoryTotal {
    pub name: String,
    pub total: f64,
}

pub struct Summary {
    pub total_credit: f64,
    pub total_debit: f64,
    pub balance: f64,
    pub by_category: Vec<CategoryTotal>,
}

pub struct MonthlySpend {
    pub month: String,
    pub total: f64,
}

fn round2(val: f64) -> f64 {
    (val * 100.0).round() / 100.0
}

/// Pure aggregation over categorized rows. Amounts are magnitudes, so
/// category totals sum spend and income alike; the headline credit and
/// debit totals split by type. Empty input yields an all-zero summary.
pub fn summarize(rows: &[Transaction]) -> Summary {
    let total_credit: f64 = rows
        .iter()
        .filter(|r| r.txn_type == TxnType::Credit)
        .map(|r| r.amount)
        .sum();
    let total_debit: f64 = rows
        .iter()
        .filter(|r| r.txn_type == TxnType::Debit)
        .map(|r| r.amount)
        .sum();

    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for row in rows {
        let category = row
            .category
            .clone()
            .unwrap_or_else(|| UNCATEGORIZED.to_string());
        *totals.entry(category).or_insert(0.0) += row.amount;
    }
    let mut by_category: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(name, total)| CategoryTotal {
            name,
            total: round2(total),
        })
        .collect();
    by_category.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Summary {
        total_credit: round2(total_credit),
        total_debit: round2(total_debit),
        balance: round2(total_credit - total_debit),
        by_category,
    }
}

/// Debit totals per calendar month (YYYY-MM). Rows without a parseable
/// date are left out.
pub fn monthly_spend(rows: &[Transaction]) -> Vec<MonthlySpend> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for row in rows {
        if row.txn_type != TxnType::Debit {
            continue;
        }
        let Some(date) = row.date else { continue };
        *totals
            .entry(date.format("%Y-%m").to_string())
            .or_insert(0.0) += row.amount;
    }
    totals
        .into_iter()
        .map(|(month, total)| MonthlySpend {
            month,
            total: round2(total),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(
        date: Option<(i32, u32, u32)>,
        category: &str,
        amount: f64,
        txn_type: TxnType,
    ) -> Transaction {
        Transaction {
            date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            description: String::new(),
            txn_type,
            amount,
            reference: None,
            category: Some(category.to_string()),
        }
    }

    #[test]
    fn test_summarize_totals_and_balance() {
        let rows = vec![
            txn(None, "Salary", 1000.0, TxnType::Credit),
            txn(None, "Food", 250.0, TxnType::Debit),
            txn(None, "Food", 100.0, TxnType::Debit),
        ];
        let summary = summarize(&rows);
        assert_eq!(summary.total_credit, 1000.0);
        assert_eq!(summary.total_debit, 350.0);
        assert_eq!(summary.balance, 650.0);
    }

    #[test]
    fn test_by_category_sorted_descending() {
        let rows = vec![
            txn(None, "Food", 100.0, TxnType::Debit),
            txn(None, "Salary", 1000.0, TxnType::Credit),
            txn(None, "Travel", 300.0, TxnType::Debit),
        ];
        let summary = summarize(&rows);
        let names: Vec<&str> = summary
            .by_category
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Salary", "Travel", "Food"]);
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_credit, 0.0);
        assert_eq!(summary.total_debit, 0.0);
        assert_eq!(summary.balance, 0.0);
        assert!(summary.by_category.is_empty());
        assert!(monthly_spend(&[]).is_empty());
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        let rows = vec![
            txn(None, "Food", 0.1, TxnType::Debit),
            txn(None, "Food", 0.2, TxnType::Debit),
        ];
        let summary = summarize(&rows);
        assert_eq!(summary.total_debit, 0.3);
        assert_eq!(summary.by_category[0].total, 0.3);
    }

    #[test]
    fn test_monthly_spend_groups_debits_by_month() {
        let rows = vec![
            txn(Some((2025, 8, 15)), "Food", 250.0, TxnType::Debit),
            txn(Some((2025, 8, 20)), "Travel", 100.0, TxnType::Debit),
            txn(Some((2025, 9, 1)), "Food", 50.0, TxnType::Debit),
            txn(Some((2025, 8, 25)), "Salary", 1000.0, TxnType::Credit),
            txn(None, "Food", 999.0, TxnType::Debit),
        ];
        let monthly = monthly_spend(&rows);
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].month, "2025-08");
        assert_eq!(monthly[0].total, 350.0);
        assert_eq!(monthly[1].month, "2025-09");
        assert_eq!(monthly[1].total, 50.0);
    }

    #[test]
    fn test_rows_without_category_count_as_other() {
        let mut row = txn(None, "x", 10.0, TxnType::Debit);
        row.category = None;
        let summary = summarize(&[row]);
        assert_eq!(summary.by_category[0].name, "Other");
    }
}
