use std::path::Path;

use crate::error::Result;
use crate::models::Transaction;
use crate::reports::{MonthlySpend, Summary};

/// Write the categorized register as CSV.
pub fn write_register_csv(rows: &[Transaction], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["Date", "Description", "Type", "Amount", "Category"])?;
    for row in rows {
        wtr.write_record([
            row.date.map(|d| d.to_string()).unwrap_or_default(),
            row.description.clone(),
            row.txn_type.as_str().to_string(),
            format!("{:.2}", row.amount),
            row.category.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Flatten the summary workbook into one CSV: headline metrics, then
/// per-category totals, then monthly spend.
pub fn write_summary_csv(summary: &Summary, monthly: &[MonthlySpend], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["Metric", "Value"])?;
    wtr.write_record([
        "Total Credited".to_string(),
        format!("{:.2}", summary.total_credit),
    ])?;
    wtr.write_record([
        "Total Debited".to_string(),
        format!("{:.2}", summary.total_debit),
    ])?;
    wtr.write_record(["Balance Left".to_string(), format!("{:.2}", summary.balance)])?;

    wtr.write_record(["", ""])?;
    wtr.write_record(["Category", "Amount"])?;
    for item in &summary.by_category {
        wtr.write_record([item.name.clone(), format!("{:.2}", item.total)])?;
    }

    wtr.write_record(["", ""])?;
    wtr.write_record(["Month", "Monthly Spend"])?;
    for item in monthly {
        wtr.write_record([item.month.clone(), format!("{:.2}", item.total)])?;
    }

    wtr.flush()?;
    Ok(())
}
