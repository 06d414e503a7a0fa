use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::analyze_file;
use crate::error::Result;
use crate::fmt::money;
use crate::mapping::DEFAULT_CATEGORIES;

pub fn run(file: &str) -> Result<()> {
    let analysis = analyze_file(file)?;

    println!(
        "Parsed {} transactions ({} lines skipped)",
        analysis.transactions.len(),
        analysis.skipped_lines
    );

    let mut table = Table::new();
    table.set_header(vec!["Date", "Description", "Type", "Amount", "Category"]);
    for txn in &analysis.transactions {
        table.add_row(vec![
            Cell::new(txn.date.map(|d| d.to_string()).unwrap_or_default()),
            Cell::new(&txn.description),
            Cell::new(txn.txn_type.as_str()),
            Cell::new(money(txn.amount)),
            Cell::new(txn.category.as_deref().unwrap_or("")),
        ]);
    }
    println!("\nTransactions\n{table}");

    if analysis.unknowns.is_empty() {
        println!("\n{}", "All payees categorized.".green());
    } else {
        let mut utable = Table::new();
        utable.set_header(vec!["Payee", "UPI", "Amount"]);
        for group in &analysis.unknowns {
            let amount = if group.amount < 0.0 {
                money(group.amount).red().to_string()
            } else {
                money(group.amount).green().to_string()
            };
            utable.add_row(vec![
                Cell::new(&group.name),
                Cell::new(&group.upi),
                Cell::new(amount),
            ]);
        }
        println!(
            "\n{} unresolved payees (run `khata review` to map them)\n{utable}",
            analysis.unknowns.len()
        );
    }

    println!("\nSuggested categories: {}", DEFAULT_CATEGORIES.join(", "));
    Ok(())
}
