use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::analyze_file;
use crate::error::Result;
use crate::fmt::money;
use crate::reports;

pub fn run(file: &str) -> Result<()> {
    let analysis = analyze_file(file)?;
    let summary = reports::summarize(&analysis.transactions);
    let monthly = reports::monthly_spend(&analysis.transactions);

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        Cell::new("Total Credited".green().bold()),
        Cell::new(money(summary.total_credit)),
    ]);
    table.add_row(vec![
        Cell::new("Total Debited".red().bold()),
        Cell::new(money(summary.total_debit)),
    ]);
    let balance_label = if summary.balance >= 0.0 {
        "Balance Left".green().bold()
    } else {
        "Balance Left".red().bold()
    };
    table.add_row(vec![Cell::new(balance_label), Cell::new(money(summary.balance))]);
    println!("Summary\n{table}");

    if !summary.by_category.is_empty() {
        let mut ctable = Table::new();
        ctable.set_header(vec!["Category", "Amount"]);
        for item in &summary.by_category {
            ctable.add_row(vec![Cell::new(&item.name), Cell::new(money(item.total))]);
        }
        println!("\nBy Category\n{ctable}");
    }

    if !monthly.is_empty() {
        let mut mtable = Table::new();
        mtable.set_header(vec!["Month", "Spend"]);
        for item in &monthly {
            mtable.add_row(vec![Cell::new(&item.month), Cell::new(money(item.total))]);
        }
        println!("\nMonthly Spend\n{mtable}");
    }

    Ok(())
}
