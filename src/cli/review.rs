use colored::Colorize;
use comfy_table::{Cell, Table};
use dialoguer::Input;

use crate::cli::analyze_file;
use crate::error::{KhataError, Result};
use crate::fmt::money;
use crate::mapping::{self, DEFAULT_CATEGORIES};

pub fn run(file: &str) -> Result<()> {
    let analysis = analyze_file(file)?;

    if analysis.unknowns.is_empty() {
        println!("{}", "No unresolved payees to review.".green());
        return Ok(());
    }

    println!("\n{} payees to review\n", analysis.unknowns.len());

    let mut cat_table = Table::new();
    cat_table.set_header(vec!["#", "Category"]);
    for (i, name) in DEFAULT_CATEGORIES.iter().enumerate() {
        cat_table.add_row(vec![Cell::new(i + 1), Cell::new(name)]);
    }
    println!("Categories\n{cat_table}\n");

    let mut assigned = mapping::Mapping::new();
    for group in &analysis.unknowns {
        println!("{}", "\u{2500}".repeat(60));
        println!("  Payee:  {}", group.name);
        println!("  UPI:    {}", group.upi);
        let amount = if group.amount < 0.0 {
            money(group.amount).red().to_string()
        } else {
            money(group.amount).green().to_string()
        };
        println!("  Amount: {amount}");
        println!();

        let choice: String = Input::new()
            .with_prompt("Category # (or s=skip, q=quit)")
            .interact_text()
            .map_err(|e| KhataError::Other(e.to_string()))?;

        if choice.eq_ignore_ascii_case("q") {
            break;
        }
        if choice.eq_ignore_ascii_case("s") {
            continue;
        }
        match choice.parse::<usize>() {
            Ok(n) if n >= 1 && n <= DEFAULT_CATEGORIES.len() => {
                assigned.insert(group.name.clone(), DEFAULT_CATEGORIES[n - 1].to_string());
            }
            _ => println!("{}", "Invalid choice, skipping.".red()),
        }
    }

    if assigned.is_empty() {
        println!("{}", "Nothing mapped.".yellow());
        return Ok(());
    }
    let count = assigned.len();
    mapping::update_mapping(&assigned)?;
    println!("{count} mappings saved");
    Ok(())
}
