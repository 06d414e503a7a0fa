use comfy_table::{Cell, Table};

use crate::error::{KhataError, Result};
use crate::mapping;

pub fn add(name: &str, category: &str) -> Result<()> {
    let mut partial = mapping::Mapping::new();
    partial.insert(name.to_string(), category.to_string());
    mapping::update_mapping(&partial)?;
    println!("Mapped '{name}' \u{2192} {category}");
    Ok(())
}

pub fn list() -> Result<()> {
    let mapping = mapping::load_mapping();
    if mapping.is_empty() {
        println!("No mapping overrides saved.");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["Payee", "Category"]);
    for (name, category) in &mapping {
        table.add_row(vec![Cell::new(name), Cell::new(category)]);
    }
    println!("Mappings\n{table}");
    Ok(())
}

pub fn remove(name: &str) -> Result<()> {
    let mut mapping = mapping::load_mapping();
    if mapping.remove(name).is_none() {
        return Err(KhataError::Other(format!("no mapping for '{name}'")));
    }
    mapping::save_mapping(&mapping)?;
    println!("Removed mapping for '{name}'");
    Ok(())
}
