use std::path::PathBuf;

use crate::cli::analyze_file;
use crate::error::Result;
use crate::export;
use crate::reports;
use crate::settings::get_data_dir;

fn default_paths() -> (PathBuf, PathBuf) {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
    let dir = get_data_dir().join("exports");
    (
        dir.join(format!("expense-report-{stamp}.csv")),
        dir.join(format!("expense-summary-{stamp}.csv")),
    )
}

pub fn run(file: &str, output: Option<&str>) -> Result<()> {
    let analysis = analyze_file(file)?;
    let summary = reports::summarize(&analysis.transactions);
    let monthly = reports::monthly_spend(&analysis.transactions);

    let (register_path, summary_path) = match output {
        Some(path) => {
            let register = PathBuf::from(path);
            let summary_path = register.with_extension("summary.csv");
            (register, summary_path)
        }
        None => default_paths(),
    };

    export::write_register_csv(&analysis.transactions, &register_path)?;
    export::write_summary_csv(&summary, &monthly, &summary_path)?;

    println!("Wrote {}", register_path.display());
    println!("Wrote {}", summary_path.display());
    Ok(())
}
