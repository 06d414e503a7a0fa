mod categorizer;
mod cli;
mod error;
mod export;
mod fmt;
mod mapping;
mod models;
mod parser;
mod reports;
mod settings;
mod standardizer;

use clap::Parser;

use cli::{Cli, Commands, MappingsCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Analyze { file } => cli::analyze::run(&file),
        Commands::Dashboard { file } => cli::dashboard::run(&file),
        Commands::Export { file, output } => cli::export::run(&file, output.as_deref()),
        Commands::Review { file } => cli::review::run(&file),
        Commands::Mappings { command } => match command {
            MappingsCommands::Add { name, category } => cli::mappings::add(&name, &category),
            MappingsCommands::List => cli::mappings::list(),
            MappingsCommands::Remove { name } => cli::mappings::remove(&name),
        },
        Commands::Categories => cli::categories::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
