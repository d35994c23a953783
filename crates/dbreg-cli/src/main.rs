//! Database Registry Manager CLI
//!
//! The command-line interface for the registry of analysis databases.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use dbreg_core::TreeViewOptions;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!("Verbose mode enabled");
        }
    }

    let Some(command) = cli.command else {
        println!("{} Database Registry Manager CLI", "dbreg".green().bold());
        println!();
        println!("Run {} for available commands.", "dbreg --help".cyan());
        return Ok(());
    };

    let options = match &command {
        Commands::Show {
            no_system_lists, ..
        } => TreeViewOptions {
            show_system_defined_lists: !no_system_lists,
        },
        _ => TreeViewOptions::default(),
    };
    let manager = commands::open_manager(cli.config_dir, options)?;

    match command {
        Commands::Show { json, .. } => commands::run_show(&manager, json),
        Commands::Add { action } => commands::run_add(&manager, action),
        Commands::Remove { action } => commands::run_remove(&manager, action),
        Commands::RenameList {
            current_name,
            new_name,
            local,
        } => commands::run_rename_list(&manager, &current_name, &new_name, local),
        Commands::RenameDb {
            current_name,
            new_name,
            list,
        } => commands::run_rename_db(&manager, &current_name, &new_name, list.as_deref()),
        Commands::Select { action } => commands::run_select(&manager, action),
        Commands::Expand { target } => commands::run_expand(&manager, target, true),
        Commands::Collapse { target } => commands::run_expand(&manager, target, false),
    }
}
