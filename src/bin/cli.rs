use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use dialoguer::Select;
use dotenvy::dotenv;
use orgdeck::cli;
use orgdeck::logging::init_cli_logging;
use orgdeck::store::AccessDataset;
use orgdeck_config::AccessConfig;
use orgdeck_models::AccessGroup;

#[derive(Parser)]
#[command(name = "orgdeck-cli")]
#[command(about = "orgdeck CLI - Inspect and edit role access groups", long_about = None)]
struct Cli {
    /// Dataset JSON file (defaults to the built-in dataset)
    #[arg(short = 'd', long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List permission categories and their actions
    Categories,
    /// Show the access group of each category for one or all roles
    Matrix {
        /// Role name (case-insensitive)
        #[arg(short = 'r', long)]
        role: Option<String>,
    },
    /// Set the access group of a role for one category
    Apply {
        /// Role name (case-insensitive)
        #[arg(short = 'r', long)]
        role: String,

        /// Permission category
        #[arg(short = 'c', long)]
        category: String,

        /// full, readwrite, readonly or none (prompted if omitted)
        #[arg(short = 'g', long)]
        group: Option<AccessGroup>,

        /// Write the updated dataset here
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Write the dataset as JSON
    Export {
        #[arg(short = 'o', long)]
        output: PathBuf,
    },
}

fn main() {
    dotenv().ok();
    init_cli_logging();

    let args = Cli::parse();
    let config = AccessConfig::from_env();

    if let Err(e) = run(args, &config) {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Cli, config: &AccessConfig) -> Result<()> {
    let mut dataset = cli::load_dataset(args.data.as_deref())?;

    match args.command {
        Commands::Categories => print!("{}", cli::render_categories(&dataset)),
        Commands::Matrix { role } => {
            print!("{}", cli::render_matrix(&dataset, role.as_deref(), config)?)
        }
        Commands::Apply {
            role,
            category,
            group,
            output,
        } => {
            let group = match group {
                Some(group) => group,
                None => prompt_group(&category)?,
            };
            let change = cli::apply_access(&mut dataset, &role, &category, group, config)?;
            print!("{}", cli::render_change(&change));
            println!();
            print!("{}", cli::render_matrix(&dataset, Some(&role), config)?);

            if let Some(output) = output {
                write_and_report(&dataset, &output)?;
            }
        }
        Commands::Export { output } => write_and_report(&dataset, &output)?,
    }

    Ok(())
}

fn prompt_group(category: &str) -> Result<AccessGroup> {
    let labels: Vec<&str> = AccessGroup::ALL.iter().map(|g| g.label()).collect();
    let index = Select::new()
        .with_prompt(format!("Access for '{category}'"))
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(AccessGroup::ALL[index])
}

fn write_and_report(dataset: &AccessDataset, output: &Path) -> Result<()> {
    cli::write_dataset(dataset, output)?;
    println!("✅ Dataset written to {}", output.display());
    Ok(())
}
