//! wc-image-alt - WooCommerce image alt text export/import
//!
//! `export-all` writes every product image to a CSV with a suggested alt text;
//! `import` pushes the (edited) alt text back, one update per product.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use wc_image_alt::config::DEFAULT_CSV_FILE;
use wc_image_alt::display::{format_rows_table, format_update, format_write_outcomes};
use wc_image_alt::{
    prepare_import, push_updates, run_export, Config, Error, ImportOptions, Result, WooCommerceApi,
};

/// Export and import WooCommerce product image alt text via CSV
#[derive(Parser, Debug)]
#[command(name = "wc-image-alt")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Skip the confirmation prompt (ignored in production environments)
    #[arg(short, long, global = true, default_value_t = false)]
    force: bool,

    /// Send updates to WooCommerce (import is a dry run without this)
    #[arg(short, long, global = true, default_value_t = false)]
    write: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export all product images with current and suggested alt text
    ExportAll(ExportArgs),
    /// Push alt text from the CSV back to WooCommerce
    Import(ImportArgs),
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Fetch at most this many products in one request (0 = all pages)
    #[arg(short = 'n', long, default_value_t = 0)]
    rows: u32,

    /// CSV file to write
    #[arg(short, long, default_value = DEFAULT_CSV_FILE)]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct ImportArgs {
    /// Also set each image title to its alt text
    #[arg(long, default_value_t = false)]
    replace_title: bool,

    /// Only process the first N rows (0 = all rows)
    #[arg(short = 'n', long, default_value_t = 0)]
    rows: usize,

    /// CSV file to read
    #[arg(short, long, default_value = DEFAULT_CSV_FILE)]
    input: PathBuf,
}

fn main() {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::debug!("force={} write={}", cli.force, cli.write);

    if let Err(e) = run(cli) {
        match e {
            Error::Declined => println!("Goodbye"),
            other => {
                log::error!("{other}");
                eprintln!("Error: {other}");
            }
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::ExportAll(ref args) => execute_export(&cli, args),
        Command::Import(ref args) => execute_import(&cli, args),
    }
}

/// Production shops never skip the prompt
fn effective_force(cli: &Cli, config: &Config) -> bool {
    if cli.force && config.production {
        log::warn!("Production environment, --force ignored");
        return false;
    }
    cli.force
}

fn execute_export(cli: &Cli, args: &ExportArgs) -> Result<()> {
    let config = Config::from_env()?;
    confirm(
        &format!("Querying {} - continue?", config.url),
        effective_force(cli, &config),
    )?;
    println!("Getting products from WooCommerce");

    let api = WooCommerceApi::new(&config)?;
    let limit = (args.rows > 0).then_some(args.rows);
    let summary = run_export(&api, limit, &args.output)?;

    print!("{}", format_rows_table(&summary.rows));
    println!("{} products returned", summary.products);
    println!("Exported to {}", summary.output.display());
    Ok(())
}

fn execute_import(cli: &Cli, args: &ImportArgs) -> Result<()> {
    let options = ImportOptions {
        replace_title: args.replace_title,
        row_limit: (args.rows > 0).then_some(args.rows),
    };
    let plan = prepare_import(&args.input, &options)?;
    print!("{}", format_update(&plan.update));

    if !cli.write {
        println!("Dry run: nothing sent. Pass --write to update WooCommerce.");
        return Ok(());
    }
    if plan.update.is_empty() {
        println!("Nothing to update");
        return Ok(());
    }

    let config = Config::from_env()?;
    confirm(
        &format!(
            "Updating {} products on {} - continue?",
            plan.update.len(),
            config.url
        ),
        effective_force(cli, &config),
    )?;

    let api = WooCommerceApi::new(&config)?;
    let outcomes = push_updates(&api, &plan.update)?;
    print!("{}", format_write_outcomes(&outcomes));
    Ok(())
}

/// Asks a yes/no question on stdin unless `force` is set
fn confirm(prompt: &str, force: bool) -> Result<()> {
    if force {
        return Ok(());
    }

    print!("{prompt} [y/N]: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    if is_yes(&answer) {
        Ok(())
    } else {
        Err(Error::Declined)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
