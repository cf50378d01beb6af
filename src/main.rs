mod encoding;
mod error;
mod fetch;
mod freshness;
mod output;
mod parser;

use std::path::Path;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bankcode", about = "Taiwanese bank/credit-union code scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Refresh banks.json (and banks.js) when the remote page changed
    Update {
        /// Refresh even when the remote page is not newer
        #[arg(long)]
        force: bool,
    },
    /// Report whether the remote page is newer than the local marker
    Check,
    /// Print banks from the local banks.json
    Show {
        /// Filter by category label (e.g. "商業銀行")
        #[arg(short, long)]
        category: Option<String>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Update { force } => {
            let stale = force || freshness::has_new_version().await?;
            if !stale {
                println!("No update needed.");
                return Ok(());
            }
            let banks = refresh().await?;
            println!("Wrote {} bank codes to {}.", banks.len(), output::JSON_PATH);
            Ok(())
        }
        Commands::Check => {
            if freshness::peek_new_version().await? {
                println!("Remote page is newer; artifacts are stale.");
            } else {
                println!("Up to date.");
            }
            Ok(())
        }
        Commands::Show { category, limit } => {
            let banks = output::read_json(Path::new(output::JSON_PATH))?;
            let rows: Vec<_> = banks
                .iter()
                .filter(|b| {
                    category
                        .as_deref()
                        .map_or(true, |c| b.category.label().contains(c))
                })
                .take(limit)
                .collect();
            if rows.is_empty() {
                println!("No banks found. Run 'update' first.");
                return Ok(());
            }

            println!("{:>3} | {:<8} | {:<10} | {}", "#", "Code", "Category", "Name");
            println!("{}", "-".repeat(60));
            for (i, b) in rows.iter().enumerate() {
                println!("{:>3} | {:<8} | {:<10} | {}", i + 1, b.code, b.category, b.name);
            }
            println!("\n{} of {} banks", rows.len(), banks.len());
            Ok(())
        }
    }
}

/// The full refresh pipeline: fetch → decode → parse → write, in strict
/// sequence, each stage consuming the prior's output.
async fn refresh() -> anyhow::Result<Vec<parser::Bank>> {
    let raw = fetch::fetch_page().await?;
    let html = encoding::to_utf8(&raw, encoding::SOURCE_CHARSET)?;
    let banks = parser::parse(&html)?;
    output::write(&banks)?;
    Ok(banks)
}
