use clap::{Parser, Subcommand};
use quotation_engine::cli;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quote")]
#[command(about = "Itemized price quotations with Excel export and import.")]
#[command(long_about = "Quote - itemized price quotations
Area in Sq.ft | Price per Sq.ft | GST 18% | Excel round-trip

COMMANDS:
  export   - Draft YAML to Excel (.xlsx)
  import   - Excel (.xlsx) back to a quotation (optional YAML/JSON snapshot)
  summary  - Print items and totals of a draft or workbook

EXAMPLES:
  quote export villa.yaml                      # Quotation_Villa_Windows_<date>.xlsx
  quote import Quotation_Villa_2026-10-17.xlsx -o villa.snapshot.yaml
  quote summary villa.yaml")]
#[command(version)]
struct Cli {
    /// Show debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Export a quotation draft to Excel .xlsx.

The workbook has two sheets:
  Customer Details - project, customer, GSTIN, contact, generation date
  Quotation        - one row per item, then Subtotal, GST (18%),
                     Transportation (when set) and Total Amount

All amounts are written as numbers so a later import is exact.

EXAMPLE:
  quote export villa.yaml -o villa.xlsx")]
    /// Export a draft YAML quotation to Excel .xlsx
    Export {
        /// Path to draft YAML file
        input: PathBuf,

        /// Output Excel file path (default: Quotation_<project>_<date>.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for the default output filename
        #[arg(long, env = "QUOTE_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,
    },

    #[command(long_about = "Import a quotation workbook.

Rows of the Quotation sheet whose first cell is a number are items; they
are renumbered 1..N in sheet order. Summary rows are skipped.

EXAMPLE:
  quote import Quotation_Villa_2026-10-17.xlsx -o villa.json")]
    /// Import an Excel .xlsx quotation
    Import {
        /// Path to Excel file (.xlsx)
        input: PathBuf,

        /// Write a snapshot (.yaml or .json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print items and totals of a draft (.yaml) or workbook (.xlsx)
    Summary {
        /// Path to draft YAML or Excel file
        input: PathBuf,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "quote=debug,quotation_engine=debug"
    } else {
        "quote=warn,quotation_engine=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Export {
            input,
            output,
            output_dir,
        } => {
            cli::export(input, output, output_dir, cli.verbose)?;
        }

        Commands::Import { input, output } => cli::import(input, output, cli.verbose).await?,

        Commands::Summary { input, json } => cli::summary(input, json).await?,
    }

    Ok(())
}
