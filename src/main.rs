use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use gv_invoice::gateway::PersistenceGateway;
use gv_invoice::invoice::Category;
use gv_invoice::workbook::{self, default_data_dir, CellData, WorkbookLocator};

/// gv-invoice: daily invoice workbooks for Patti, Kata and Barthe entries.
///
/// Persists invoice line items into one Excel workbook per calendar day,
/// with one sheet per business category. The desktop entry form talks to
/// the same gateway this CLI drives.
#[derive(Debug, Parser)]
struct Args {
    /// Directory holding the daily workbook files.
    #[arg(long, env = "GV_INVOICE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Save one invoice from a request JSON ({"category":..., "invoice":...}).
    ///
    /// Reads the request from the given file, or from stdin when no file is
    /// given, and prints the gateway response. The exit code is nonzero
    /// when the gateway rejects the request or the save fails.
    Save {
        /// Path of the request JSON file; stdin when omitted.
        file: Option<PathBuf>,
    },
    /// List the sheets of a day's workbook.
    Sheets {
        /// Calendar day, e.g. 2024-06-01.
        date: NaiveDate,
    },
    /// Print the rows of one sheet of a day's workbook.
    Show {
        date: NaiveDate,
        category: String,
    },
    /// Print the data directory that holds the workbooks.
    DataDir,
}

fn main() -> ExitCode {
    init_logger();

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    match run(&args.command, data_dir) {
        Ok(code) => code,
        Err(e) => {
            error!("exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logger() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: &Command, data_dir: PathBuf) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match command {
        Command::Save { file } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            let request: serde_json::Value = serde_json::from_str(&text)?;

            let gateway = PersistenceGateway::new(data_dir);
            let response = gateway.save(&request);
            println!("{}", serde_json::to_string_pretty(&response)?);

            Ok(if response.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Command::Sheets { date } => {
            let path = WorkbookLocator::new(data_dir).locate(*date);
            for sheet in workbook::sheet_overview(&path)? {
                println!(
                    "{}: {} rows x {} cols",
                    sheet.name, sheet.row_count, sheet.col_count
                );
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Show { date, category } => {
            let category = Category::parse(category)
                .ok_or_else(|| format!("unknown category '{category}'"))?;
            let path = WorkbookLocator::new(data_dir).locate(*date);
            for row in workbook::read_rows(&path, category.sheet_name())? {
                let line: Vec<String> = row.iter().map(cell_to_string).collect();
                println!("{}", line.join("\t"));
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::DataDir => {
            println!("{}", data_dir.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cell_to_string(cell: &CellData) -> String {
    match cell {
        CellData::Empty => String::new(),
        CellData::Text(s) => s.clone(),
        CellData::Number(n) => format!("{n:.2}"),
    }
}
