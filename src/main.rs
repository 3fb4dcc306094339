use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tabkit::cli;
use tabkit::config::{resolve_input, ConvertConfig, CsvConfig, FormatConfig, SheetsConfig};
use tabkit::error::TabResult;
use tabkit::logging::init_logging;

#[derive(Parser)]
#[command(name = "tabkit")]
#[command(about = "Convert and clean up spreadsheet, CSV and XML files")]
#[command(long_about = "tabkit - small tools for tabular and XML data files

COMMANDS:
  xlsx-to-xml       - Convert one sheet of an .xlsx workbook to an XML DataTable
  sheets            - List the sheet names of an .xlsx workbook
  csv-rename-dupes  - Rename duplicate CSV header columns (Name, Name_2, ...)
  csv-trim          - Trim whitespace around every CSV field
  xml-format        - Re-indent .xml files in place, one task per file

INPUT:
  Every command takes --path. Without it, one path is read from stdin
  when stdin is piped:
    echo report.xlsx | tabkit xlsx-to-xml

EXIT CODES:
  0 success        1 read file      2 write file     3 read/write
  4 move file      5 stdin          6 stdout         7 no input
  8 no such file   9 wrong type     10 parse error

EXAMPLES:
  tabkit xlsx-to-xml --path orders.xlsx --sheet Q3 > orders.xml
  tabkit csv-rename-dupes --path export.csv
  tabkit xml-format --path ./feeds

Set RUST_LOG (e.g. RUST_LOG=tabkit=debug) to override the log level.")]
#[command(version)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Convert one worksheet of an .xlsx workbook to an XML DataTable.

The first row holds the column names. Duplicate names get a numeric suffix
(Name, Name_2, ...), then every name is made a valid element name: names
with spaces are title-cased and joined, and punctuation is removed.

Date-like text values (01-02-06, 1/2/06 15:04, ...) and date cells are
written as YYYY-MM-DD HH:MM:SS. Everything else is copied as shown.

OUTPUT:
  <DataTable>
    <Row>
      <OrderId>1</OrderId>
      <Shipped>2006-01-02 00:00:00</Shipped>
    </Row>
  </DataTable>")]
    /// Convert an .xlsx sheet to an XML DataTable
    XlsxToXml {
        /// Path to the Excel file (.xlsx)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Sheet to convert (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Write XML to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the sheet names of an .xlsx workbook
    Sheets {
        /// Path to the Excel file (.xlsx)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    #[command(long_about = "Rename duplicate header columns of a CSV file in place.

Each repeated name gets _<n> appended, where n counts its occurrences:
  Name,Age,Name,Name  ->  Name,Age,Name_2,Name_3

Data rows are written back unchanged. All rows must have the same
number of fields, otherwise the file is left untouched.")]
    /// Rename duplicate CSV header columns
    CsvRenameDupes {
        /// Path to the CSV file
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Trim whitespace around every CSV field, header included
    CsvTrim {
        /// Path to the CSV file
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    #[command(long_about = "Re-indent XML files in place.

Takes a single .xml file or a directory; every *.xml entry of the directory
is formatted (subdirectories are not searched). Files are processed
concurrently and a malformed file never stops the others.

Each line starts with one space, followed by one tab per nesting level.
Text, comments and attributes are kept as they are.

Exits with code 10 if any file could not be formatted.")]
    /// Re-indent XML files in place
    XmlFormat {
        /// An .xml file or a directory of them
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

fn run(command: Commands) -> TabResult<()> {
    match command {
        Commands::XlsxToXml {
            path,
            sheet,
            output,
        } => cli::xlsx_to_xml(ConvertConfig {
            path: resolve_input(path)?,
            sheet,
            output,
        }),

        Commands::Sheets { path } => cli::sheets(SheetsConfig {
            path: resolve_input(path)?,
        }),

        Commands::CsvRenameDupes { path } => cli::csv_rename_dupes(CsvConfig {
            path: resolve_input(path)?,
        }),

        Commands::CsvTrim { path } => cli::csv_trim(CsvConfig {
            path: resolve_input(path)?,
        }),

        Commands::XmlFormat { path } => cli::xml_format(FormatConfig {
            path: resolve_input(path)?,
        }),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e.exit_code();
            eprintln!("{} (code {}) {}", "error:".red().bold(), code, e);
            ExitCode::from(code)
        }
    }
}
