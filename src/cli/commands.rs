use crate::batch::{discover_xml_files, run_batch};
use crate::config::{ConvertConfig, CsvConfig, FormatConfig, SheetsConfig};
use crate::core::{duplicate_counts, TableBuilder};
use crate::error::{TabError, TabResult};
use crate::excel::SpreadsheetReader;
use crate::files::{replace_with, validate_input};
use crate::formatter::format_xml_file;
use crate::types::TableMode;
use crate::writer::{write_csv, write_data_table};
use colored::Colorize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

const XLSX_EXTENSION: &str = ".xlsx";
const CSV_EXTENSION: &str = ".csv";

/// Execute the xlsx-to-xml command
pub fn xlsx_to_xml(config: ConvertConfig) -> TabResult<()> {
    validate_input(&config.path, XLSX_EXTENSION, "Excel")?;

    let mut reader = SpreadsheetReader::open(&config.path)?;
    let rows = reader.rows(config.sheet.as_deref())?;
    let document = TableBuilder::new(TableMode::Spreadsheet).build_rows(rows)?;
    debug!(
        columns = document.headers.len(),
        rows = document.row_count(),
        "Built DataTable"
    );

    match &config.output {
        Some(output) => {
            let file = File::create(output).map_err(|source| TabError::WriteFile {
                path: output.clone(),
                source,
            })?;
            let mut out = BufWriter::new(file);
            write_data_table(&document, &mut out)?;
            writeln!(out)
                .and_then(|_| out.flush())
                .map_err(|source| TabError::WriteFile {
                    path: output.clone(),
                    source,
                })?;

            eprintln!(
                "{} {} rows → {}",
                "✅ Converted".bold().green(),
                document.row_count(),
                output.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_data_table(&document, &mut out).map_err(into_stdout_error)?;
            writeln!(out)
                .and_then(|_| out.flush())
                .map_err(TabError::Stdout)?;
        }
    }

    Ok(())
}

// Broken pipes and the like surface as plain I/O errors from the XML writer
fn into_stdout_error(err: TabError) -> TabError {
    match err {
        TabError::Io(source) => TabError::Stdout(source),
        other => other,
    }
}

/// Execute the sheets command
pub fn sheets(config: SheetsConfig) -> TabResult<()> {
    validate_input(&config.path, XLSX_EXTENSION, "Excel")?;

    let reader = SpreadsheetReader::open(&config.path)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for name in reader.sheet_names() {
        writeln!(out, "{name}").map_err(TabError::Stdout)?;
    }
    out.flush().map_err(TabError::Stdout)?;
    Ok(())
}

/// Execute the csv-rename-dupes command
pub fn csv_rename_dupes(config: CsvConfig) -> TabResult<()> {
    validate_input(&config.path, CSV_EXTENSION, "CSV")?;

    let records = read_csv_records(&config.path, csv::Trim::None)?;
    let renamed = records
        .first()
        .map(|header| duplicate_counts(header).len())
        .unwrap_or(0);

    let document = TableBuilder::new(TableMode::Csv).build_rows(records)?;
    replace_with(&config.path, |out| write_csv(&document, out))?;

    if renamed == 0 {
        eprintln!("{}", "✅ No duplicate headers found".green());
    } else {
        eprintln!(
            "{} {} duplicated header(s) in {}",
            "✅ Renamed".bold().green(),
            renamed,
            config.path.display()
        );
    }
    Ok(())
}

/// Execute the csv-trim command
pub fn csv_trim(config: CsvConfig) -> TabResult<()> {
    validate_input(&config.path, CSV_EXTENSION, "CSV")?;

    let records = read_csv_records(&config.path, csv::Trim::All)?;
    replace_with(&config.path, |out| {
        let mut writer = csv::Writer::from_writer(out);
        for record in &records {
            writer.write_record(record)?;
        }
        writer.flush()?;
        Ok(())
    })?;

    eprintln!(
        "{} {} rows in {}",
        "✅ Trimmed".bold().green(),
        records.len(),
        config.path.display()
    );
    Ok(())
}

/// Every record of a CSV file, header row included.
/// Records of differing lengths are a parse error.
fn read_csv_records(path: &Path, trim: csv::Trim) -> TabResult<Vec<Vec<String>>> {
    let file = File::open(path).map_err(|source| TabError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(trim)
        .from_reader(file);

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(String::from).collect());
    }
    debug!(path = %path.display(), records = records.len(), "Read CSV");
    Ok(records)
}

/// Execute the xml-format command
pub fn xml_format(config: FormatConfig) -> TabResult<()> {
    let files = discover_xml_files(&config.path)?;
    if files.is_empty() {
        eprintln!(
            "{}",
            format!("⚠️  No .xml files in {}", config.path.display()).yellow()
        );
        return Ok(());
    }

    let total = files.len();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let outcomes = runtime.block_on(run_batch(files, format_xml_file));

    let failed: Vec<_> = outcomes.into_iter().filter(|o| !o.is_ok()).collect();
    let formatted = total - failed.len();

    if failed.is_empty() {
        eprintln!(
            "{} {} file(s)",
            "✅ Formatted".bold().green(),
            formatted
        );
        return Ok(());
    }

    for outcome in &failed {
        if let Err(e) = &outcome.result {
            eprintln!(
                "{} {}: {}",
                "❌".red(),
                outcome.path.display().to_string().bright_red(),
                e
            );
        }
    }
    eprintln!("   {} file(s) formatted", formatted);

    Err(TabError::BatchFailed {
        failed: failed.len(),
        total,
    })
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
