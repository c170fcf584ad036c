use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};
use rust_xlsxwriter::Workbook;

use crate::cli::OutputType;
use crate::report::{Cell, ReportTable};

const SHEET_NAME: &str = "Sheet1";
const SQLITE_TABLE: &str = "report";

/// `<input file name>.<extension>` next to the input file.
pub fn output_path(input: &Path, output_type: OutputType) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".");
    name.push(output_type.extension());
    PathBuf::from(name)
}

pub fn write_report(input: &Path, output_type: OutputType, table: &ReportTable) -> Result<PathBuf> {
    let path = output_path(input, output_type);
    match output_type {
        OutputType::Csv => write_delimited(&path, table)?,
        OutputType::Excel => write_spreadsheet(&path, table)?,
        OutputType::Sqlite => write_sqlite(&path, table)?,
    }
    Ok(path)
}

pub fn write_delimited(path: &Path, table: &ReportTable) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    writer
        .write_record(&table.columns)
        .with_context(|| format!("failed to write header to {}", path.display()))?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(|cell| cell.to_string()))
            .with_context(|| format!("failed to write row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(())
}

pub fn write_spreadsheet(path: &Path, table: &ReportTable) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .context("failed to name worksheet")?;

    for (col, column) in table.columns.iter().enumerate() {
        let col = u16::try_from(col).context("too many report columns for a worksheet")?;
        worksheet
            .write_string(0, col, column)
            .with_context(|| format!("failed to write header cell {column}"))?;
    }

    for (index, row) in table.rows.iter().enumerate() {
        let sheet_row =
            u32::try_from(index + 1).context("too many report rows for a worksheet")?;
        for (col, cell) in row.iter().enumerate() {
            let col = u16::try_from(col).context("too many report columns for a worksheet")?;
            match cell {
                Cell::Text(value) => worksheet.write_string(sheet_row, col, value),
                Cell::Integer(value) => worksheet.write_number(sheet_row, col, *value as f64),
                Cell::Number(value) => worksheet.write_number(sheet_row, col, *value),
            }
            .with_context(|| format!("failed to write cell ({sheet_row}, {col})"))?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("failed to save {}", path.display()))?;
    Ok(())
}

pub fn write_sqlite(path: &Path, table: &ReportTable) -> Result<()> {
    let mut connection = Connection::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let column_defs = table
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| format!("\"{column}\" {}", sqlite_type(table, index)))
        .collect::<Vec<String>>()
        .join(", ");
    connection
        .execute_batch(&format!(
            "DROP TABLE IF EXISTS {SQLITE_TABLE};
             CREATE TABLE {SQLITE_TABLE} ({column_defs});"
        ))
        .with_context(|| format!("failed to create report table in {}", path.display()))?;

    let placeholders = (1..=table.columns.len())
        .map(|index| format!("?{index}"))
        .collect::<Vec<String>>()
        .join(", ");
    let insert = format!("INSERT INTO {SQLITE_TABLE} VALUES ({placeholders})");

    let tx = connection
        .transaction()
        .context("failed to start report transaction")?;
    {
        let mut statement = tx
            .prepare(&insert)
            .context("failed to prepare report insert")?;
        for row in &table.rows {
            statement
                .execute(params_from_iter(row.iter().map(sqlite_value)))
                .context("failed to insert report row")?;
        }
    }
    tx.commit().context("failed to commit report rows")?;
    Ok(())
}

fn sqlite_type(table: &ReportTable, index: usize) -> &'static str {
    match table.rows.first().and_then(|row| row.get(index)) {
        Some(Cell::Integer(_)) => "INTEGER",
        Some(Cell::Number(_)) => "REAL",
        _ => "TEXT",
    }
}

fn sqlite_value(cell: &Cell) -> Value {
    match cell {
        Cell::Text(value) => Value::Text(value.clone()),
        Cell::Integer(value) => Value::Integer(*value),
        Cell::Number(value) => Value::Real(*value),
    }
}
