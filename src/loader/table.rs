//! CSV/Excelの読み込み
//!
//! 1行目を見出しとし、残りの行をすべて Record にする。

use crate::error::{AppError, Result};
use calamine::{Data, Reader};
use needs_match_common::Table;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSVバイト列を表に変換
pub fn load_csv(data: &[u8]) -> Result<Table> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::from_rows(headers, rows)?)
}

/// Excelバイト列（先頭シート）を表に変換
pub fn load_xlsx(data: &[u8]) -> Result<Table> {
    let cursor = std::io::Cursor::new(data);
    let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
        .map_err(|e| AppError::Excel(e.to_string()))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AppError::Excel("シートがありません".into()))?;

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| AppError::Excel(format!("{}: {}", sheet, e)))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(cell_to_string).collect(),
        None => Vec::new(),
    };
    let rows: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(Table::from_rows(headers, rows)?)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        // 番号列などの整数値は "1.0" ではなく "1" と表示する
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
