mod pdf;
mod table;

pub use pdf::{extract_pdf_text, preview};
pub use table::{load_csv, load_xlsx};

use crate::error::{AppError, Result};
use needs_match_common::Table;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 読み込み対象のファイル種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Xlsx,
    Pdf,
}

impl FileKind {
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "csv" => Some(FileKind::Csv),
            "xlsx" | "xlsm" | "xls" => Some(FileKind::Xlsx),
            "pdf" => Some(FileKind::Pdf),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub file_name: String,
    pub kind: FileKind,
}

/// 読み込み済みデータ一式
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub table: Table,
    /// PDF抽出テキスト（複数ファイルは連結）
    pub pdf_text: String,
    /// 読み込んだファイル名
    pub sources: Vec<String>,
    /// 読み込みに失敗したファイルの警告
    pub warnings: Vec<String>,
}

impl Dataset {
    pub fn from_table(table: Table, source: impl Into<String>) -> Self {
        Self {
            table,
            sources: vec![source.into()],
            ..Default::default()
        }
    }
}

/// 1ファイル分の読み込み結果
#[derive(Debug)]
pub enum Loaded {
    Table(Table),
    PdfText(String),
}

/// フォルダ直下のCSV/Excel/PDFを列挙（ファイル名順）
pub fn scan_folder(folder: &Path) -> Result<Vec<SourceFile>> {
    if !folder.is_dir() {
        return Err(AppError::FolderNotFound(folder.display().to_string()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if let Some(kind) = FileKind::from_file_name(&file_name) {
            files.push(SourceFile {
                path: path.to_path_buf(),
                file_name,
                kind,
            });
        }
    }

    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(files)
}

/// ファイル名から形式を判定してバイト列を読み込む
pub fn load_bytes(file_name: &str, data: &[u8]) -> Result<Loaded> {
    match FileKind::from_file_name(file_name) {
        Some(FileKind::Csv) => Ok(Loaded::Table(load_csv(data)?)),
        Some(FileKind::Xlsx) => Ok(Loaded::Table(load_xlsx(data)?)),
        Some(FileKind::Pdf) => Ok(Loaded::PdfText(extract_pdf_text(data)?)),
        None => Err(AppError::UnsupportedFile(file_name.to_string())),
    }
}

/// フォルダ内のファイルをすべて読み込む
///
/// 読み込めなかったファイルは飛ばして警告に残す。フォルダが無い場合も空のデータを返す。
pub fn load_dataset(folder: &Path) -> Dataset {
    let mut dataset = Dataset::default();

    let files = match scan_folder(folder) {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!("{}", e);
            dataset.warnings.push(e.to_string());
            return dataset;
        }
    };

    for file in files {
        let loaded = std::fs::read(&file.path)
            .map_err(AppError::from)
            .and_then(|data| load_bytes(&file.file_name, &data));

        match loaded {
            Ok(Loaded::Table(table)) => {
                tracing::info!("{}: {}件を読み込み", file.file_name, table.len());
                dataset.table.append(table);
            }
            Ok(Loaded::PdfText(text)) => {
                tracing::info!("{}: PDFテキストを読み込み", file.file_name);
                if !dataset.pdf_text.is_empty() && !text.is_empty() {
                    dataset.pdf_text.push('\n');
                }
                dataset.pdf_text.push_str(&text);
            }
            Err(e) => {
                tracing::warn!("{}の読み込みに失敗: {}", file.file_name, e);
                dataset.warnings.push(format!("{}: {}", file.file_name, e));
                continue;
            }
        }
        dataset.sources.push(file.file_name);
    }

    dataset
}
