//! サイドバーのファイル読込

use axum::{
    extract::{Multipart, State},
    response::Redirect,
};

use crate::error::{AppError, Result};
use crate::loader::{self, Dataset, FileKind, Loaded};
use crate::server::session::SessionToken;
use crate::server::state::{AppState, Notice, NoticeLevel};

/// POST /upload
///
/// `csv` 欄のCSV/Excelはこのセッションの表示データを置き換え、`pdf` 欄のPDFは抽出テキストを置き換える。
/// 読み込みに失敗した場合は元のデータのまま。
pub async fn upload(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    mut multipart: Multipart,
) -> Result<Redirect> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        let file_name = field.file_name().unwrap_or("").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        // ファイル未選択の欄
        if file_name.is_empty() && data.is_empty() {
            continue;
        }

        let notice = match name.as_str() {
            "csv" => load_table(&state, &token, &file_name, &data),
            "pdf" => load_pdf(&state, &token, &file_name, &data),
            other => {
                tracing::debug!("不明なフィールドを無視: {}", other);
                continue;
            }
        };
        state.push_notice(&token, notice);
    }

    Ok(Redirect::to("/"))
}

fn load_table(state: &AppState, token: &str, file_name: &str, data: &[u8]) -> Notice {
    let loaded = match FileKind::from_file_name(file_name) {
        Some(FileKind::Csv | FileKind::Xlsx) => loader::load_bytes(file_name, data),
        _ => Err(AppError::UnsupportedFile(file_name.to_string())),
    };

    match loaded {
        Ok(Loaded::Table(table)) => {
            tracing::info!("{}: {}件をアップロード", file_name, table.len());
            state.set_uploaded_dataset(token, Dataset::from_table(table, file_name));
            Notice::new(NoticeLevel::Success, "CSVを読み込みました。")
        }
        Ok(Loaded::PdfText(_)) => Notice::new(
            NoticeLevel::Error,
            AppError::UnsupportedFile(file_name.to_string()).to_string(),
        ),
        Err(e) => {
            tracing::warn!("{}: {}", file_name, e);
            Notice::new(NoticeLevel::Error, e.to_string())
        }
    }
}

fn load_pdf(state: &AppState, token: &str, file_name: &str, data: &[u8]) -> Notice {
    let loaded = match FileKind::from_file_name(file_name) {
        Some(FileKind::Pdf) => loader::extract_pdf_text(data),
        _ => Err(AppError::UnsupportedFile(file_name.to_string())),
    };

    match loaded {
        Ok(text) => {
            tracing::info!("{}: PDFをアップロード", file_name);
            state.set_uploaded_pdf(token, text);
            Notice::new(NoticeLevel::Success, "PDFを読み込みました。")
        }
        Err(e) => {
            tracing::warn!("{}: {}", file_name, e);
            Notice::new(NoticeLevel::Error, e.to_string())
        }
    }
}
