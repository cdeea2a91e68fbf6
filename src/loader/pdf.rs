//! PDFテキスト抽出

use crate::error::{AppError, Result};

/// PDFバイト列から全ページのテキストを取り出す
pub fn extract_pdf_text(data: &[u8]) -> Result<String> {
    // 一部のフォントでpdf-extractがpanicするため、エラーとして扱う
    let text = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data))
        .map_err(|_| AppError::PdfExtract("PDFの解析中に異常終了しました".into()))?
        .map_err(|e| AppError::PdfExtract(e.to_string()))?;

    // NUL文字と空行を除去
    let text = text
        .replace('\0', "")
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    tracing::debug!("PDFから{}文字を抽出", text.chars().count());
    Ok(text)
}

/// 先頭n文字（文字単位）を取り出す
pub fn preview(text: &str, chars: usize) -> String {
    text.chars().take(chars).collect()
}
