//! Wordレポート生成
//!
//! 見出しと段落の並び（Block）を組み立ててから docx-rs で .docx に書き出す。

use crate::error::{AppError, Result};
use crate::loader::preview;
use docx_rs::{Docx, Paragraph, Run, Style, StyleType};
use needs_match_common::Record;
use std::io::Cursor;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const HEADING1: &str = "Heading1";
const HEADING2: &str = "Heading2";

/// 文書の構成要素
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading1(String),
    Heading2(String),
    Paragraph(String),
}

/// レポートの入力
#[derive(Debug, Clone)]
pub struct Report<'a> {
    pub title: String,
    pub generated_at: String,
    pub pdf_text: &'a str,
    pub pdf_preview_chars: usize,
    pub records: Vec<&'a Record>,
    pub row_limit: usize,
}

impl<'a> Report<'a> {
    pub fn new(title: impl Into<String>, records: Vec<&'a Record>, pdf_text: &'a str) -> Self {
        Self {
            title: title.into(),
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            pdf_text,
            pdf_preview_chars: 100,
            records,
            row_limit: 10,
        }
    }

    pub fn with_limits(mut self, pdf_preview_chars: usize, row_limit: usize) -> Self {
        self.pdf_preview_chars = pdf_preview_chars;
        self.row_limit = row_limit;
        self
    }

    /// 文書の中身を組み立てる
    pub fn blocks(&self) -> Vec<Block> {
        let mut blocks = vec![
            Block::Heading1(self.title.clone()),
            Block::Paragraph(format!("■ 生成日時：{}", self.generated_at)),
            Block::Paragraph(format!("■ PDF抽出テキスト（先頭{}文字）：", self.pdf_preview_chars)),
        ];

        let excerpt = preview(self.pdf_text.trim(), self.pdf_preview_chars);
        if excerpt.is_empty() {
            blocks.push(Block::Paragraph("（PDF未読込）".into()));
        } else {
            blocks.extend(excerpt.lines().map(|l| Block::Paragraph(l.to_string())));
        }

        if self.records.is_empty() {
            blocks.push(Block::Paragraph("データがありません。".into()));
            return blocks;
        }

        blocks.push(Block::Heading2("■ データ要約".into()));
        for record in self.records.iter().take(self.row_limit) {
            blocks.push(Block::Paragraph(format!("・{} / {}", record.title(), record.company)));
            if !record.summary.is_empty() {
                blocks.push(Block::Paragraph(format!("  - 要約: {}", record.summary)));
            }
        }

        blocks
    }
}

/// レポートを .docx バイト列にする
pub fn generate(report: &Report<'_>) -> Result<Vec<u8>> {
    let mut docx = Docx::new()
        .add_style(
            Style::new(HEADING1, StyleType::Paragraph)
                .name("Heading 1")
                .size(32)
                .bold(),
        )
        .add_style(
            Style::new(HEADING2, StyleType::Paragraph)
                .name("Heading 2")
                .size(28)
                .bold(),
        );

    for block in report.blocks() {
        let paragraph = match block {
            Block::Heading1(text) => paragraph(&text).style(HEADING1),
            Block::Heading2(text) => paragraph(&text).style(HEADING2),
            Block::Paragraph(text) => paragraph(&text),
        };
        docx = docx.add_paragraph(paragraph);
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| AppError::DocxGeneration(e.to_string()))?;

    let bytes = buf.into_inner();
    tracing::debug!("Wordレポートを生成: {} bytes", bytes.len());
    Ok(bytes)
}

fn paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

/// .docx を読み戻して段落ごとのテキストを返す
pub fn extract_paragraphs(data: &[u8]) -> Result<Vec<String>> {
    let doc = docx_rs::read_docx(data)
        .map_err(|e| AppError::DocxGeneration(format!("読み戻しエラー: {}", e)))?;

    let mut paragraphs = Vec::new();
    for child in doc.document.children {
        if let docx_rs::DocumentChild::Paragraph(p) = child {
            let mut text = String::new();
            for child in p.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for child in run.children {
                        if let docx_rs::RunChild::Text(t) = child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            paragraphs.push(text);
        }
    }

    Ok(paragraphs)
}
