pub mod docx;

pub use docx::{extract_paragraphs, generate, Block, Report, DOCX_MIME};

/// ダウンロード時のファイル名
pub const OUTPUT_FILE_NAME: &str = "output.docx";
