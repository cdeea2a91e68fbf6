//! エラーケーステスト

use needs_match::error::AppError;
use needs_match::loader;
use std::path::Path;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = loader::scan_folder(Path::new("/nonexistent/path/12345"));
    let err = result.unwrap_err();
    assert!(matches!(err, AppError::FolderNotFound(_)));
}

/// 見出しのないCSV
#[test]
fn test_csv_without_header() {
    let err = loader::load_csv(b"").unwrap_err();
    assert!(matches!(err, AppError::Common(_)));
}

/// AppErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        AppError::Config("テスト設定エラー".to_string()),
        AppError::FolderNotFound("/path/to/folder".to_string()),
        AppError::Excel("壊れたブック".to_string()),
        AppError::PdfExtract("壊れたPDF".to_string()),
        AppError::UnsupportedFile("a.png".to_string()),
        AppError::DocxGeneration("Word生成エラー".to_string()),
        AppError::Upload("切断".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: AppError = io_err.into();

    assert!(matches!(err, AppError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = needs_match_common::Error::MissingHeader("見出し行が空です".to_string());
    let err: AppError = common_err.into();

    assert!(matches!(err, AppError::Common(_)));
    assert_eq!(format!("{}", err), "見出しがありません: 見出し行が空です");
}
