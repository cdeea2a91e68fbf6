use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("CSV読込エラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel読込エラー: {0}")]
    Excel(String),

    #[error("PDF読込エラー: {0}")]
    PdfExtract(String),

    #[error("未対応のファイル形式です: {0}")]
    UnsupportedFile(String),

    #[error("Word生成エラー: {0}")]
    DocxGeneration(String),

    #[error("アップロードエラー: {0}")]
    Upload(String),

    #[error("画面の描画に失敗: {0}")]
    Template(#[from] askama::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] needs_match_common::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Csv(_)
            | AppError::Excel(_)
            | AppError::PdfExtract(_)
            | AppError::UnsupportedFile(_)
            | AppError::Upload(_)
            | AppError::Common(_) => StatusCode::BAD_REQUEST,
            AppError::FolderNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        let page = ErrorPage { message: self.to_string() };
        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(_) => (status, page.message).into_response(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage {
    message: String,
}
