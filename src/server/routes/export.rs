//! Word出力

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Form,
};
use needs_match_common::{search, Record, SearchCriteria};

use crate::error::Result;
use crate::export::{self, Report, DOCX_MIME, OUTPUT_FILE_NAME};
use crate::server::session::SessionToken;
use crate::server::state::AppState;

/// POST /export
///
/// `selected` に行番号があればその行のみ、なければ検索条件に一致する行をレポートにする。
/// 検索条件がフォームに無い場合は①で最後に検索した条件を使う。
pub async fn export_docx(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let dataset = state.active_dataset(&token);
    let pdf_text = state.active_pdf_text(&token);
    let records = &dataset.table.records;

    let selected = selected_indices(&fields, records.len());
    let chosen: Vec<&Record> = if selected.is_empty() {
        let criteria = criteria_from_fields(&fields).unwrap_or_else(|| state.criteria(&token));
        search(records, &criteria)
    } else {
        selected.iter().map(|&i| &records[i]).collect()
    };

    let config = state.config();
    let report = Report::new(config.report_title.clone(), chosen, &pdf_text)
        .with_limits(config.pdf_preview_chars, config.report_row_limit);
    let bytes = export::generate(&report)?;

    tracing::info!("Wordレポートを出力: {}件, {} bytes", report.records.len(), bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, DOCX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", OUTPUT_FILE_NAME),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// 範囲内の行番号を昇順・重複なしで返す
fn selected_indices(fields: &[(String, String)], len: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = fields
        .iter()
        .filter(|(name, _)| name == "selected")
        .filter_map(|(_, value)| value.trim().parse().ok())
        .filter(|&i| i < len)
        .collect();
    indices.sort_unstable();
    indices.dedup();
    indices
}

/// フォームの検索条件（該当する欄が一つも無ければ None）
fn criteria_from_fields(fields: &[(String, String)]) -> Option<SearchCriteria> {
    let mut criteria = SearchCriteria::default();
    let mut found = false;
    for (name, value) in fields {
        let slot = match name.as_str() {
            "company" => &mut criteria.company,
            "major_category" => &mut criteria.major_category,
            "minor_category" => &mut criteria.minor_category,
            "news" => &mut criteria.news,
            _ => continue,
        };
        *slot = value.clone();
        found = true;
    }
    found.then_some(criteria)
}
