//! タブ画面

use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
};
use needs_match_common::SearchCriteria;
use serde::Deserialize;

use crate::error::Result;
use crate::server::session::SessionToken;
use crate::server::state::{AppState, Notice, NoticeLevel};
use crate::server::tabs::Tab;
use crate::server::views::IndexPage;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IndexQuery {
    pub tab: String,
    #[serde(flatten)]
    pub criteria: SearchCriteria,
}

/// GET /
pub async fn index(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Query(query): Query<IndexQuery>,
) -> Result<Html<String>> {
    let tab: Tab = query.tab.parse().unwrap_or_default();

    // ①の条件はセッションに残し、③のWord出力対象にも使う
    let criteria = match tab {
        Tab::Match => {
            if !query.criteria.is_empty() {
                tracing::debug!(criteria = ?query.criteria, "検索");
            }
            state.set_criteria(&token, query.criteria.clone());
            query.criteria
        }
        _ => state.criteria(&token),
    };

    let dataset = state.active_dataset(&token);
    let pdf_text = state.active_pdf_text(&token);
    let notices = state.take_notices(&token);

    let page = IndexPage::build(tab, &dataset, &pdf_text, criteria, notices);
    Ok(Html(page.render()?))
}

/// POST /idea
pub async fn generate_ideas(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Redirect {
    state.push_notice(
        &token,
        Notice::new(NoticeLevel::Success, "ダミー：アイデアを生成しました。"),
    );
    Redirect::to(&Tab::Idea.href())
}
