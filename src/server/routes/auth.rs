//! ログイン・ログアウト

use askama::Template;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::auth::AuthOutcome;
use crate::error::Result;
use crate::server::session::{clear_cookie, set_cookie, token_from_headers};
use crate::server::state::{AppState, Notice, NoticeLevel};
use crate::server::views::LoginPage;

const UNCONFIGURED_WARNING: &str =
    "パスワードが設定されていません。設定ファイルか環境変数で設定してください。";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

/// GET /login
pub async fn login_page(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    if token_from_headers(&headers).is_some_and(|t| state.has_session(&t)) {
        return Ok(Redirect::to("/").into_response());
    }
    render_login(&state, None, StatusCode::OK)
}

/// POST /login
///
/// 有効なセッションCookieがあればそのセッションを使い続ける。
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let notices = match state.gate().verify(&form.password) {
        AuthOutcome::Granted => Vec::new(),
        AuthOutcome::GrantedUnconfigured => {
            vec![Notice::new(NoticeLevel::Warning, UNCONFIGURED_WARNING)]
        }
        AuthOutcome::Denied => {
            tracing::info!("ログイン失敗");
            return render_login(
                &state,
                Some("パスワードが違います。".into()),
                StatusCode::UNAUTHORIZED,
            );
        }
        AuthOutcome::Empty => return render_login(&state, None, StatusCode::OK),
    };

    let token = match token_from_headers(&headers).filter(|t| state.has_session(t)) {
        Some(token) => {
            for notice in notices {
                state.push_notice(&token, notice);
            }
            token
        }
        None => state.create_session(notices),
    };
    tracing::info!("ログイン成功");
    Ok(([(header::SET_COOKIE, set_cookie(&token))], Redirect::to("/")).into_response())
}

/// POST /logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = token_from_headers(&headers) {
        state.remove_session(&token);
    }
    ([(header::SET_COOKIE, clear_cookie())], Redirect::to("/login")).into_response()
}

fn render_login(state: &AppState, error: Option<String>, status: StatusCode) -> Result<Response> {
    let page = LoginPage {
        error,
        warning: (!state.gate().is_configured()).then(|| UNCONFIGURED_WARNING.to_string()),
    };
    Ok((status, Html(page.render()?)).into_response())
}
