//! セッションCookie

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
    response::Redirect,
};

use super::state::AppState;

pub const COOKIE_NAME: &str = "needs_match_session";

/// ログイン済みセッションのトークン（未ログインなら /login へ転送）
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

#[async_trait]
impl FromRequestParts<AppState> for SessionToken {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        match token_from_headers(&parts.headers) {
            Some(token) if state.has_session(&token) => Ok(SessionToken(token)),
            _ => Err(Redirect::to("/login")),
        }
    }
}

/// Cookieヘッダーからセッショントークンを取り出す
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .map(|(_, value)| value.to_string())
}

pub fn set_cookie(token: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", COOKIE_NAME, token)
}

pub fn clear_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", COOKIE_NAME)
}
