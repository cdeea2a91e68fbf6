//! ルーティング

pub mod auth;
pub mod export;
pub mod home;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// 画面とフォームのルート
pub fn app_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/idea", post(home::generate_ideas))
        .route("/export", post(export::export_docx))
        .route(
            "/upload",
            post(upload::upload).layer(DefaultBodyLimit::max(max_upload_size)),
        )
}
