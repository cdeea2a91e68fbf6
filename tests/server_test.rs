//! HTTPルートの統合テスト
//!
//! ルーターを直接呼び出し、ログイン → 検索 → Word出力 → アップロードの流れを確認する。

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use needs_match::config::Config;
use needs_match::export::{extract_paragraphs, DOCX_MIME};
use needs_match::loader::{self, Dataset};
use needs_match::server::build_router;
use needs_match::server::state::AppState;
use tower::ServiceExt;

const CSV: &str = "企業名,大分類,中分類,技術ニュース名,要約\n\
                   Acme,Retail,Grocery,Q1 News,Acme summary\n\
                   Globex,Tech,Cloud,Q2 News,Globex summary\n";

fn app(password: Option<&str>) -> Router {
    let config = Config {
        password: password.map(str::to_string),
        ..Config::default()
    };
    let table = loader::load_csv(CSV.as_bytes()).unwrap();
    let dataset = Dataset::from_table(table, "sample.csv");
    build_router(AppState::new(config, dataset))
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

async fn login(app: &Router, password: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("password={}", password)))
        .unwrap();
    send(app, request).await
}

/// ログインしてCookie文字列（name=value）を返す
async fn login_cookie(app: &Router) -> String {
    let response = login(app, "secret").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

fn get(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_health_is_public() {
    let app = app(Some("secret"));
    let response = send(&app, Request::builder().uri("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");
}

#[tokio::test]
async fn test_pages_require_login() {
    let app = app(Some("secret"));

    let response = send(&app, get("/", "needs_match_session=forged")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let request = Request::builder()
        .method("POST")
        .uri("/export")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_wrong_password_is_denied() {
    let app = app(Some("secret"));

    let response = login(&app, "Secret").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert!(body_text(response).await.contains("パスワードが違います。"));
}

#[tokio::test]
async fn test_login_then_search() {
    let app = app(Some("secret"));
    let cookie = login_cookie(&app).await;

    let response = send(&app, get("/", &cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Acme"));
    assert!(html.contains("Globex"));

    let response = send(&app, get("/?tab=match&company=acme", &cookie)).await;
    let html = body_text(response).await;
    assert!(html.contains("Acme summary"));
    assert!(!html.contains("Globex summary"));
}

#[tokio::test]
async fn test_idea_tab_shows_similarity() {
    let app = app(Some("secret"));
    let cookie = login_cookie(&app).await;

    let request = Request::builder()
        .method("POST")
        .uri("/idea")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(location(&response), "/?tab=idea");

    let html = body_text(send(&app, get("/?tab=idea", &cookie)).await).await;
    assert!(html.contains("0.82"));
    assert!(html.contains("0.77"));
    assert!(html.contains("ダミー：アイデアを生成しました。"));
}

#[tokio::test]
async fn test_export_selected_rows() {
    let app = app(Some("secret"));
    let cookie = login_cookie(&app).await;

    let request = Request::builder()
        .method("POST")
        .uri("/export")
        .header(header::COOKIE, &cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("selected=1"))
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], DOCX_MIME);
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("output.docx"));

    let paragraphs = extract_paragraphs(&body_bytes(response).await).unwrap();
    assert!(paragraphs.iter().any(|p| p == "・Q2 News / Globex"));
    assert!(!paragraphs.iter().any(|p| p.contains("Acme")));
}

#[tokio::test]
async fn test_export_without_selection_uses_all_rows() {
    let app = app(Some("secret"));
    let cookie = login_cookie(&app).await;

    let request = Request::builder()
        .method("POST")
        .uri("/export")
        .header(header::COOKIE, &cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    let paragraphs = extract_paragraphs(&body_bytes(response).await).unwrap();

    assert!(paragraphs.iter().any(|p| p == "・Q1 News / Acme"));
    assert!(paragraphs.iter().any(|p| p == "・Q2 News / Globex"));
    assert!(paragraphs.iter().any(|p| p == "（PDF未読込）"));
}

#[tokio::test]
async fn test_upload_replaces_data_for_session_only() {
    let app = app(Some("secret"));
    let cookie_a = login_cookie(&app).await;
    let cookie_b = login_cookie(&app).await;

    let boundary = "XBOUNDARYX";
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"csv\"; filename=\"upload.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         企業名,技術ニュース名\nInitech,TPS Report\n\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"pdf\"; filename=\"\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n\
         \r\n\
         --{b}--\r\n",
        b = boundary
    );
    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(header::COOKIE, &cookie_a)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let html_a = body_text(send(&app, get("/", &cookie_a)).await).await;
    assert!(html_a.contains("Initech"));
    assert!(!html_a.contains("Globex"));
    assert!(html_a.contains("CSVを読み込みました。"));

    let html_b = body_text(send(&app, get("/", &cookie_b)).await).await;
    assert!(html_b.contains("Globex"));
    assert!(!html_b.contains("Initech"));
}

#[tokio::test]
async fn test_upload_broken_pdf_reports_error() {
    let app = app(Some("secret"));
    let cookie = login_cookie(&app).await;

    let boundary = "XBOUNDARYX";
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"pdf\"; filename=\"broken.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n\
         not a pdf\r\n\
         --{b}--\r\n",
        b = boundary
    );
    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(header::COOKIE, &cookie)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();
    send(&app, request).await;

    let html = body_text(send(&app, get("/", &cookie)).await).await;
    assert!(html.contains("PDF読込エラー"));
    assert!(html.contains("Globex"));
}

#[tokio::test]
async fn test_unconfigured_password_warns_and_admits() {
    let app = app(None);

    let page = body_text(send(&app, Request::builder().uri("/login").body(Body::empty()).unwrap()).await).await;
    assert!(page.contains("パスワードが設定されていません"));

    let response = login(&app, "anything").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(response.headers().get(header::SET_COOKIE).is_some());
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = app(Some("secret"));
    let cookie = login_cookie(&app).await;

    let request = Request::builder()
        .method("POST")
        .uri("/logout")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(location(&response), "/login");

    let response = send(&app, get("/", &cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

fn export_request(cookie: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/export")
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_export_follows_last_search() {
    let app = app(Some("secret"));
    let cookie = login_cookie(&app).await;

    send(&app, get("/?tab=match&company=Acme", &cookie)).await;

    // ③の画面には①の検索結果の件数が出る
    let html = body_text(send(&app, get("/?tab=export", &cookie)).await).await;
    assert!(html.contains("①の検索結果 1件"));

    // 条件欄の無いフォームでも直前の検索条件で絞り込む
    let response = send(&app, export_request(&cookie, "")).await;
    let paragraphs = extract_paragraphs(&body_bytes(response).await).unwrap();
    assert!(paragraphs.iter().any(|p| p == "・Q1 News / Acme"));
    assert!(!paragraphs.iter().any(|p| p.contains("Globex")));

    // フォームの条件が優先される
    let response = send(&app, export_request(&cookie, "company=Globex&news=")).await;
    let paragraphs = extract_paragraphs(&body_bytes(response).await).unwrap();
    assert!(paragraphs.iter().any(|p| p == "・Q2 News / Globex"));
    assert!(!paragraphs.iter().any(|p| p.contains("Acme")));
}

#[tokio::test]
async fn test_upload_pdf_is_used_in_report() {
    let app = app(Some("secret"));
    let cookie = login_cookie(&app).await;

    let pdf = include_str!("fixtures/sample.pdf");
    let boundary = "XBOUNDARYX";
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"pdf\"; filename=\"sample.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n\
         {pdf}\r\n\
         --{b}--\r\n",
        b = boundary,
        pdf = pdf
    );
    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(header::COOKIE, &cookie)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();
    send(&app, request).await;

    let html = body_text(send(&app, get("/", &cookie)).await).await;
    assert!(html.contains("PDFを読み込みました。"));
    assert!(html.contains("PDFあり"));

    let response = send(&app, export_request(&cookie, "")).await;
    let paragraphs = extract_paragraphs(&body_bytes(response).await).unwrap();
    assert!(paragraphs.iter().any(|p| p.contains("Needs Match")));
    assert!(!paragraphs.iter().any(|p| p == "（PDF未読込）"));
}

#[tokio::test]
async fn test_relogin_keeps_existing_session() {
    let app = app(Some("secret"));
    let cookie = login_cookie(&app).await;

    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::COOKIE, &cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("password=secret"))
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert_eq!(set_cookie.split(';').next().unwrap(), cookie);
}
