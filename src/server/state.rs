//! アプリケーション状態

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use needs_match_common::SearchCriteria;

use crate::auth::AuthGate;
use crate::config::Config;
use crate::loader::Dataset;

/// 画面上部に一度だけ表示するメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    /// CSSクラス名
    pub fn class(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        }
    }
}

impl Notice {
    pub fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self { level, text: text.into() }
    }
}

/// ログイン後のブラウザごとの状態
#[derive(Debug, Default)]
pub struct Session {
    /// アップロードしたCSV/Excel（共有データより優先）
    pub uploaded: Option<Arc<Dataset>>,
    /// アップロードしたPDFのテキスト
    pub pdf_text: Option<String>,
    /// ①で最後に検索した条件（Word出力の対象になる）
    pub criteria: SearchCriteria,
    pub notices: Vec<Notice>,
}

/// 共有状態
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    gate: AuthGate,
    /// 起動時に読み込んだデータ（読み取り専用）
    dataset: Arc<Dataset>,
    sessions: RwLock<HashMap<String, Session>>,
}

impl AppState {
    pub fn new(config: Config, dataset: Dataset) -> Self {
        let gate = AuthGate::new(config.password.as_deref());
        if !gate.is_configured() {
            tracing::warn!(
                "パスワードが設定されていません。{} か設定ファイルで設定してください",
                crate::config::PASSWORD_ENV
            );
        }

        Self {
            inner: Arc::new(AppStateInner {
                config,
                gate,
                dataset: Arc::new(dataset),
                sessions: RwLock::new(HashMap::new()),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn gate(&self) -> &AuthGate {
        &self.inner.gate
    }

    pub fn base_dataset(&self) -> Arc<Dataset> {
        Arc::clone(&self.inner.dataset)
    }

    /// 新しいセッションを作成してトークンを返す
    pub fn create_session(&self, notices: Vec<Notice>) -> String {
        let token = uuid::Uuid::new_v4().simple().to_string();
        let session = Session { notices, ..Default::default() };
        self.inner.sessions.write().insert(token.clone(), session);
        tracing::debug!("セッション作成 (計{}件)", self.inner.sessions.read().len());
        token
    }

    pub fn has_session(&self, token: &str) -> bool {
        self.inner.sessions.read().contains_key(token)
    }

    pub fn remove_session(&self, token: &str) {
        self.inner.sessions.write().remove(token);
    }

    /// セッションの表示用データ（アップロード済みがあればそちら）
    pub fn active_dataset(&self, token: &str) -> Arc<Dataset> {
        self.inner
            .sessions
            .read()
            .get(token)
            .and_then(|s| s.uploaded.clone())
            .unwrap_or_else(|| self.base_dataset())
    }

    /// セッションのPDFテキスト（アップロード済みがあればそちら）
    pub fn active_pdf_text(&self, token: &str) -> String {
        let uploaded = self
            .inner
            .sessions
            .read()
            .get(token)
            .and_then(|s| s.pdf_text.clone());
        uploaded.unwrap_or_else(|| self.inner.dataset.pdf_text.clone())
    }

    pub fn set_uploaded_dataset(&self, token: &str, dataset: Dataset) {
        if let Some(session) = self.inner.sessions.write().get_mut(token) {
            session.uploaded = Some(Arc::new(dataset));
        }
    }

    pub fn set_uploaded_pdf(&self, token: &str, text: String) {
        if let Some(session) = self.inner.sessions.write().get_mut(token) {
            session.pdf_text = Some(text);
        }
    }

    pub fn set_criteria(&self, token: &str, criteria: SearchCriteria) {
        if let Some(session) = self.inner.sessions.write().get_mut(token) {
            session.criteria = criteria;
        }
    }

    pub fn criteria(&self, token: &str) -> SearchCriteria {
        self.inner
            .sessions
            .read()
            .get(token)
            .map(|s| s.criteria.clone())
            .unwrap_or_default()
    }

    pub fn push_notice(&self, token: &str, notice: Notice) {
        if let Some(session) = self.inner.sessions.write().get_mut(token) {
            session.notices.push(notice);
        }
    }

    /// 表示待ちメッセージを取り出す
    pub fn take_notices(&self, token: &str) -> Vec<Notice> {
        self.inner
            .sessions
            .write()
            .get_mut(token)
            .map(|s| std::mem::take(&mut s.notices))
            .unwrap_or_default()
    }
}
