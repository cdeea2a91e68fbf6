//! パスワード認証
//!
//! 入力値と設定済みパスワードのSHA-256ダイジェストを比較する。
//! パスワード未設定の場合は空でない入力をすべて通す（警告を表示する）。

use sha2::{Digest, Sha256};

/// 認証結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Granted,
    /// パスワード未設定のため通過
    GrantedUnconfigured,
    Denied,
    /// 入力なし
    Empty,
}

impl AuthOutcome {
    pub fn is_granted(self) -> bool {
        matches!(self, AuthOutcome::Granted | AuthOutcome::GrantedUnconfigured)
    }
}

#[derive(Clone)]
pub struct AuthGate {
    digest: Option<[u8; 32]>,
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl AuthGate {
    pub fn new(password: Option<&str>) -> Self {
        Self {
            digest: password.filter(|p| !p.is_empty()).map(digest),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.digest.is_some()
    }

    /// 入力値を判定
    pub fn verify(&self, input: &str) -> AuthOutcome {
        if input.is_empty() {
            return AuthOutcome::Empty;
        }
        match &self.digest {
            Some(expected) if digest(input) == *expected => AuthOutcome::Granted,
            Some(_) => AuthOutcome::Denied,
            None => AuthOutcome::GrantedUnconfigured,
        }
    }

    pub fn check(&self, input: &str) -> bool {
        self.verify(input).is_granted()
    }
}

fn digest(text: &str) -> [u8; 32] {
    Sha256::digest(text.as_bytes()).into()
}
