use crate::cli::Cli;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// パスワードを上書きする環境変数
pub const PASSWORD_ENV: &str = "NEEDS_MATCH_PASSWORD";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub password: Option<String>,
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub report_title: String,
    /// レポートに載せる最大件数
    pub report_row_limit: usize,
    /// PDF抽出テキストの表示文字数
    pub pdf_preview_chars: usize,
    pub max_upload_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            password: None,
            host: "127.0.0.1".into(),
            port: 8501,
            data_dir: PathBuf::from("data"),
            report_title: "技術ニーズ マッチング レポート".into(),
            report_row_limit: 10,
            pdf_preview_chars: 100,
            max_upload_size: 20 * 1024 * 1024,
        }
    }
}

impl Config {
    /// 設定ファイル → 環境変数 → CLI引数の順に読み込む
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::config_path()?;
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };

        if let Ok(password) = std::env::var(PASSWORD_ENV) {
            config.password = Some(password);
        }

        config.apply_cli(cli);
        config.password = config.password.filter(|p| !p.is_empty());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "設定ファイルが見つかりません: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("needs-match").join("config.json"))
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(dir) = &cli.data_dir {
            self.data_dir = dir.clone();
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8501);
        assert_eq!(config.report_row_limit, 10);
        assert_eq!(config.pdf_preview_chars, 100);
        assert!(config.password.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"password": "secret", "port": 9000}"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = Config::from_file(Path::new("/nonexistent/needs-match.json"));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"host": "0.0.0.0", "port": 9000}"#).unwrap();

        let cli = Cli::parse_from([
            "needs-match",
            "--config",
            path.to_str().unwrap(),
            "--port",
            "7000",
            "--data-dir",
            "samples",
        ]);
        let mut config = Config::from_file(&path).unwrap();
        config.apply_cli(&cli);

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 7000);
        assert_eq!(config.data_dir, PathBuf::from("samples"));
        assert_eq!(config.address(), "0.0.0.0:7000");
    }
}
