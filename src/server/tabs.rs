//! タブ切り替え

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    /// ①マッチング実行
    #[default]
    Match,
    /// ②アイデア生成
    Idea,
    /// ③ファイル作成
    Export,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Match, Tab::Idea, Tab::Export];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Match => "①マッチング実行",
            Tab::Idea => "②アイデア生成",
            Tab::Export => "③ファイル作成",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Tab::Match => "match",
            Tab::Idea => "idea",
            Tab::Export => "export",
        }
    }

    pub fn href(&self) -> String {
        format!("/?tab={}", self.key())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "match" | "matching" | "1" => Ok(Tab::Match),
            "idea" | "ideas" | "2" => Ok(Tab::Idea),
            "export" | "file" | "3" => Ok(Tab::Export),
            _ => Err(format!("Unknown tab: {}. Use match, idea, or export", s)),
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
