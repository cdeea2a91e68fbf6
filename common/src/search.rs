//! 検索モジュール
//!
//! 企業名・大分類・中分類・ニュース名で Record を絞り込む。
//! 空でない条件がすべて一致した行を、元の順序のまま返す。

use crate::types::Record;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"[\s\u{3000}]+").unwrap();
}

/// 検索条件（空欄は条件なし）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    /// 企業名（部分一致）
    pub company: String,
    /// 大分類（完全一致）
    pub major_category: String,
    /// 中分類（完全一致）
    pub minor_category: String,
    /// ニュース名（曖昧検索）
    pub news: String,
}

impl SearchCriteria {
    /// すべて空欄かどうか
    pub fn is_empty(&self) -> bool {
        self.company.trim().is_empty()
            && self.major_category.trim().is_empty()
            && self.minor_category.trim().is_empty()
            && self.news.trim().is_empty()
    }

    /// 1件の Record が条件に一致するか
    pub fn matches(&self, record: &Record) -> bool {
        let company = self.company.trim();
        if !company.is_empty() && !contains_ignore_case(&record.company, company) {
            return false;
        }

        let major = self.major_category.trim();
        if !major.is_empty() && record.major_category.trim() != major {
            return false;
        }

        let minor = self.minor_category.trim();
        if !minor.is_empty() && record.minor_category.trim() != minor {
            return false;
        }

        let news = self.news.trim();
        if !news.is_empty() && !fuzzy_contains(&record.news_name, news) {
            return false;
        }

        true
    }
}

/// 条件に一致する Record を元の順序で返す
pub fn search<'a>(records: &'a [Record], criteria: &SearchCriteria) -> Vec<&'a Record> {
    if criteria.is_empty() {
        return records.iter().collect();
    }
    records.iter().filter(|r| criteria.matches(r)).collect()
}

/// 一致した行の位置を返す（選択チェックボックスの値に使う）
pub fn search_indices(records: &[Record], criteria: &SearchCriteria) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches(r))
        .map(|(i, _)| i)
        .collect()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// 空白（全角含む）の連続を1つにまとめてから部分一致
fn fuzzy_contains(haystack: &str, needle: &str) -> bool {
    let haystack = normalize(haystack);
    let needle = normalize(needle);
    haystack.contains(&needle)
}

fn normalize(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").to_lowercase()
}
