//! Needs Match Common Library
//!
//! Webアプリとローダーで共有される型と検索ロジック

pub mod types;
pub mod error;
pub mod search;
pub mod idea;

pub use types::{Column, Field, Record, Table};
pub use error::{Error, Result};
pub use search::{search, search_indices, SearchCriteria};
pub use idea::{candidates, IdeaCandidate};

/// 大分類の選択肢
pub const MAJOR_CATEGORIES: &[&str] = &["材料", "機械", "電気"];

/// 中分類の選択肢
pub const MINOR_CATEGORIES: &[&str] = &["加工", "AI", "制御"];
