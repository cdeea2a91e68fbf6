//! アイデア生成（スタブ）
//!
//! 元データの先頭から類似候補を取り出し、固定の類似度を付ける。
//! 実際の類似度計算は行わない。

use crate::types::Record;
use serde::Serialize;

/// 候補に割り当てる類似度（先頭から順に）
pub const STUB_SIMILARITIES: [f32; 3] = [0.82, 0.77, 0.69];

/// アイデア候補
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaCandidate<'a> {
    /// 元データでの位置
    pub index: usize,
    pub record: &'a Record,
    pub similarity: f32,
}

/// 先頭の最大3件を候補として返す
pub fn candidates(records: &[Record]) -> Vec<IdeaCandidate<'_>> {
    records
        .iter()
        .zip(STUB_SIMILARITIES)
        .enumerate()
        .map(|(index, (record, similarity))| IdeaCandidate { index, record, similarity })
        .collect()
}
