//! 画面テンプレート（askama）

use askama::Template;
use needs_match_common::{
    candidates, search_indices, Column, Record, SearchCriteria, MAJOR_CATEGORIES, MINOR_CATEGORIES,
};

use super::state::Notice;
use super::tabs::Tab;
use crate::loader::Dataset;

pub struct TabLink {
    pub href: String,
    pub label: &'static str,
    pub active: bool,
}

pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

pub struct NoticeView {
    pub class: &'static str,
    pub text: String,
}

pub struct RowView {
    pub index: usize,
    pub cells: Vec<String>,
}

pub struct IdeaRow {
    pub cells: Vec<String>,
    pub similarity: String,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub error: Option<String>,
    pub warning: Option<String>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub active_tab: &'static str,
    pub tabs: Vec<TabLink>,
    pub notices: Vec<NoticeView>,
    pub warnings: Vec<String>,
    pub sources: Vec<String>,
    pub pdf_loaded: bool,
    pub record_count: usize,
    /// ①の検索条件に一致する件数（③のWord出力対象）
    pub matched_count: usize,
    pub criteria: SearchCriteria,
    pub major_options: Vec<SelectOption>,
    pub minor_options: Vec<SelectOption>,
    pub headers: Vec<String>,
    pub rows: Vec<RowView>,
    pub idea_headers: Vec<String>,
    pub idea_rows: Vec<IdeaRow>,
}

impl IndexPage {
    pub fn build(
        tab: Tab,
        dataset: &Dataset,
        pdf_text: &str,
        criteria: SearchCriteria,
        notices: Vec<Notice>,
    ) -> Self {
        let table = &dataset.table;

        let tabs = Tab::ALL
            .iter()
            .map(|t| TabLink { href: t.href(), label: t.label(), active: *t == tab })
            .collect();

        let matched = search_indices(&table.records, &criteria);
        let matched_count = matched.len();
        let rows = match tab {
            Tab::Match => matched
                .into_iter()
                .map(|index| RowView {
                    index,
                    cells: cells(&table.records[index], &table.columns),
                })
                .collect(),
            _ => Vec::new(),
        };

        let (idea_headers, idea_rows) = match tab {
            Tab::Idea => idea_table(&table.headers, &table.columns, &table.records),
            _ => (Vec::new(), Vec::new()),
        };

        let major_options = options(
            MAJOR_CATEGORIES,
            table.records.iter().map(|r| r.major_category.as_str()),
            &criteria.major_category,
        );
        let minor_options = options(
            MINOR_CATEGORIES,
            table.records.iter().map(|r| r.minor_category.as_str()),
            &criteria.minor_category,
        );

        Self {
            active_tab: tab.key(),
            tabs,
            notices: notices
                .into_iter()
                .map(|n| NoticeView { class: n.level.class(), text: n.text })
                .collect(),
            warnings: dataset.warnings.clone(),
            sources: dataset.sources.clone(),
            pdf_loaded: !pdf_text.trim().is_empty(),
            record_count: table.len(),
            matched_count,
            criteria,
            major_options,
            minor_options,
            headers: table.headers.clone(),
            rows,
            idea_headers,
            idea_rows,
        }
    }
}

fn cells(record: &Record, columns: &[Column]) -> Vec<String> {
    columns.iter().map(|c| record.cell(c).to_string()).collect()
}

fn idea_table(
    headers: &[String],
    columns: &[Column],
    records: &[Record],
) -> (Vec<String>, Vec<IdeaRow>) {
    let mut idea_headers: Vec<String> = headers
        .iter()
        .zip(columns)
        .map(|(h, c)| match c {
            Column::NewsName => "技術ニーズのニュース名".to_string(),
            _ => h.clone(),
        })
        .collect();
    idea_headers.push("similarity".into());

    let rows = candidates(records)
        .into_iter()
        .map(|c| IdeaRow {
            cells: cells(c.record, columns),
            similarity: format!("{:.2}", c.similarity),
        })
        .collect();

    (idea_headers, rows)
}

/// 選択肢: 空欄 + 既定値 + データ中の値（重複なし、出現順）
fn options<'a>(
    defaults: &[&'a str],
    values: impl Iterator<Item = &'a str>,
    selected: &str,
) -> Vec<SelectOption> {
    let mut seen: Vec<String> = vec![String::new()];
    for value in defaults.iter().copied().chain(values.map(str::trim)) {
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    if !seen.iter().any(|s| s == selected.trim()) {
        seen.push(selected.trim().to_string());
    }

    seen.into_iter()
        .map(|value| SelectOption { selected: value == selected.trim(), value })
        .collect()
}
