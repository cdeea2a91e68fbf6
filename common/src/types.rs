//! データ型定義
//!
//! CSV/Excelの1行を表すRecordと、見出し付きの表Table:
//! - Column: 見出し名から判定した列の種類
//! - Record: 既知列（企業名・大分類など）と任意列
//! - Table: 見出し順を保持した表

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 任意列（既知の列名に当てはまらない列）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: String,
}

/// データ1行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    pub number: String,           // 番号
    pub company: String,          // 企業名
    pub major_category: String,   // 大分類
    pub minor_category: String,   // 中分類
    pub news_name: String,        // 技術ニュース名
    pub summary: String,          // 要約

    /// その他の列（見出し順）
    pub extra: Vec<Field>,
}

impl Record {
    /// 列の値を取得
    pub fn cell(&self, column: &Column) -> &str {
        match column {
            Column::Number => &self.number,
            Column::Company => &self.company,
            Column::MajorCategory => &self.major_category,
            Column::MinorCategory => &self.minor_category,
            Column::NewsName => &self.news_name,
            Column::Summary => &self.summary,
            Column::Extra(i) => self.extra.get(*i).map(|f| f.value.as_str()).unwrap_or(""),
        }
    }

    /// ニュース名（空の場合は「（無題）」）
    pub fn title(&self) -> &str {
        if self.news_name.trim().is_empty() {
            "（無題）"
        } else {
            &self.news_name
        }
    }
}

/// 列の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Number,
    Company,
    MajorCategory,
    MinorCategory,
    NewsName,
    Summary,
    /// `Record::extra` の添字
    Extra(usize),
}

impl Column {
    /// 見出し名から既知列を判定（日本語名と英語名に対応）
    pub fn known(header: &str) -> Option<Self> {
        let key = header.trim().to_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "番号" | "no" | "id" | "number" => Some(Column::Number),
            "企業名" | "company" | "company_name" => Some(Column::Company),
            "大分類" | "major" | "major_category" => Some(Column::MajorCategory),
            "中分類" | "minor" | "middle" | "minor_category" => Some(Column::MinorCategory),
            "技術ニュース名" | "ニュース名" | "技術ニーズのニュース名" | "news" | "news_name"
            | "title" => Some(Column::NewsName),
            "要約" | "summary" => Some(Column::Summary),
            _ => None,
        }
    }
}

/// 見出し付きの表
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// 見出し（入力ファイルの順）
    pub headers: Vec<String>,
    /// 見出しごとの列の種類
    pub columns: Vec<Column>,
    pub records: Vec<Record>,
}

impl Table {
    /// 見出し行とデータ行から表を組み立てる
    ///
    /// 見出し1行を除くすべての行がRecordになる。列数が足りない行は空文字で補う。
    pub fn from_rows<I>(headers: Vec<String>, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(Error::MissingHeader("見出し行が空です".into()));
        }

        let mut extra_count = 0;
        let mut extra_names = Vec::new();
        let mut columns = Vec::with_capacity(headers.len());
        for header in &headers {
            // 同じ既知列が2回現れた場合、2回目以降は任意列として扱う
            match Column::known(header).filter(|c| !columns.contains(c)) {
                Some(column) => columns.push(column),
                None => {
                    columns.push(Column::Extra(extra_count));
                    extra_names.push(header.trim().to_string());
                    extra_count += 1;
                }
            }
        }

        let records = rows
            .into_iter()
            .map(|row| build_record(&columns, &extra_names, row))
            .collect();

        Ok(Self {
            headers: headers.into_iter().map(|h| h.trim().to_string()).collect(),
            columns,
            records,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 別の表の行を追加する（見出しは和集合）
    pub fn append(&mut self, other: Table) {
        if self.headers.is_empty() {
            *self = other;
            return;
        }

        for (header, column) in other.headers.iter().zip(&other.columns) {
            let exists = match column {
                // 任意列は既存の任意列とだけ照合する（既知列と同名の重複列を含む）
                Column::Extra(_) => self
                    .headers
                    .iter()
                    .zip(&self.columns)
                    .any(|(h, c)| matches!(c, Column::Extra(_)) && h == header),
                known => self.columns.contains(known),
            };
            if !exists {
                let new_column = match column {
                    Column::Extra(_) => Column::Extra(self.extra_len()),
                    known => *known,
                };
                self.headers.push(header.clone());
                self.columns.push(new_column);
            }
        }

        let extra_names = self.extra_names();
        for mut record in other.records {
            let mut extra = vec![Field::default(); extra_names.len()];
            for (slot, name) in extra.iter_mut().zip(&extra_names) {
                slot.name = name.clone();
                if let Some(pos) = record.extra.iter().position(|f| &f.name == name) {
                    slot.value = std::mem::take(&mut record.extra[pos].value);
                }
            }
            record.extra = extra;
            self.records.push(record);
        }
    }

    fn extra_len(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| matches!(c, Column::Extra(_)))
            .count()
    }

    fn extra_names(&self) -> Vec<String> {
        let mut names = vec![String::new(); self.extra_len()];
        for (header, column) in self.headers.iter().zip(&self.columns) {
            if let Column::Extra(i) = column {
                names[*i] = header.clone();
            }
        }
        names
    }
}

fn build_record(columns: &[Column], extra_names: &[String], row: Vec<String>) -> Record {
    let mut record = Record {
        extra: extra_names
            .iter()
            .map(|name| Field { name: name.clone(), value: String::new() })
            .collect(),
        ..Default::default()
    };

    for (column, value) in columns.iter().zip(row) {
        let value = value.trim().to_string();
        match column {
            Column::Number => record.number = value,
            Column::Company => record.company = value,
            Column::MajorCategory => record.major_category = value,
            Column::MinorCategory => record.minor_category = value,
            Column::NewsName => record.news_name = value,
            Column::Summary => record.summary = value,
            Column::Extra(i) => record.extra[*i].value = value,
        }
    }

    record
}
