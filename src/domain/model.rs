use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A loaded Bible dataset: `{"books": [{"name": ..., "chapters": [{"verses": [...]}]}]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub name: String,
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub verses: Vec<String>,
}

impl Book {
    pub fn is_single_chapter(&self) -> bool {
        self.chapters.len() == 1
    }
}

/// One week of the schedule, keyed by column name.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRow {
    pub date: NaiveDate,
    pub fields: HashMap<String, serde_json::Value>,
}

impl ScheduleRow {
    /// Returns the cell for `column`, treating null and blank strings as absent.
    pub fn value(&self, column: &str) -> Option<&serde_json::Value> {
        match self.fields.get(column)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.trim().is_empty() => None,
            value => Some(value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    pub rows: Vec<ScheduleRow>,
}

impl Schedule {
    pub fn find(&self, date: NaiveDate) -> Option<&ScheduleRow> {
        self.rows.iter().find(|row| row.date == date)
    }
}

/// Template variables handed to the renderer.
pub type TemplateData = serde_json::Map<String, serde_json::Value>;
