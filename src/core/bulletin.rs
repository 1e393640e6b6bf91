use crate::config::columns::ColumnMap;
use crate::core::scripture::Resolver;
use crate::domain::model::{Corpus, Schedule, TemplateData};
use crate::utils::error::{LiturgistError, Result};
use chrono::NaiveDate;
use serde_json::Value;

/// Builds the template variables for the week of `date`.
///
/// Columns feeding a key that already holds a value turn it into a list, so
/// `Hymn 1`..`Hymn 3` become `HYMNS: [..]`. With a corpus, every scripture key
/// holding a reference also gets a `<KEY>_TEXT` entry with the verse text.
pub fn process_schedule_data(
    schedule: &Schedule,
    date: NaiveDate,
    columns: &ColumnMap,
    corpus: Option<&Corpus>,
    resolver: &Resolver,
) -> Result<TemplateData> {
    let week = schedule
        .find(date)
        .ok_or(LiturgistError::DateNotFoundError { date })?;

    let mut data = TemplateData::new();
    data.insert("DATE".to_string(), Value::String(date.format("%Y-%m-%d").to_string()));
    data.insert(
        "FORMATTED_DATE".to_string(),
        Value::String(date.format("%A, %B %d, %Y").to_string()),
    );

    for mapping in columns.mappings() {
        let Some(value) = week.value(&mapping.column) else {
            continue;
        };

        match data.get_mut(&mapping.key) {
            None => {
                data.insert(mapping.key.clone(), value.clone());
            }
            Some(Value::Array(values)) => values.push(value.clone()),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value.clone()]);
            }
        }
    }

    if let Some(corpus) = corpus {
        for key in columns.scripture_keys() {
            let Some(Value::String(passage)) = data.get(key) else {
                continue;
            };
            let text = resolver.resolve(corpus, passage)?;
            tracing::debug!("Expanded {} ({}) to {} characters", key, passage, text.len());
            data.insert(format!("{}_TEXT", key), Value::String(text));
        }
    }

    Ok(data)
}
