use crate::domain::model::{Schedule, ScheduleRow};
use crate::utils::error::{LiturgistError, Result};
use calamine::{Data, DataType, Ods, Range, Reader, Xls, Xlsx};
use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime, Timelike, Weekday};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%A, %B %d, %Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Layout of a tabular schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleLayout {
    /// Zero-based row holding the column names. Rows above it are titles.
    pub header_row: usize,
    pub date_column: String,
}

impl Default for ScheduleLayout {
    fn default() -> Self {
        Self {
            header_row: 1,
            date_column: "Date".to_string(),
        }
    }
}

/// Parses schedule content, picking the format from the file extension.
pub fn parse_schedule(path: &str, content: &[u8], layout: &ScheduleLayout) -> Result<Schedule> {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => parse_csv(content, layout),
        "json" => parse_json(content, layout),
        "ods" => parse_sheet(first_sheet::<Ods<Cursor<Vec<u8>>>>(content)?, layout),
        "xlsx" | "xlsm" => parse_sheet(first_sheet::<Xlsx<Cursor<Vec<u8>>>>(content)?, layout),
        "xls" => parse_sheet(first_sheet::<Xls<Cursor<Vec<u8>>>>(content)?, layout),
        _ => Err(LiturgistError::UnsupportedScheduleError {
            extension: format!(".{}", extension),
        }),
    }
}

fn parse_csv(content: &[u8], layout: &ScheduleLayout) -> Result<Schedule> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut records = reader.records().skip(layout.header_row);
    let headers: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(|h| h.trim().to_string()).collect(),
        None => return Ok(Schedule::default()),
    };

    let date_index = headers
        .iter()
        .position(|h| *h == layout.date_column)
        .ok_or_else(|| LiturgistError::ProcessingError {
            message: format!("Schedule has no '{}' column", layout.date_column),
        })?;

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        let date_cell = record.get(date_index).unwrap_or_default().trim();
        if date_cell.is_empty() {
            continue;
        }
        let date = parse_date(date_cell)?;

        let fields: HashMap<String, serde_json::Value> = headers
            .iter()
            .zip(record.iter())
            .filter(|(header, cell)| !header.is_empty() && !cell.is_empty())
            .map(|(header, cell)| (header.clone(), serde_json::Value::String(cell.to_string())))
            .collect();

        rows.push(ScheduleRow { date, fields });
    }

    tracing::debug!("Read {} dated row(s) from CSV schedule", rows.len());
    Ok(Schedule { rows })
}

fn parse_json(content: &[u8], layout: &ScheduleLayout) -> Result<Schedule> {
    let items: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_slice(content)?;

    let mut rows = Vec::new();
    for item in items {
        let date = match item.get(&layout.date_column) {
            Some(serde_json::Value::String(value)) if !value.trim().is_empty() => parse_date(value.trim())?,
            Some(serde_json::Value::Null) | None => continue,
            Some(serde_json::Value::String(_)) => continue,
            Some(other) => {
                return Err(LiturgistError::DateParseError {
                    value: other.to_string(),
                })
            }
        };

        rows.push(ScheduleRow {
            date,
            fields: item.into_iter().collect(),
        });
    }

    tracing::debug!("Read {} dated row(s) from JSON schedule", rows.len());
    Ok(Schedule { rows })
}

fn first_sheet<R>(content: &[u8]) -> Result<Range<Data>>
where
    R: Reader<Cursor<Vec<u8>>>,
    R::Error: Into<calamine::Error>,
{
    let mut workbook = R::new(Cursor::new(content.to_vec())).map_err(|e| LiturgistError::SpreadsheetError(e.into()))?;

    match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| LiturgistError::SpreadsheetError(e.into())),
        None => Err(LiturgistError::ProcessingError {
            message: "Schedule workbook has no sheets".to_string(),
        }),
    }
}

fn parse_sheet(range: Range<Data>, layout: &ScheduleLayout) -> Result<Schedule> {
    // Row indexes are relative to the first used row of the sheet.
    let first_row = range.start().map_or(0, |(row, _)| row as usize);
    let mut rows_iter = range.rows().skip(layout.header_row.saturating_sub(first_row));

    let headers: Vec<String> = match rows_iter.next() {
        Some(row) => row.iter().map(|cell| cell.to_string().trim().to_string()).collect(),
        None => return Ok(Schedule::default()),
    };

    let date_index = headers
        .iter()
        .position(|h| *h == layout.date_column)
        .ok_or_else(|| LiturgistError::ProcessingError {
            message: format!("Schedule has no '{}' column", layout.date_column),
        })?;

    let mut rows = Vec::new();
    for row in rows_iter {
        let Some(date) = sheet_date(row.get(date_index).unwrap_or(&Data::Empty))? else {
            continue;
        };

        let fields: HashMap<String, serde_json::Value> = headers
            .iter()
            .zip(row.iter())
            .filter(|(header, _)| !header.is_empty())
            .filter_map(|(header, cell)| sheet_value(cell).map(|value| (header.clone(), value)))
            .collect();

        rows.push(ScheduleRow { date, fields });
    }

    tracing::debug!("Read {} dated row(s) from spreadsheet schedule", rows.len());
    Ok(Schedule { rows })
}

/// Date cells, serial numbers and date-like text all resolve to a date.
fn sheet_date(cell: &Data) -> Result<Option<NaiveDate>> {
    if cell.is_empty() {
        return Ok(None);
    }
    if let Some(date) = cell.as_date() {
        return Ok(Some(date));
    }

    let text = cell.to_string();
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_date(&text).map(Some)
}

fn sheet_value(cell: &Data) -> Option<serde_json::Value> {
    match cell {
        Data::Empty => None,
        Data::String(text) if text.trim().is_empty() => None,
        Data::String(text) => Some(serde_json::Value::String(text.clone())),
        Data::Int(value) => Some((*value).into()),
        // Spreadsheets store whole numbers as floats
        Data::Float(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => Some((*value as i64).into()),
        Data::Float(value) => Some((*value).into()),
        Data::Bool(value) => Some((*value).into()),
        Data::Error(e) => {
            tracing::warn!("Ignoring spreadsheet cell error: {:?}", e);
            None
        }
        other => Some(serde_json::Value::String(match other.as_datetime() {
            Some(datetime) if datetime.num_seconds_from_midnight() == 0 => datetime.format("%Y-%m-%d").to_string(),
            Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => other.to_string(),
        })),
    }
}

/// Parses the date formats spreadsheets commonly export.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|datetime| datetime.date())
        })
        .ok_or_else(|| LiturgistError::DateParseError {
            value: value.to_string(),
        })
}

/// The Sunday a bulletin is most likely being prepared for.
pub fn next_sunday() -> NaiveDate {
    next_sunday_from(Local::now().naive_local())
}

/// Today when it is Sunday morning, a week out on Sunday afternoon,
/// otherwise the coming Sunday.
pub fn next_sunday_from(now: NaiveDateTime) -> NaiveDate {
    let today = now.date();

    let days = match today.weekday() {
        Weekday::Sun if now.hour() < 12 => 0,
        Weekday::Sun => 7,
        weekday => 6 - u64::from(weekday.num_days_from_monday()),
    };

    today + Days::new(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ScheduleLayout {
        ScheduleLayout::default()
    }

    fn at(date: &str, hour: u32) -> NaiveDateTime {
        parse_date(date).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_csv_skips_title_row() {
        let csv = "Header Row\nDate,Hymn 1,Scripture\n2024-02-18,Hymn 290,Acts 2:34-35\n";
        let schedule = parse_schedule("schedule.csv", csv.as_bytes(), &layout()).unwrap();

        assert_eq!(schedule.rows.len(), 1);
        let row = &schedule.rows[0];
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2024, 2, 18).unwrap());
        assert_eq!(row.value("Hymn 1").unwrap(), "Hymn 290");
        assert_eq!(row.value("Scripture").unwrap(), "Acts 2:34-35");
    }

    #[test]
    fn test_parse_csv_empty_cells_are_absent() {
        let csv = "Title,,\nDate,Hymn 1,Collect\n2024-02-18,,Almighty God\n,Hymn 5,\n";
        let schedule = parse_schedule("SCHEDULE.CSV", csv.as_bytes(), &layout()).unwrap();

        assert_eq!(schedule.rows.len(), 1);
        assert!(schedule.rows[0].value("Hymn 1").is_none());
        assert_eq!(schedule.rows[0].value("Collect").unwrap(), "Almighty God");
    }

    #[test]
    fn test_parse_csv_quoted_commas() {
        let csv = "Title\nDate,Scripture\n2/18/2024,\"John 3:16, John 4:1\"\n";
        let schedule = parse_schedule("s.csv", csv.as_bytes(), &layout()).unwrap();

        assert_eq!(schedule.rows[0].value("Scripture").unwrap(), "John 3:16, John 4:1");
    }

    #[test]
    fn test_parse_csv_without_date_column() {
        let csv = "Title\nWhen,Hymn 1\n2024-02-18,Hymn 290\n";
        assert!(matches!(
            parse_schedule("s.csv", csv.as_bytes(), &layout()),
            Err(LiturgistError::ProcessingError { .. })
        ));
    }

    #[test]
    fn test_parse_csv_bad_date() {
        let csv = "Title\nDate,Hymn 1\nsoon,Hymn 290\n";
        assert!(matches!(
            parse_schedule("s.csv", csv.as_bytes(), &layout()),
            Err(LiturgistError::DateParseError { .. })
        ));
    }

    #[test]
    fn test_parse_json_schedule() {
        let json = r#"[{"Date": "2024-02-18", "Hymn 1": "Hymn 290", "Baptisms": 2}, {"Date": null}]"#;
        let schedule = parse_schedule("s.json", json.as_bytes(), &layout()).unwrap();

        assert_eq!(schedule.rows.len(), 1);
        assert_eq!(schedule.rows[0].value("Baptisms").and_then(|v| v.as_i64()), Some(2));
    }

    fn assert_fixture_schedule(schedule: &Schedule) {
        assert_eq!(schedule.rows.len(), 2);

        let first = &schedule.rows[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 2, 18).unwrap());
        assert_eq!(first.value("Hymn 1").unwrap(), "Hymn 290 - Hallelujah");
        assert_eq!(first.value("Scripture").unwrap(), "John 3:16-17 John 4:1");
        assert_eq!(first.value("Baptisms").and_then(|v| v.as_i64()), Some(2));
        assert_eq!(first.value("Date").unwrap(), "2024-02-18");

        let second = &schedule.rows[1];
        assert_eq!(second.date, NaiveDate::from_ymd_opt(2024, 2, 25).unwrap());
        assert!(second.value("Hymn 2").is_none());
        assert!(second.value("Question").is_none());
    }

    #[test]
    fn test_parse_ods_schedule() {
        let content = include_bytes!("../../tests/fixtures/schedule.ods");
        let schedule = parse_schedule("schedule.ods", content, &layout()).unwrap();
        assert_fixture_schedule(&schedule);
    }

    #[test]
    fn test_parse_xlsx_schedule() {
        let content = include_bytes!("../../tests/fixtures/schedule.xlsx");
        let schedule = parse_schedule("Schedule.XLSX", content, &layout()).unwrap();
        assert_fixture_schedule(&schedule);
    }

    #[test]
    fn test_parse_corrupt_spreadsheet() {
        assert!(matches!(
            parse_schedule("schedule.ods", b"not a spreadsheet", &layout()),
            Err(LiturgistError::SpreadsheetError(_))
        ));
    }

    #[test]
    fn test_sheet_values() {
        assert_eq!(sheet_value(&Data::Float(290.0)), Some(serde_json::json!(290)));
        assert_eq!(sheet_value(&Data::Float(1.5)), Some(serde_json::json!(1.5)));
        assert_eq!(sheet_value(&Data::String("  ".to_string())), None);
        assert_eq!(sheet_value(&Data::Empty), None);
        assert_eq!(sheet_date(&Data::String("2/18/2024".to_string())).unwrap(), NaiveDate::from_ymd_opt(2024, 2, 18));
        assert_eq!(sheet_date(&Data::Empty).unwrap(), None);
        assert!(sheet_date(&Data::String("soon".to_string())).is_err());
    }

    #[test]
    fn test_unsupported_schedule_type() {
        let err = parse_schedule("schedule.txt", b"", &layout()).unwrap_err();
        assert_eq!(err.to_string(), "Unexpected schedule file type: .txt");
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 18).unwrap();
        for value in [
            "2024-02-18",
            "2024-02-18 00:00:00",
            "2/18/2024",
            "2024/02/18",
            "February 18, 2024",
            "Sunday, February 18, 2024",
        ] {
            assert_eq!(parse_date(value).unwrap(), expected, "{}", value);
        }
        assert!(parse_date("next week").is_err());
    }

    #[test]
    fn test_next_sunday_from_weekday() {
        // 2024-02-14 is a Wednesday
        assert_eq!(next_sunday_from(at("2024-02-14", 9)), parse_date("2024-02-18").unwrap());
        // Saturday
        assert_eq!(next_sunday_from(at("2024-02-17", 23)), parse_date("2024-02-18").unwrap());
        // Monday
        assert_eq!(next_sunday_from(at("2024-02-19", 0)), parse_date("2024-02-25").unwrap());
    }

    #[test]
    fn test_next_sunday_from_sunday() {
        assert_eq!(next_sunday_from(at("2024-02-18", 11)), parse_date("2024-02-18").unwrap());
        assert_eq!(next_sunday_from(at("2024-02-18", 12)), parse_date("2024-02-25").unwrap());
    }
}
