//! Serialization of items for export: CSV or JSON lines.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat};
use serde::Serialize;

use crate::clipboard::ClipboardItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    JsonLines,
}

impl ExportFormat {
    pub fn file_extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::JsonLines => "jsonl",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "jsonl" | "ndjson" | "json-lines" => Ok(ExportFormat::JsonLines),
            other => Err(format!("unsupported export format: {other}")),
        }
    }
}

const CSV_HEADER: &str = "id,type,text,timestamp,pinned,charCount,tags";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRecord<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    item_type: &'static str,
    text: &'a str,
    timestamp: i64,
    pinned: bool,
    char_count: usize,
    tags: Vec<&'a str>,
    translations: &'a BTreeMap<String, String>,
}

impl<'a> From<&'a ClipboardItem> for ExportRecord<'a> {
    fn from(item: &'a ClipboardItem) -> Self {
        Self {
            id: item.id.as_str(),
            item_type: item.item_type.as_str(),
            text: &item.text,
            timestamp: item.timestamp_ms,
            pinned: item.pinned,
            char_count: item.char_count,
            tags: item.tags.iter().map(String::as_str).collect(),
            translations: &item.translations,
        }
    }
}

pub fn export_items(items: &[ClipboardItem], format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Csv => Ok(to_csv(items)),
        ExportFormat::JsonLines => to_json_lines(items),
    }
}

fn to_csv(items: &[ClipboardItem]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for item in items {
        let tags = item.tags.iter().cloned().collect::<Vec<_>>().join(";");
        let row = [
            csv_field(item.id.as_str()),
            item.item_type.as_str().to_string(),
            csv_field(&item.text),
            format_timestamp(item.timestamp_ms),
            item.pinned.to_string(),
            item.char_count.to_string(),
            csv_field(&tags),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

fn to_json_lines(items: &[ClipboardItem]) -> serde_json::Result<String> {
    let mut out = String::new();
    for item in items {
        out.push_str(&serde_json::to_string(&ExportRecord::from(item))?);
        out.push('\n');
    }
    Ok(out)
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn format_timestamp(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| ms.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_quotes_fields_with_separators() {
        let mut item = ClipboardItem::new("say \"hi\", then\nleave", 0);
        item.tags.insert("a".to_string());
        item.tags.insert("b".to_string());

        let csv = export_items(&[item.clone()], ExportFormat::Csv).unwrap();
        let mut lines = csv.splitn(2, '\n');

        assert_eq!(lines.next(), Some(CSV_HEADER));
        let row = lines.next().unwrap();
        assert!(row.starts_with(&format!("{},text,\"say \"\"hi\"\", then\nleave\",", item.id)));
        assert!(row.contains("1970-01-01T00:00:00.000Z"));
        assert!(row.trim_end().ends_with(",false,20,a;b"));
    }

    #[test]
    fn json_lines_emit_one_object_per_item() {
        let mut item = ClipboardItem::new("https://x.com", 5);
        item.translations.insert("de".to_string(), "x".to_string());
        let items = vec![item, ClipboardItem::new("two", 6)];

        let out = export_items(&items, ExportFormat::JsonLines).unwrap();
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["type"], "url");
        assert_eq!(first["charCount"], 13);
        assert_eq!(first["translations"]["de"], "x");
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("JSONL".parse::<ExportFormat>(), Ok(ExportFormat::JsonLines));
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
