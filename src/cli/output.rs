//! Plain-text rendering of command results.

use chrono::{DateTime, Local};

use cs_app::usecases::TranslationOutcome;
use cs_core::{ClipboardItem, QueryPage, Settings};

const PREVIEW_CHARS: usize = 60;

/// `<id>  <type>  <time>  [*] preview  #tag #tag`
pub fn item_line(item: &ClipboardItem) -> String {
    let mut line = format!(
        "{}  {:<7} {}  {}{}",
        item.id,
        item.item_type.as_str(),
        format_timestamp(item.timestamp_ms),
        if item.pinned { "* " } else { "" },
        preview(&item.text),
    );
    for tag in &item.tags {
        line.push_str("  #");
        line.push_str(tag);
    }
    line
}

pub fn page_lines(page: &QueryPage) -> Vec<String> {
    let mut lines: Vec<String> = page.items.iter().map(item_line).collect();
    if page.items.is_empty() {
        lines.push("no items".to_string());
    }
    if page.hidden > 0 {
        lines.push(format!(
            "{} more item(s) hidden, upgrade to premium to see the full history",
            page.hidden
        ));
    }
    lines
}

pub fn translation_lines(outcome: &TranslationOutcome) -> Vec<String> {
    let mut lines: Vec<String> = outcome
        .translations
        .iter()
        .map(|(lang, text)| {
            let source = if outcome.fetched.contains(lang) {
                ""
            } else {
                " (cached)"
            };
            format!("{lang}{source}: {text}")
        })
        .collect();
    if let Some(remaining) = outcome.remaining {
        lines.push(format!("{remaining} translation(s) left this period"));
    }
    lines
}

pub fn settings_lines(settings: &Settings) -> Vec<String> {
    vec![
        format!("theme:             {:?}", settings.theme).to_lowercase(),
        format!("language:          {}", settings.language),
        format!(
            "auto delete:       {}",
            settings
                .auto_delete
                .days()
                .map_or("never".to_string(), |days| format!("{days} day(s)"))
        ),
        format!("translation langs: {}", settings.translation_langs.join(",")),
    ]
}

/// Single-line preview; newlines collapse to spaces and long text is cut with `…`.
fn preview(text: &str) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let mut cut: String = flat.chars().take(PREVIEW_CHARS - 1).collect();
    cut.push('…');
    cut
}

fn format_timestamp(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}
