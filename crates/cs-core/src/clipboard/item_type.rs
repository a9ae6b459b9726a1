use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(https?://|www\.)").expect("valid url pattern"));

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

const CODE_MARKERS: [&str; 6] = ["{", "}", "function", "const", "=>", "import"];

/// Coarse content kind, derived once from the text when an item is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Text,
    Url,
    Email,
    Code,
}

impl ItemType {
    /// Classify captured text.
    ///
    /// Checks run in a fixed order: url, email, code, text. The first match wins,
    /// so `https://x.com/{id}` is a url even though it contains a brace.
    pub fn classify(text: &str) -> Self {
        if URL_PATTERN.is_match(text) {
            return ItemType::Url;
        }

        if EMAIL_PATTERN.is_match(text) {
            return ItemType::Email;
        }

        if CODE_MARKERS.iter().any(|marker| text.contains(marker)) {
            return ItemType::Code;
        }

        ItemType::Text
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Text => "text",
            ItemType::Url => "url",
            ItemType::Email => "email",
            ItemType::Code => "code",
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_basic_examples() {
        assert_eq!(ItemType::classify("https://x.com"), ItemType::Url);
        assert_eq!(ItemType::classify("a@b.com"), ItemType::Email);
        assert_eq!(ItemType::classify("const x => {}"), ItemType::Code);
        assert_eq!(ItemType::classify("hello"), ItemType::Text);
    }

    #[test]
    fn url_detection_is_case_insensitive_and_anchored() {
        assert_eq!(ItemType::classify("HTTP://EXAMPLE.ORG"), ItemType::Url);
        assert_eq!(ItemType::classify("WWW.example.org"), ItemType::Url);
        assert_eq!(ItemType::classify("see https://x.com"), ItemType::Text);
    }

    #[test]
    fn url_wins_over_code_markers() {
        assert_eq!(ItemType::classify("https://x.com/{id}"), ItemType::Url);
    }

    #[test]
    fn email_requires_whole_string_shape() {
        assert_eq!(ItemType::classify("mail me at a@b.com"), ItemType::Text);
        assert_eq!(ItemType::classify("a@b"), ItemType::Text);
        assert_eq!(ItemType::classify("first.last@sub.domain.io"), ItemType::Email);
    }

    #[test]
    fn code_markers_are_plain_substrings() {
        assert_eq!(ItemType::classify("import os"), ItemType::Code);
        assert_eq!(ItemType::classify("constant"), ItemType::Code);
        assert_eq!(ItemType::classify("my function"), ItemType::Code);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ItemType::Email).unwrap(), "\"email\"");
    }
}
