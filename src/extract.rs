use regex::Regex;
use std::sync::LazyLock;

static LABELED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Student ID\s*:?\s*(\d+)").expect("labeled id pattern"));

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]").expect("bracketed id pattern"));

/// Pulls a student identifier out of one page's text.
pub trait IdExtractor {
    fn extract(&self, text: &str) -> Option<String>;
}

/// `Student ID: 12345`, `Student ID 12345`, `Student ID:12345`
#[derive(Debug, Clone, Copy, Default)]
pub struct LabeledId;

/// `[12345]`
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketedId;

impl IdExtractor for LabeledId {
    fn extract(&self, text: &str) -> Option<String> {
        first_capture(&LABELED, text)
    }
}

impl IdExtractor for BracketedId {
    fn extract(&self, text: &str) -> Option<String> {
        first_capture(&BRACKETED, text)
    }
}

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
