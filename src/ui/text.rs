use std::sync::OnceLock;

use chrono::{DateTime, Local};
use regex::Regex;

pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockFormat {
    TwentyFourHour,
    TwelveHour,
}

impl ClockFormat {
    pub fn from_config(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "12h" | "12" => ClockFormat::TwelveHour,
            _ => ClockFormat::TwentyFourHour,
        }
    }

    pub fn time(&self, at: &DateTime<Local>) -> String {
        match self {
            ClockFormat::TwentyFourHour => at.format("%H:%M").to_string(),
            ClockFormat::TwelveHour => at.format("%-I:%M %p").to_string(),
        }
    }

    pub fn date_time(&self, at: &DateTime<Local>) -> String {
        format!("{} at {}", at.format("%A, %B %-d, %Y"), self.time(at))
    }
}

/// First `limit` characters of `text`, always followed by the ellipsis marker.
pub fn excerpt(text: &str, limit: usize) -> String {
    let mut out: String = text.chars().take(limit).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Renders calendar descriptions as plain text. Links keep their target.
pub fn plain_text(description: &str) -> String {
    if !description.contains('<') {
        return description.trim().to_string();
    }

    static LINK_RE: OnceLock<Regex> = OnceLock::new();
    let links = LINK_RE.get_or_init(|| {
        Regex::new(r#"(?is)<a\s+[^>]*?href=["']([^"']+)["'][^>]*>(.*?)</a>"#)
            .expect("invalid anchor regex")
    });

    let with_targets = links.replace_all(description, |caps: &regex::Captures| {
        let url = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
        let label = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
        if label.is_empty() || label.eq_ignore_ascii_case(url) {
            url.to_string()
        } else {
            format!("{label} ({url})")
        }
    });

    html2text::from_read(with_targets.as_bytes(), 1000)
        .trim_end()
        .to_string()
}
