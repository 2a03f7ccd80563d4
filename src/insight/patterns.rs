use anyhow::{Context, Result};
use regex::Regex;

const SCANNING_TOKEN: &str = "Scanning";
const SCANNING_GLYPH: char = '🤔';
const SHOPPING_GLYPH: char = '🛒';

/// Compiled line patterns shared by every rule.
#[derive(Debug, Clone)]
pub struct InsightPatterns {
    quick_decision_header: Regex,
    why_matters_header: Regex,
    tradeoffs_header: Regex,
    unsure_header: Regex,
    better_options_header: Regex,
    bold_header: Regex,
    titled_bullet: Regex,
    justified_option: Regex,
    legacy_option: Regex,
}

impl InsightPatterns {
    pub fn compile() -> Result<Self> {
        Ok(Self {
            quick_decision_header: Regex::new(r"(?i)[*_]{0,2}quick decision:?[*_]{0,2}:?")
                .context("failed to compile quick decision header regex")?,
            why_matters_header: Regex::new(r"(?i)[*_]{0,2}why this matters")
                .context("failed to compile why-this-matters header regex")?,
            tradeoffs_header: Regex::new(r"(?i)[*_]{0,2}tradeoffs?:?[*_]{0,2}:?")
                .context("failed to compile tradeoffs header regex")?,
            unsure_header: Regex::new(r"(?i)what i['’]?m (?:unsure|not sure) about")
                .context("failed to compile unsure header regex")?,
            better_options_header: Regex::new(r"(?i)[*_]{0,2}better options?:?[*_]{0,2}:?")
                .context("failed to compile better options header regex")?,
            bold_header: Regex::new(r"^\*\*[A-Z]").context("failed to compile bold header regex")?,
            titled_bullet: Regex::new(r"^[-*]\s+\*{0,2}(?P<title>[^*:]+)\*{0,2}:\s*(?P<body>.*)$")
                .context("failed to compile titled bullet regex")?,
            justified_option: Regex::new(
                r"(?i)^[-*\s]*(?P<name>.+?)\s*\(\s*why it['’]s better:\s*(?P<details>.+?)\s*\)$",
            )
            .context("failed to compile justified option regex")?,
            legacy_option: Regex::new(
                r"^[-*]\s+\*{0,2}(?P<name>[^*:(]+)\*{0,2}[:\s]*(?P<details>.*)$",
            )
            .context("failed to compile legacy option regex")?,
        })
    }

    pub fn is_scanning_marker(&self, line: &str) -> bool {
        line.contains(SCANNING_TOKEN) || line.contains(SCANNING_GLYPH)
    }

    /// Text after a Quick Decision header, or `None` when the line has none.
    pub fn quick_decision_header<'a>(&self, line: &'a str) -> Option<&'a str> {
        trailing_after(&self.quick_decision_header, line)
    }

    pub fn is_why_matters_header(&self, line: &str) -> bool {
        self.why_matters_header.is_match(line)
    }

    pub fn tradeoffs_header<'a>(&self, line: &'a str) -> Option<&'a str> {
        trailing_after(&self.tradeoffs_header, line)
    }

    pub fn is_unsure_header(&self, line: &str) -> bool {
        self.unsure_header.is_match(line)
    }

    pub fn is_better_options_header(&self, line: &str) -> bool {
        line.contains(SHOPPING_GLYPH) || self.better_options_header.is_match(line)
    }

    /// `**` directly followed by an uppercase letter at line start.
    pub fn is_bold_header(&self, line: &str) -> bool {
        self.bold_header.is_match(line)
    }

    /// Splits `- **Title**: body` into trimmed `(title, body)`.
    pub fn titled_bullet(&self, line: &str) -> Option<(String, String)> {
        let captures = self.titled_bullet.captures(line)?;
        let title = captures.name("title")?.as_str().trim();
        let body = captures.name("body").map_or("", |m| m.as_str()).trim();
        Some((title.to_string(), body.to_string()))
    }

    /// `Name (Why it's better: reason)` first, then `- **Name**: details`.
    ///
    /// The legacy name stops at the first `(`, so a parenthetical suffix such
    /// as a grade never ends up in the name.
    pub fn better_option(&self, line: &str) -> Option<(String, String)> {
        let captures = self
            .justified_option
            .captures(line)
            .or_else(|| self.legacy_option.captures(line))?;
        let name = captures.name("name")?.as_str().trim();
        let details = captures.name("details").map_or("", |m| m.as_str()).trim();
        Some((name.to_string(), details.to_string()))
    }
}

fn trailing_after<'a>(pattern: &Regex, line: &'a str) -> Option<&'a str> {
    pattern.find(line).map(|m| line[m.end()..].trim())
}

pub fn starts_with_bullet_marker(line: &str) -> bool {
    line.starts_with('-') || line.starts_with('*')
}

pub fn strip_scanning_glyph(line: &str) -> &str {
    line.strip_prefix(SCANNING_GLYPH)
        .map(str::trim_start)
        .unwrap_or(line)
}
