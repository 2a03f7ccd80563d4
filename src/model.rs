use serde::Serialize;

use crate::insight::{RuleKind, Section};

/// Structured view of one insight narrative.
///
/// Every field defaults to empty. A renderer treats an empty string or an
/// empty list as "omit this block".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSections {
    pub scanning: String,
    pub quick_decision: String,
    pub why_matters: Vec<WhyMattersEntry>,
    pub tradeoffs: String,
    pub unsure: Vec<UnsureEntry>,
    pub better_options: Vec<BetterOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhyMattersEntry {
    pub title: String,
    pub content: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsureEntry {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BetterOption {
    pub name: String,
    pub details: String,
}

impl InsightSections {
    pub fn is_empty(&self) -> bool {
        self.populated_blocks().is_empty()
    }

    /// Names of the non-empty blocks, in field order.
    pub fn populated_blocks(&self) -> Vec<&'static str> {
        let mut blocks = Vec::new();
        if !self.scanning.is_empty() {
            blocks.push("scanning");
        }
        if !self.quick_decision.is_empty() {
            blocks.push("quickDecision");
        }
        if !self.why_matters.is_empty() {
            blocks.push("whyMatters");
        }
        if !self.tradeoffs.is_empty() {
            blocks.push("tradeoffs");
        }
        if !self.unsure.is_empty() {
            blocks.push("unsure");
        }
        if !self.better_options.is_empty() {
            blocks.push("betterOptions");
        }
        blocks
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineTrace {
    pub line_number: usize,
    pub rule: Option<RuleKind>,
    pub section: Section,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    pub report_version: u32,
    pub generated_at: String,
    pub source: String,
    pub source_sha256: String,
    pub line_count: usize,
    pub matched_line_count: usize,
    pub populated_blocks: Vec<&'static str>,
    pub sections: InsightSections,
}
