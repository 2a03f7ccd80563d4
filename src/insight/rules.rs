use serde::Serialize;

use super::patterns::{InsightPatterns, starts_with_bullet_marker, strip_scanning_glyph};
use crate::model::{BetterOption, InsightSections, UnsureEntry, WhyMattersEntry};

/// The section the next line is read into. `None` only before the first header.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    None,
    QuickDecision,
    WhyMatters,
    Tradeoffs,
    Unsure,
    BetterOptions,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::QuickDecision => "quick_decision",
            Self::WhyMatters => "why_matters",
            Self::Tradeoffs => "tradeoffs",
            Self::Unsure => "unsure",
            Self::BetterOptions => "better_options",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    ScanningMarker,
    QuickDecisionHeader,
    QuickDecisionContinuation,
    WhyMattersHeader,
    WhyMattersBullet,
    WhyMattersContinuation,
    TradeoffsHeader,
    TradeoffsContinuation,
    UnsureHeader,
    UnsureBullet,
    BetterOptionsHeader,
    BetterOptionsEntry,
}

/// What a matched rule does to the parse state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Effect {
    SetScanning(String),
    Enter {
        section: Section,
        seed: Option<String>,
    },
    AppendQuickDecision(String),
    PushWhyMatters(WhyMattersEntry),
    ExtendWhyMatters(String),
    AppendTradeoffs(String),
    PushUnsure(UnsureEntry),
    PushBetterOption(BetterOption),
    /// The line belongs to the active section but carries nothing usable.
    Discard,
}

impl RuleKind {
    /// Evaluation order. The first rule that matches a line wins.
    pub const PRIORITY: [RuleKind; 12] = [
        Self::ScanningMarker,
        Self::QuickDecisionHeader,
        Self::QuickDecisionContinuation,
        Self::WhyMattersHeader,
        Self::WhyMattersBullet,
        Self::WhyMattersContinuation,
        Self::TradeoffsHeader,
        Self::TradeoffsContinuation,
        Self::UnsureHeader,
        Self::UnsureBullet,
        Self::BetterOptionsHeader,
        Self::BetterOptionsEntry,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ScanningMarker => "scanning_marker",
            Self::QuickDecisionHeader => "quick_decision_header",
            Self::QuickDecisionContinuation => "quick_decision_continuation",
            Self::WhyMattersHeader => "why_matters_header",
            Self::WhyMattersBullet => "why_matters_bullet",
            Self::WhyMattersContinuation => "why_matters_continuation",
            Self::TradeoffsHeader => "tradeoffs_header",
            Self::TradeoffsContinuation => "tradeoffs_continuation",
            Self::UnsureHeader => "unsure_header",
            Self::UnsureBullet => "unsure_bullet",
            Self::BetterOptionsHeader => "better_options_header",
            Self::BetterOptionsEntry => "better_options_entry",
        }
    }

    /// Tests this rule alone against a trimmed, non-empty line.
    pub fn evaluate(
        self,
        patterns: &InsightPatterns,
        section: Section,
        sections: &InsightSections,
        line: &str,
    ) -> Option<Effect> {
        match self {
            Self::ScanningMarker => patterns
                .is_scanning_marker(line)
                .then(|| Effect::SetScanning(strip_scanning_glyph(line).to_string())),
            Self::QuickDecisionHeader => {
                patterns
                    .quick_decision_header(line)
                    .map(|trailing| Effect::Enter {
                        section: Section::QuickDecision,
                        seed: Some(trailing.to_string()),
                    })
            }
            Self::QuickDecisionContinuation => {
                if section != Section::QuickDecision || patterns.is_bold_header(line) {
                    return None;
                }
                Some(Effect::AppendQuickDecision(line.to_string()))
            }
            Self::WhyMattersHeader => patterns.is_why_matters_header(line).then_some(Effect::Enter {
                section: Section::WhyMatters,
                seed: None,
            }),
            Self::WhyMattersBullet => {
                if section != Section::WhyMatters {
                    return None;
                }
                patterns.titled_bullet(line).map(|(title, body)| {
                    Effect::PushWhyMatters(WhyMattersEntry {
                        title,
                        content: vec![body],
                    })
                })
            }
            Self::WhyMattersContinuation => {
                // TODO: confirm the bold-header guard is meant to hand unrelated section
                // headers to later rules rather than only catching `**Title**` lines.
                if section != Section::WhyMatters
                    || sections.why_matters.is_empty()
                    || patterns.is_bold_header(line)
                {
                    return None;
                }
                if starts_with_bullet_marker(line) {
                    Some(Effect::Discard)
                } else {
                    Some(Effect::ExtendWhyMatters(line.to_string()))
                }
            }
            Self::TradeoffsHeader => patterns.tradeoffs_header(line).map(|trailing| Effect::Enter {
                section: Section::Tradeoffs,
                seed: (!trailing.is_empty()).then(|| trailing.to_string()),
            }),
            Self::TradeoffsContinuation => {
                if section != Section::Tradeoffs || patterns.is_bold_header(line) {
                    return None;
                }
                Some(Effect::AppendTradeoffs(line.to_string()))
            }
            Self::UnsureHeader => patterns.is_unsure_header(line).then_some(Effect::Enter {
                section: Section::Unsure,
                seed: None,
            }),
            Self::UnsureBullet => {
                if section != Section::Unsure {
                    return None;
                }
                patterns
                    .titled_bullet(line)
                    .map(|(title, content)| Effect::PushUnsure(UnsureEntry { title, content }))
            }
            Self::BetterOptionsHeader => {
                patterns
                    .is_better_options_header(line)
                    .then_some(Effect::Enter {
                        section: Section::BetterOptions,
                        seed: None,
                    })
            }
            Self::BetterOptionsEntry => {
                if section != Section::BetterOptions {
                    return None;
                }
                Some(
                    patterns
                        .better_option(line)
                        .map_or(Effect::Discard, |(name, details)| {
                            Effect::PushBetterOption(BetterOption { name, details })
                        }),
                )
            }
        }
    }
}

/// Fold accumulator: the active section plus the record built so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseState {
    pub section: Section,
    pub sections: InsightSections,
}

impl ParseState {
    pub fn apply(mut self, effect: Effect) -> Self {
        match effect {
            Effect::SetScanning(text) => self.sections.scanning = text,
            Effect::Enter { section, seed } => {
                self.section = section;
                match (section, seed) {
                    (Section::QuickDecision, Some(seed)) => self.sections.quick_decision = seed,
                    (Section::Tradeoffs, Some(seed)) => self.sections.tradeoffs = seed,
                    _ => {}
                }
            }
            Effect::AppendQuickDecision(text) => push_joined(&mut self.sections.quick_decision, &text),
            Effect::PushWhyMatters(entry) => self.sections.why_matters.push(entry),
            Effect::ExtendWhyMatters(text) => {
                if let Some(last) = self.sections.why_matters.last_mut() {
                    last.content.push(text);
                }
            }
            Effect::AppendTradeoffs(text) => push_joined(&mut self.sections.tradeoffs, &text),
            Effect::PushUnsure(entry) => self.sections.unsure.push(entry),
            Effect::PushBetterOption(option) => self.sections.better_options.push(option),
            Effect::Discard => {}
        }
        self
    }
}

fn push_joined(target: &mut String, text: &str) {
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}
