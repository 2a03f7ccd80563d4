use anyhow::Result;
use tracing::debug;

use super::patterns::InsightPatterns;
use super::rules::{Effect, ParseState, RuleKind, Section};
use crate::model::{InsightSections, LineTrace};

#[derive(Debug, Clone)]
pub struct ParseTrace {
    pub sections: InsightSections,
    pub lines: Vec<LineTrace>,
}

impl ParseTrace {
    pub fn matched_line_count(&self) -> usize {
        self.lines.iter().filter(|line| line.rule.is_some()).count()
    }
}

/// Turns a loosely formatted insight narrative into [`InsightSections`].
///
/// Holds only compiled patterns; every call to [`InsightParser::parse`] starts
/// from an empty state, so one parser can be shared freely.
#[derive(Debug, Clone)]
pub struct InsightParser {
    patterns: InsightPatterns,
}

impl InsightParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: InsightPatterns::compile()?,
        })
    }

    /// Never fails. Lines no rule accepts are dropped.
    pub fn parse(&self, text: &str) -> InsightSections {
        let state = content_lines(text)
            .fold(ParseState::default(), |state, (_, line)| {
                self.step(state, line).0
            });

        debug!(
            blocks = ?state.sections.populated_blocks(),
            section = state.section.as_str(),
            "parsed insight"
        );
        state.sections
    }

    pub fn trace(&self, text: &str) -> ParseTrace {
        let mut state = ParseState::default();
        let mut lines = Vec::new();

        for (line_number, line) in content_lines(text) {
            let (next, rule) = self.step(state, line);
            state = next;
            lines.push(LineTrace {
                line_number,
                rule,
                section: state.section,
                text: line.to_string(),
            });
        }

        ParseTrace {
            sections: state.sections,
            lines,
        }
    }

    /// First rule in [`RuleKind::PRIORITY`] that accepts `line`.
    pub fn classify(
        &self,
        section: Section,
        sections: &InsightSections,
        line: &str,
    ) -> Option<(RuleKind, Effect)> {
        RuleKind::PRIORITY.iter().find_map(|rule| {
            rule.evaluate(&self.patterns, section, sections, line)
                .map(|effect| (*rule, effect))
        })
    }

    /// Advances the fold by one trimmed, non-empty line.
    pub fn step(&self, state: ParseState, line: &str) -> (ParseState, Option<RuleKind>) {
        match self.classify(state.section, &state.sections, line) {
            Some((rule, effect)) => {
                if effect == Effect::Discard {
                    debug!(rule = rule.as_str(), line, "discarded line");
                }
                (state.apply(effect), Some(rule))
            }
            None => {
                debug!(section = state.section.as_str(), line, "ignored line");
                (state, None)
            }
        }
    }
}

/// Trimmed non-empty lines with their 1-based line numbers.
///
/// Accepts `\n`, `\r\n` and bare `\r` terminators; each counts as one line.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .flat_map(|raw| raw.split('\r'))
        .enumerate()
        .map(|(index, raw)| (index + 1, raw.trim()))
        .filter(|(_, line)| !line.is_empty())
}
