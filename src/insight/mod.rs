mod parser;
mod patterns;
mod rules;

pub use parser::{InsightParser, ParseTrace};
pub use rules::{RuleKind, Section};
