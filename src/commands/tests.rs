use std::fs;

use super::inspect::write_trace_text;
use super::parse::{self, build_report};
use crate::cli::ParseArgs;
use crate::insight::InsightParser;
use crate::util::{sha256_hex, write_json_pretty};

const NARRATIVE: &str = "🤔 Scanning your Lay's Classic...\n\n\
**Quick Decision:** Skip it for now.\n\
random aside\n\
**Better Options**:\n\
- Baked Chips (Why it's better: half the fat)\n";

#[test]
fn build_report_counts_lines_and_blocks() {
    let parser = InsightParser::new().expect("patterns compile");
    let report = build_report(&parser, NARRATIVE, "narrative.txt");

    assert_eq!(report.report_version, 1);
    assert_eq!(report.source, "narrative.txt");
    assert_eq!(report.source_sha256, sha256_hex(NARRATIVE.as_bytes()));
    assert_eq!(report.source_sha256.len(), 64);
    assert_eq!(report.line_count, 5);
    assert_eq!(report.matched_line_count, 5);
    assert_eq!(
        report.populated_blocks,
        vec!["scanning", "quickDecision", "betterOptions"]
    );
    assert_eq!(report.sections.quick_decision, "Skip it for now. random aside");
    assert!(report.generated_at.ends_with('Z'));
}

#[test]
fn build_report_accepts_empty_input() {
    let parser = InsightParser::new().expect("patterns compile");
    let report = build_report(&parser, "", "<stdin>");

    assert_eq!(report.line_count, 0);
    assert_eq!(report.matched_line_count, 0);
    assert!(report.populated_blocks.is_empty());
    assert!(report.sections.is_empty());
}

#[test]
fn trace_text_marks_unmatched_lines() {
    let parser = InsightParser::new().expect("patterns compile");
    let trace = parser.trace("preamble\n**Tradeoffs**: salty");
    let mut output = Vec::new();

    write_trace_text(&mut output, &trace).expect("write trace");

    let text = String::from_utf8(output).expect("utf8");
    assert_eq!(
        text,
        "1\t-\tnone\tpreamble\n2\ttradeoffs_header\ttradeoffs\t**Tradeoffs**: salty\n"
    );
}

#[test]
fn report_json_nests_camel_case_sections() {
    let parser = InsightParser::new().expect("patterns compile");
    let report = build_report(&parser, NARRATIVE, "narrative.txt");
    let dir = std::env::temp_dir().join(format!("insight-sections-test-{}", std::process::id()));
    let path = dir.join("reports").join("report.json");

    write_json_pretty(&path, &report).expect("write report");

    let raw = fs::read_to_string(&path).expect("read report");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("parse report");
    assert_eq!(value["report_version"], 1);
    assert_eq!(value["sections"]["quickDecision"], "Skip it for now. random aside");
    assert_eq!(value["sections"]["betterOptions"][0]["name"], "Baked Chips");
    assert_eq!(value["sections"]["betterOptions"][0]["details"], "half the fat");
    assert!(raw.ends_with("}\n"));

    fs::remove_dir_all(&dir).expect("cleanup");
}

#[test]
fn sections_only_writes_bare_sections() {
    let dir = std::env::temp_dir().join(format!("insight-sections-only-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create dir");
    let input = dir.join("narrative.txt");
    let output = dir.join("sections.json");
    fs::write(&input, NARRATIVE).expect("write narrative");

    parse::run(ParseArgs {
        input: Some(input),
        output: Some(output.clone()),
        sections_only: true,
        compact: false,
    })
    .expect("parse run");

    let raw = fs::read_to_string(&output).expect("read sections");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("parse sections");
    assert!(value.get("report_version").is_none());
    assert_eq!(value["scanning"], "Scanning your Lay's Classic...");
    assert_eq!(value["quickDecision"], "Skip it for now. random aside");
    assert_eq!(value["whyMatters"], serde_json::json!([]));

    fs::remove_dir_all(&dir).expect("cleanup");
}

#[test]
fn sections_only_without_output_is_rejected() {
    let err = parse::run(ParseArgs {
        input: None,
        output: None,
        sections_only: true,
        compact: false,
    })
    .expect_err("missing output");

    assert!(err.to_string().contains("--sections-only requires --output"));
}
