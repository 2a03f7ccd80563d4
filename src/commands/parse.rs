use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::ParseArgs;
use crate::insight::InsightParser;
use crate::model::ParseReport;
use crate::util::{now_utc_string, read_input, sha256_hex, write_json_pretty};

const REPORT_VERSION: u32 = 1;

pub fn run(args: ParseArgs) -> Result<()> {
    if args.sections_only && args.output.is_none() {
        bail!("--sections-only requires --output");
    }

    let (text, source) = read_input(args.input.as_deref())?;
    let parser = InsightParser::new()?;

    if args.sections_only {
        let sections = parser.parse(&text);
        if sections.is_empty() {
            warn!(source = %source, "no insight sections recognized");
        }
        if let Some(path) = args.output {
            write_json_pretty(&path, &sections)?;
            info!(path = %path.display(), blocks = ?sections.populated_blocks(), "wrote sections");
        }
        return Ok(());
    }

    let report = build_report(&parser, &text, &source);

    if report.sections.is_empty() {
        warn!(source = %report.source, "no insight sections recognized");
    }
    info!(
        source = %report.source,
        lines = report.line_count,
        matched = report.matched_line_count,
        blocks = ?report.populated_blocks,
        "parsed insight narrative"
    );

    match args.output {
        Some(path) => {
            write_json_pretty(&path, &report)?;
            info!(path = %path.display(), "wrote parse report");
        }
        None => write_stdout_json(&report, args.compact)?,
    }

    Ok(())
}

pub fn build_report(parser: &InsightParser, text: &str, source: &str) -> ParseReport {
    let trace = parser.trace(text);

    ParseReport {
        report_version: REPORT_VERSION,
        generated_at: now_utc_string(),
        source: source.to_string(),
        source_sha256: sha256_hex(text.as_bytes()),
        line_count: trace.lines.len(),
        matched_line_count: trace.matched_line_count(),
        populated_blocks: trace.sections.populated_blocks(),
        sections: trace.sections,
    }
}

fn write_stdout_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    if compact {
        serde_json::to_writer(&mut output, value)
    } else {
        serde_json::to_writer_pretty(&mut output, value)
    }
    .context("failed to serialize parse report json")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}
