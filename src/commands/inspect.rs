use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::InspectArgs;
use crate::insight::{InsightParser, ParseTrace};
use crate::util::read_input;

pub fn run(args: InspectArgs) -> Result<()> {
    let (text, source) = read_input(args.input.as_deref())?;
    let parser = InsightParser::new()?;
    let trace = parser.trace(&text);

    info!(
        source = %source,
        lines = trace.lines.len(),
        matched = trace.matched_line_count(),
        "traced insight narrative"
    );

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &trace.lines)
            .context("failed to serialize trace json output")?;
        writeln!(output)?;
    } else {
        write_trace_text(&mut output, &trace)?;
    }
    output.flush()?;
    Ok(())
}

/// One tab-separated row per non-empty line: number, rule, section, text.
pub fn write_trace_text<W: Write>(output: &mut W, trace: &ParseTrace) -> Result<()> {
    for line in &trace.lines {
        writeln!(
            output,
            "{}\t{}\t{}\t{}",
            line.line_number,
            line.rule.map_or("-", |rule| rule.as_str()),
            line.section.as_str(),
            line.text,
        )?;
    }
    Ok(())
}
