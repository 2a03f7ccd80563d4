use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "insight-sections",
    version,
    about = "Split product insight narratives into structured display sections"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Parse(ParseArgs),
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    /// Narrative file; reads stdin when omitted.
    #[arg(long)]
    pub input: Option<PathBuf>,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub sections_only: bool,

    #[arg(long, default_value_t = false)]
    pub compact: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[arg(long)]
    pub input: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}
