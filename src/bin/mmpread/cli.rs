use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "mmpread",
    about = "Inspect MMP molecular machine part files",
    version,
    author
)]
pub struct Cli {
    /// Input .mmp file
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Print the scene tree
    #[arg(short, long)]
    pub tree: bool,

    /// Suppress the progress bar (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}
