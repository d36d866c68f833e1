//! CLI entry point for the cubist tessellation generator

use clap::Parser;
use cubist::io::cli::{Cli, FileProcessor};

fn main() -> cubist::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
