//! Chunks command implementation.

use crate::cli::ChunksArgs;
use crate::commands::{display_name, read_input, STDIN};
use crate::error::Result;
use crate::output::Formatter;
use logsift_extractor::chunk_log;

/// Execute the chunks command.
pub async fn execute_chunks(args: ChunksArgs, formatter: &Formatter) -> Result<()> {
    let source = args.file.unwrap_or_else(|| STDIN.to_string());
    let text = read_input(&source)?;

    let chunks: Vec<_> = chunk_log(&text).collect();
    println!("{}", formatter.format_chunks(display_name(&source), &chunks)?);

    Ok(())
}
