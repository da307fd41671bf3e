//! Preview command handler.
//!
//! Prints the debug view of a chunking run to stdout without writing files.

use chonker_core::{config::AppConfig, AppResult};
use chonker_split::{output, Chunk, ChunkPipeline};
use clap::Args;

use super::args::{read_input, ChunkArgs};

/// Print chunks to stdout in the debug layout
#[derive(Args, Debug)]
pub struct PreviewCommand {
    #[command(flatten)]
    pub chunk: ChunkArgs,

    /// Include chunks discarded as too small
    #[arg(long)]
    pub all: bool,
}

impl PreviewCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing preview command for {:?}", self.chunk.input);

        let pipeline = ChunkPipeline::from_options(&self.chunk.to_options(&config.chunking))?;
        let document = read_input(&self.chunk.input)?;
        let run = pipeline.process(&document);

        let shown: Vec<&Chunk> = run.chunks.iter().filter(|c| self.all || c.kept).collect();
        output::write_debug(std::io::stdout().lock(), &shown, pipeline.config().size_mode)?;
        println!();

        tracing::info!(
            "Previewed {} of {} chunks ({} discarded)",
            shown.len(),
            run.chunks.len(),
            run.stats.discarded
        );

        Ok(())
    }
}
