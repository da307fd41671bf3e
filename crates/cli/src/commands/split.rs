//! Split command handler.
//!
//! Chunks a text file and writes the dataset (and optionally the debug dump)
//! next to it.

use chonker_core::{config::AppConfig, AppResult};
use chonker_split::{output, ChunkPipeline, ChunkRun, OutputFormat};
use clap::Args;
use std::path::PathBuf;

use super::args::{read_input, ChunkArgs};

/// Split a text file into a chunked dataset
#[derive(Args, Debug)]
pub struct SplitCommand {
    #[command(flatten)]
    pub chunk: ChunkArgs,

    /// Output file (extension is set by the format)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (jsonl, alpaca)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Also save a human-readable .debug.txt file for inspection
    #[arg(long)]
    pub debug: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Files written by one split.
struct Written {
    dataset: PathBuf,
    debug: Option<PathBuf>,
}

impl SplitCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing split command for {:?}", self.chunk.input);

        let format = self.resolve_format(config)?;
        let pipeline = ChunkPipeline::from_options(&self.chunk.to_options(&config.chunking))?;
        let chunk_config = pipeline.config();

        tracing::info!(
            "Using {}. Max size: {}, Min size: {}",
            chunk_config.size_mode.unit_label(),
            chunk_config.size_limit,
            chunk_config.min_size.unwrap_or(0)
        );
        if let Some(max) = chunk_config.remove_title_max_tokens {
            tracing::info!("Removing titles of at most {} tokens", max);
        }

        let document = read_input(&self.chunk.input)?;
        let run = pipeline.process(&document);

        let written = self.write(&run, format, &pipeline)?;
        self.report(&run, format, &pipeline, &written)
    }

    /// Flag first, then the config file, then JSONL.
    fn resolve_format(&self, config: &AppConfig) -> AppResult<OutputFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        match config.chunking.format {
            Some(ref name) => name.parse(),
            None => Ok(OutputFormat::default()),
        }
    }

    fn write(
        &self,
        run: &ChunkRun,
        format: OutputFormat,
        pipeline: &ChunkPipeline,
    ) -> AppResult<Written> {
        let input = &self.chunk.input;
        let dataset = output::output_path(input, self.output.as_deref(), format);

        tracing::info!("Formatting {} chunks for output", run.stats.kept);
        output::write_dataset(&dataset, format, &run.kept_texts())?;
        tracing::info!("Output saved to {:?}", dataset);

        let debug = if self.debug {
            let path = output::debug_path(input);
            let kept: Vec<_> = run.kept().collect();
            output::write_debug_file(&path, &kept, pipeline.config().size_mode)?;
            tracing::info!("Debug output saved to {:?}", path);
            Some(path)
        } else {
            None
        };

        Ok(Written { dataset, debug })
    }

    fn report(
        &self,
        run: &ChunkRun,
        format: OutputFormat,
        pipeline: &ChunkPipeline,
        written: &Written,
    ) -> AppResult<()> {
        let stats = &run.stats;

        if self.json {
            let output = serde_json::json!({
                "input": self.chunk.input,
                "output": written.dataset,
                "debugOutput": written.debug,
                "format": format.as_str(),
                "unit": pipeline.config().size_mode,
                "sizeLimit": pipeline.config().size_limit,
                "stats": stats,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!(
                "Wrote {} chunks to {} ({} discarded as too small, {} emptied, {} oversized)",
                stats.kept,
                written.dataset.display(),
                stats.discarded,
                stats.emptied,
                stats.oversized
            );
            if let Some(ref path) = written.debug {
                println!("Debug view: {}", path.display());
            }
        }

        Ok(())
    }
}
