//! Chunking arguments shared by every command.

use chonker_core::{AppError, AppResult, ChunkingDefaults};
use chonker_split::ChunkOptions;
use clap::{ArgGroup, Args};
use std::path::{Path, PathBuf};

/// Input file and chunking limits
#[derive(Args, Debug, Clone)]
#[command(group(
    ArgGroup::new("limit")
        .required(true)
        .args(["chunk_size", "max_tokens"])
))]
pub struct ChunkArgs {
    /// Path to the input text file
    pub input: PathBuf,

    /// Maximum character size for each chunk
    #[arg(short = 's', long, allow_negative_numbers = true)]
    pub chunk_size: Option<i64>,

    /// Maximum estimated token count for each chunk
    #[arg(short = 't', long, allow_negative_numbers = true)]
    pub max_tokens: Option<i64>,

    /// Minimum character size; smaller chunks are skipped (character mode)
    #[arg(long, allow_negative_numbers = true)]
    pub min_size: Option<i64>,

    /// Minimum estimated token count; smaller chunks are skipped (token mode)
    #[arg(long, allow_negative_numbers = true)]
    pub min_tokens: Option<i64>,

    /// Remove a leading line of at most MAX_TOKENS followed by a blank line (0 disables)
    #[arg(long, value_name = "MAX_TOKENS", allow_negative_numbers = true)]
    pub remove_title: Option<i64>,

    /// Remove lines that start with PREFIX (after leading whitespace)
    #[arg(long, value_name = "PREFIX")]
    pub remove_line_prefix: Option<String>,
}

impl ChunkArgs {
    /// Merge flags with config-file defaults into raw chunking options.
    ///
    /// Only the minimum matching the active size mode applies; an explicit
    /// minimum for the other mode is ignored with a warning.
    pub fn to_options(&self, defaults: &ChunkingDefaults) -> ChunkOptions {
        let token_mode = self.max_tokens.is_some();

        let (min_size, ignored_flag, ignored_value) = if token_mode {
            (self.min_tokens.or(defaults.min_tokens), "--min-size", self.min_size)
        } else {
            (self.min_size.or(defaults.min_size), "--min-tokens", self.min_tokens)
        };

        if ignored_value.is_some() {
            tracing::warn!(
                "{} does not apply in {} mode; ignoring it",
                ignored_flag,
                if token_mode { "token" } else { "character" }
            );
        }

        ChunkOptions {
            chunk_size: self.chunk_size,
            max_tokens: self.max_tokens,
            min_size,
            remove_title: self.remove_title.or(defaults.remove_title),
            remove_line_prefix: self
                .remove_line_prefix
                .clone()
                .or_else(|| defaults.remove_line_prefix.clone()),
        }
    }
}

/// Read the whole input document as UTF-8.
pub fn read_input(path: &Path) -> AppResult<String> {
    if !path.is_file() {
        return Err(AppError::Input(format!(
            "Input file not found at {:?}",
            path
        )));
    }

    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes)
        .map_err(|e| AppError::Input(format!("{:?} is not valid UTF-8: {}", path, e)))
}
