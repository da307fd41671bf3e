//! Chunking pipeline orchestrator.

use chonker_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::measure::SizeMode;
use crate::policy::SplitPolicy;
use crate::postprocess::{Chunk, PostProcessor};
use crate::splitter::Splitter;

/// Unvalidated chunking options, as a user supplies them.
///
/// Exactly one of `chunk_size` (characters) and `max_tokens` (estimated
/// tokens) selects the size mode. `min_size` is in that same unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkOptions {
    pub chunk_size: Option<i64>,
    pub max_tokens: Option<i64>,
    pub min_size: Option<i64>,
    pub remove_title: Option<i64>,
    pub remove_line_prefix: Option<String>,
}

/// Validated configuration for chunking pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Maximum chunk size, inclusive
    pub size_limit: usize,

    /// Unit for `size_limit` and `min_size`
    pub size_mode: SizeMode,

    /// Chunks measuring less than this are discarded
    pub min_size: Option<usize>,

    /// Maximum estimated tokens of a removable leading title
    pub remove_title_max_tokens: Option<usize>,

    /// Lines starting with this literal are removed
    pub remove_line_prefix: Option<String>,

    /// Boundary heuristics
    pub policy: SplitPolicy,
}

impl ChunkConfig {
    /// A configuration with only a size limit set.
    pub fn new(size_limit: usize, size_mode: SizeMode) -> Self {
        Self {
            size_limit,
            size_mode,
            min_size: None,
            remove_title_max_tokens: None,
            remove_line_prefix: None,
            policy: SplitPolicy::default(),
        }
    }

    /// Validate raw options into a configuration.
    ///
    /// Fails when neither or both size limits are given, when any threshold
    /// is negative, when the size limit is zero, or when the line prefix is
    /// empty. A title limit of zero disables title removal.
    pub fn from_options(options: &ChunkOptions) -> AppResult<Self> {
        let (limit, size_mode) = match (options.chunk_size, options.max_tokens) {
            (Some(size), None) => (size, SizeMode::Chars),
            (None, Some(tokens)) => (tokens, SizeMode::Tokens),
            (Some(_), Some(_)) => {
                return Err(AppError::Config(
                    "Specify either a character chunk size or a token limit, not both".to_string(),
                ))
            }
            (None, None) => {
                return Err(AppError::Config(
                    "A character chunk size or a token limit is required".to_string(),
                ))
            }
        };

        let size_limit = non_negative("size limit", limit)?;
        if size_limit == 0 {
            return Err(AppError::Config("size limit must be positive".to_string()));
        }

        let min_size = options
            .min_size
            .map(|min| non_negative("minimum size", min))
            .transpose()?
            .filter(|min| *min > 0);

        let remove_title_max_tokens = options
            .remove_title
            .map(|max| non_negative("title token limit", max))
            .transpose()?
            .filter(|max| *max > 0);

        if options.remove_line_prefix.as_deref() == Some("") {
            return Err(AppError::Config("line prefix must not be empty".to_string()));
        }

        Ok(Self {
            size_limit,
            size_mode,
            min_size,
            remove_title_max_tokens,
            remove_line_prefix: options.remove_line_prefix.clone(),
            policy: SplitPolicy::default(),
        })
    }
}

fn non_negative(name: &str, value: i64) -> AppResult<usize> {
    usize::try_from(value)
        .map_err(|_| AppError::Config(format!("{} must be non-negative, got {}", name, value)))
}

/// Counts describing one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkStats {
    /// Raw chunks produced by the splitter
    pub produced: usize,

    /// Chunks in the final output
    pub kept: usize,

    /// Chunks discarded as too small
    pub discarded: usize,

    /// Chunks dropped because line/title removal left nothing
    pub emptied: usize,

    /// Kept chunks that are single lines over the size limit
    pub oversized: usize,
}

/// Output of a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct ChunkRun {
    /// Kept and discarded chunks in document order
    pub chunks: Vec<Chunk>,
    pub stats: ChunkStats,
}

impl ChunkRun {
    /// Chunks that survived post-processing.
    pub fn kept(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter().filter(|c| c.kept)
    }

    /// Texts of the kept chunks, in order.
    pub fn kept_texts(&self) -> Vec<&str> {
        self.kept().map(|c| c.text.as_str()).collect()
    }
}

/// Split-then-clean pipeline.
pub struct ChunkPipeline {
    config: ChunkConfig,
}

impl ChunkPipeline {
    /// Create a new pipeline with configuration.
    pub fn new(config: ChunkConfig) -> Self {
        Self { config }
    }

    /// Validate `options` and build a pipeline from them.
    pub fn from_options(options: &ChunkOptions) -> AppResult<Self> {
        ChunkConfig::from_options(options).map(Self::new)
    }

    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Process a document into chunks.
    ///
    /// Deterministic: the same document and configuration always produce
    /// the same chunks.
    pub fn process(&self, document: &str) -> ChunkRun {
        let config = &self.config;

        let splitter = Splitter::new(config.size_limit, config.size_mode, config.policy.clone());
        let raw = splitter.split(document);
        let produced = raw.len();

        if produced == 0 {
            tracing::warn!("Document has no content; no chunks produced");
            return ChunkRun::default();
        }

        let post = PostProcessor {
            mode: config.size_mode,
            min_size: config.min_size,
            remove_title_max_tokens: config.remove_title_max_tokens,
            remove_line_prefix: config.remove_line_prefix.clone(),
        };
        let processed = post.process(raw);

        let kept = processed.chunks.iter().filter(|c| c.kept).count();
        let stats = ChunkStats {
            produced,
            kept,
            discarded: processed.chunks.len() - kept,
            emptied: processed.emptied,
            oversized: processed
                .chunks
                .iter()
                .filter(|c| c.kept && c.oversized)
                .count(),
        };

        if stats.oversized > 0 {
            tracing::warn!(
                "{} chunk(s) exceed the limit of {} {}",
                stats.oversized,
                config.size_limit,
                config.size_mode.unit_label()
            );
        }

        tracing::info!(
            "Chunking complete: {} kept, {} discarded, {} emptied from {} bytes",
            stats.kept,
            stats.discarded,
            stats.emptied,
            document.len()
        );

        ChunkRun {
            chunks: processed.chunks,
            stats,
        }
    }
}
