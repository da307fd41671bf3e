//! Semantic text chunking for language-model training data.
//!
//! Splits a document into size-bounded chunks along section, paragraph,
//! sentence and line boundaries, then cleans up each chunk:
//! - [`measure`]: character or estimated-token sizing
//! - [`policy`]: delimiters and the abbreviation list
//! - [`splitter`]: the section → paragraph → sentence → line cascade
//! - [`postprocess`]: prefixed-line removal, title removal, minimum size
//! - [`pipeline`]: validation and orchestration
//! - [`output`]: JSONL, Alpaca and debug writers

pub mod measure;
pub mod output;
pub mod packing;
pub mod pipeline;
pub mod policy;
pub mod postprocess;
pub mod sentence;
pub mod splitter;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use measure::SizeMode;
pub use output::OutputFormat;
pub use pipeline::{ChunkConfig, ChunkOptions, ChunkPipeline, ChunkRun, ChunkStats};
pub use policy::SplitPolicy;
pub use postprocess::{Chunk, DiscardReason};
pub use splitter::{RawChunk, SplitLevel, Splitter};
