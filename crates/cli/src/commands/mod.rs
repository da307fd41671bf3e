//! Command handlers for the Chonker CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod args;
pub mod preview;
pub mod split;

// Re-export command types for convenience
pub use preview::PreviewCommand;
pub use split::SplitCommand;
