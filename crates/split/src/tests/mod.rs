//! Cross-module tests for the chunking pipeline.
