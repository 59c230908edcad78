//! Output module for persisting harvested records
//!
//! This module handles:
//! - Writing record chunks to CSV artifacts
//! - Summarizing a run for the CLI report

mod chunk_writer;
mod error;
pub mod stats;

pub use chunk_writer::ChunkWriter;
pub use error::{OutputError, OutputResult};
pub use stats::{print_statistics, HarvestStatistics};
