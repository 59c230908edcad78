//! Chunked CSV persistence
//!
//! Records accumulate in memory and are flushed to `<prefix>_<count>.csv`
//! every time `chunk_size` new records have been produced. In cumulative
//! mode each artifact is a full snapshot and supersedes the previous one, so
//! exactly one artifact exists at any time. In delta mode each artifact holds
//! only the records since the previous flush.
//!
//! Artifacts are written to a `.tmp` sibling and renamed into place.

use crate::config::OutputMode;
use crate::model::FlatRecord;
use crate::output::error::{OutputError, OutputResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes record snapshots on a row-count cadence
#[derive(Debug)]
pub struct ChunkWriter {
    directory: PathBuf,
    prefix: String,
    mode: OutputMode,
    chunk_size: usize,

    /// Column names taken from the first record ever flushed
    header: Option<Vec<&'static str>>,

    /// Records already persisted
    flushed_count: usize,

    /// Most recent artifact, deleted by the next cumulative flush
    last_artifact: Option<PathBuf>,

    artifacts_written: usize,
}

impl ChunkWriter {
    /// Creates a writer, creating the output directory if needed
    ///
    /// # Arguments
    ///
    /// * `directory` - Where artifacts are written
    /// * `prefix` - File name prefix
    /// * `mode` - Cumulative snapshots or deltas
    /// * `chunk_size` - New records per flush (clamped to at least 1)
    pub fn create(
        directory: impl AsRef<Path>,
        prefix: &str,
        mode: OutputMode,
        chunk_size: usize,
    ) -> OutputResult<Self> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory)?;

        Ok(Self {
            directory,
            prefix: prefix.to_string(),
            mode,
            chunk_size: chunk_size.max(1),
            header: None,
            flushed_count: 0,
            last_artifact: None,
            artifacts_written: 0,
        })
    }

    /// Path of the artifact for a cumulative record count
    pub fn artifact_path(&self, count: usize) -> PathBuf {
        self.directory.join(format!("{}_{}.csv", self.prefix, count))
    }

    /// True once `chunk_size` records have been produced since the last flush
    pub fn should_flush(&self, total: usize) -> bool {
        total.saturating_sub(self.flushed_count) >= self.chunk_size
    }

    /// Persists `records`, the full set accumulated so far
    ///
    /// Returns the artifact written, or None when nothing is new since the
    /// previous flush.
    ///
    /// # Errors
    ///
    /// * `OutputError::SchemaMismatch` - A new record's columns differ from the header
    /// * `OutputError::Io` / `OutputError::Csv` - The artifact could not be written
    pub fn flush(&mut self, records: &[FlatRecord]) -> OutputResult<Option<PathBuf>> {
        let total = records.len();
        if total <= self.flushed_count {
            return Ok(None);
        }

        let header = match &self.header {
            Some(header) => header.clone(),
            None => {
                let header: Vec<&'static str> = records[0].columns().collect();
                self.header = Some(header.clone());
                header
            }
        };

        for (row, record) in records.iter().enumerate().skip(self.flushed_count) {
            if !record.has_columns(&header) {
                return Err(OutputError::SchemaMismatch {
                    row,
                    expected: header.len(),
                    found: record.len(),
                });
            }
        }

        let rows = match self.mode {
            OutputMode::Cumulative => records,
            OutputMode::Delta => &records[self.flushed_count..],
        };

        let path = self.artifact_path(total);
        write_atomically(&path, &header, rows)?;

        if self.mode == OutputMode::Cumulative {
            if let Some(previous) = self.last_artifact.take().filter(|p| *p != path) {
                if let Err(e) = fs::remove_file(&previous) {
                    tracing::warn!("Failed to remove {}: {}", previous.display(), e);
                }
            }
        }

        tracing::info!(
            "Saved {} records to {} ({} total)",
            rows.len(),
            path.display(),
            total
        );

        self.flushed_count = total;
        self.last_artifact = Some(path.clone());
        self.artifacts_written += 1;

        Ok(Some(path))
    }

    /// Flushes whatever is left at the end of a run
    pub fn finish(&mut self, records: &[FlatRecord]) -> OutputResult<Option<PathBuf>> {
        self.flush(records)
    }

    pub fn last_artifact(&self) -> Option<&Path> {
        self.last_artifact.as_deref()
    }

    pub fn artifacts_written(&self) -> usize {
        self.artifacts_written
    }
}

fn write_atomically(path: &Path, header: &[&str], rows: &[FlatRecord]) -> OutputResult<()> {
    let tmp = path.with_extension("csv.tmp");

    {
        let mut writer = csv::Writer::from_path(&tmp)?;
        writer.write_record(header)?;
        for record in rows {
            writer.write_record(record.to_csv_row())?;
        }
        writer.flush()?;
    }

    fs::rename(&tmp, path)?;
    Ok(())
}
