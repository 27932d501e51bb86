//! # Run Summary Module
//!
//! Raccoglie l'esito di ogni file di una run e ne deriva i conteggi finali.
//!
//! ## Invariante:
//! `succeeded() + failed() == total()`: i conteggi sono calcolati dalla
//! lista degli esiti, non da contatori separati.

use crate::error::ReencodeError;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Result of processing a single input file
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    /// Final path on success (planned path in a dry run)
    pub result: Result<PathBuf, ReencodeError>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of one run, in processing order
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<FileOutcome>,
    pub dry_run: bool,
    pub duration: Duration,
}

impl RunSummary {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    pub fn record(&mut self, input: &Path, result: Result<PathBuf, ReencodeError>) {
        self.outcomes.push(FileOutcome {
            input: input.to_path_buf(),
            result,
        });
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &ReencodeError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.input.as_path(), e)))
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Processed: {} files | Succeeded: {} | Failed: {}{}",
            self.total(),
            self.succeeded(),
            self.failed(),
            if self.dry_run { " | dry run" } else { "" }
        )
    }
}
