//! Per-run bookkeeping: what was written where, what failed, what was skipped.

use anyhow::{Context, Result};
use fs_err as fs;
use itertools::Itertools;
use serde::Serialize;
use std::path::Path;

use crate::extract::ExtractionReport;

#[derive(Debug, Clone, Serialize)]
pub struct GroupFailure {
    pub tag: Option<String>,
    pub error: String,
}

#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub source: String,
    pub groups: Vec<ExtractionReport>,
    pub failures: Vec<GroupFailure>,
    pub malformed_rows: usize,
}

impl RunSummary {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, tag: Option<&str>, outcome: Result<ExtractionReport>) {
        match outcome {
            Ok(report) => {
                log::debug!(
                    "{}: {}/{} records -> {}",
                    tag.unwrap_or("-"),
                    report.written,
                    report.requested,
                    report.path.display()
                );
                self.groups.push(report);
            }
            Err(e) => {
                log::error!("extraction for group {} failed: {e:#}", tag.unwrap_or("-"));
                self.failures.push(GroupFailure {
                    tag: tag.map(String::from),
                    error: format!("{e:#}"),
                });
            }
        }
    }

    pub fn records_written(&self) -> usize {
        self.groups.iter().map(|g| g.written).sum()
    }

    pub fn keys_missing(&self) -> usize {
        self.groups.iter().map(|g| g.missing).sum()
    }

    pub fn log(&self) {
        log::info!(
            "{}: {} file(s), {} record(s) written, {} key(s) unresolved",
            self.source,
            self.groups.len(),
            self.records_written(),
            self.keys_missing()
        );
        if self.malformed_rows > 0 {
            log::warn!("{} malformed row(s) skipped", self.malformed_rows);
        }
        if !self.failures.is_empty() {
            log::warn!(
                "failed group(s): {}",
                self.failures
                    .iter()
                    .map(|f| f.tag.as_deref().unwrap_or("-"))
                    .join(", ")
            );
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let f = fs::File::create(path)?;
        serde_json::to_writer_pretty(f, self)
            .with_context(|| format!("write summary {}", path.display()))?;
        Ok(())
    }
}
