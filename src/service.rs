//! The request surface: one method per upload/retrieval operation.
//!
//! Every operation is the same linear pipeline — ingest the uploaded bytes,
//! run the validation engine, serialize the annotated table, then either
//! persist the output under a generated identifier or hand the bytes back
//! inline. The output store and the observer are injected collaborators, so
//! tests run against in-memory fakes.
//!
//! Failures are uniform: any error flattens into the `{"error": message}`
//! body via [`ErrorResponse`]; no partial output is ever produced.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::error::{ProcessingError, ProcessingResult};
use crate::ingestion::{SourceFormat, read_csv_table, read_excel_table};
use crate::observability::{
    ProcessingContext, ProcessingObserver, ProcessingOutcome, severity_for_error,
};
use crate::output::{OutputStore, write_csv, write_excel};
use crate::validation::rules::DEFAULT_SCAN_WIDTH;
use crate::validation::stats::round_seconds;
use crate::validation::{
    ColumnScope, DEFAULT_ROW_CAP, FileStatistics, RuleSet, Validator, scan_worksheet_cells,
};

/// Handle to a persisted output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredOutput {
    /// Opaque identifier the store generated.
    pub file_id: String,
    /// File name the output is served under (`<id>.csv`).
    pub file_name: String,
}

impl StoredOutput {
    fn new(file_id: String) -> Self {
        let file_name = format!("{file_id}.csv");
        Self { file_id, file_name }
    }

    /// Download URL for this output below `base_url`.
    pub fn download_url(&self, base_url: &str) -> String {
        format!("{}/download/{}", base_url.trim_end_matches('/'), self.file_name)
    }
}

/// Success body for operations that persist their output.
#[derive(Debug, Clone, Serialize)]
pub struct FileUrlResponse {
    /// URL the processed file can be downloaded from.
    pub file_url: String,
    /// File statistics, present only for the with-stats operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<FileStatistics>,
}

impl FileUrlResponse {
    /// Build the response body for a stored output.
    pub fn new(stored: &StoredOutput, base_url: &str, statistics: Option<FileStatistics>) -> Self {
        Self {
            file_url: stored.download_url(base_url),
            statistics,
        }
    }

    /// Serialize to the JSON response body.
    pub fn to_json(&self) -> ProcessingResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// The uniform failure body. Callers detect failure by body shape, not by
/// transport status.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human-readable failure message.
    pub error: String,
}

impl ErrorResponse {
    /// Wrap any processing error.
    pub fn from_error(error: &ProcessingError) -> Self {
        Self {
            error: error.to_string(),
        }
    }

    /// Serialize to the JSON response body.
    pub fn to_json(&self) -> ProcessingResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Validates uploaded tabular files.
///
/// One instance serves many independent requests; the only shared state is
/// the append-only output store.
pub struct FileValidationService {
    store: Arc<dyn OutputStore>,
    observer: Option<Arc<dyn ProcessingObserver>>,
}

impl FileValidationService {
    /// Create a service around an output store.
    pub fn new(store: Arc<dyn OutputStore>) -> Self {
        Self {
            store,
            observer: None,
        }
    }

    /// Attach an observer that receives every request outcome.
    pub fn with_observer(mut self, observer: Arc<dyn ProcessingObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Validate delimited text with the letter scan over the first 19
    /// columns and persist the annotated output.
    pub fn validate_csv(&self, bytes: &[u8]) -> ProcessingResult<StoredOutput> {
        let ctx = context("validate_csv", SourceFormat::Csv);
        let started = Instant::now();
        let result = self
            .process_csv(bytes, RuleSet::letters_only(ColumnScope::FirstN(DEFAULT_SCAN_WIDTH)), started)
            .and_then(|(out, stats)| Ok((StoredOutput::new(self.store.put(&out)?), stats)));
        match &result {
            Ok((_, stats)) => self.report_success(&ctx, stats.total_rows, started),
            Err(e) => self.report_failure(&ctx, e),
        }
        result.map(|(stored, _)| stored)
    }

    /// Validate delimited text with the full rule set, persist the output,
    /// and return the statistics.
    pub fn validate_csv_with_stats(
        &self,
        bytes: &[u8],
    ) -> ProcessingResult<(StoredOutput, FileStatistics)> {
        let ctx = context("validate_csv_with_stats", SourceFormat::Csv);
        let started = Instant::now();
        let result = self
            .process_csv(bytes, RuleSet::full(), started)
            .and_then(|(out, stats)| Ok((StoredOutput::new(self.store.put(&out)?), stats)));
        match &result {
            Ok((_, stats)) => self.report_success(&ctx, stats.total_rows, started),
            Err(e) => self.report_failure(&ctx, e),
        }
        result
    }

    /// Validate delimited text with the letter scan over the first 19
    /// columns and return the annotated bytes inline, persisting nothing.
    pub fn validate_csv_streaming(&self, bytes: &[u8]) -> ProcessingResult<Vec<u8>> {
        let ctx = context("validate_csv_streaming", SourceFormat::Csv);
        let started = Instant::now();
        let result =
            self.process_csv(bytes, RuleSet::letters_only(ColumnScope::FirstN(DEFAULT_SCAN_WIDTH)), started);
        match &result {
            Ok((_, stats)) => self.report_success(&ctx, stats.total_rows, started),
            Err(e) => self.report_failure(&ctx, e),
        }
        result.map(|(out, _)| out)
    }

    /// Validate a spreadsheet with the full rule set; the workbook bytes are
    /// returned inline and the statistics travel on the side channel.
    pub fn validate_excel_with_stats(
        &self,
        bytes: &[u8],
    ) -> ProcessingResult<(Vec<u8>, FileStatistics)> {
        let ctx = context("validate_excel_with_stats", SourceFormat::Excel);
        let started = Instant::now();
        let result = self.process_excel(bytes, RuleSet::full(), started);
        match &result {
            Ok((_, stats)) => self.report_success(&ctx, stats.total_rows, started),
            Err(e) => self.report_failure(&ctx, e),
        }
        result
    }

    /// Validate a spreadsheet with the letter scan over every column and
    /// return the workbook bytes inline.
    pub fn validate_excel(&self, bytes: &[u8]) -> ProcessingResult<Vec<u8>> {
        let ctx = context("validate_excel", SourceFormat::Excel);
        let started = Instant::now();
        let result = self.process_excel(bytes, RuleSet::letters_only(ColumnScope::All), started);
        match &result {
            Ok((_, stats)) => self.report_success(&ctx, stats.total_rows, started),
            Err(e) => self.report_failure(&ctx, e),
        }
        result.map(|(out, _)| out)
    }

    /// Positional cell-by-cell spreadsheet pass, capped at
    /// [`DEFAULT_ROW_CAP`] data rows.
    pub fn validate_excel_cells(&self, bytes: &[u8]) -> ProcessingResult<Vec<u8>> {
        let ctx = context("validate_excel_cells", SourceFormat::Excel);
        let started = Instant::now();
        let result = scan_worksheet_cells(bytes, DEFAULT_ROW_CAP);
        match &result {
            Ok(outcome) => self.report_success(&ctx, outcome.annotated_rows, started),
            Err(e) => self.report_failure(&ctx, e),
        }
        result.map(|outcome| outcome.bytes)
    }

    /// Retrieve a persisted output by identifier.
    pub fn fetch_output(&self, id: &str) -> ProcessingResult<Vec<u8>> {
        self.store.get(id)
    }

    fn process_csv(
        &self,
        bytes: &[u8],
        rules: RuleSet,
        started: Instant,
    ) -> ProcessingResult<(Vec<u8>, FileStatistics)> {
        let mut table = read_csv_table(bytes)?;
        let mut stats = Validator::new(rules).annotate(&mut table)?;
        let out = write_csv(&table)?;
        stats.processing_time_seconds = round_seconds(started.elapsed().as_secs_f64());
        Ok((out, stats))
    }

    fn process_excel(
        &self,
        bytes: &[u8],
        rules: RuleSet,
        started: Instant,
    ) -> ProcessingResult<(Vec<u8>, FileStatistics)> {
        let mut table = read_excel_table(bytes)?;
        let mut stats = Validator::new(rules).annotate(&mut table)?;
        let out = write_excel(&table)?;
        stats.processing_time_seconds = round_seconds(started.elapsed().as_secs_f64());
        Ok((out, stats))
    }

    fn report_success(&self, ctx: &ProcessingContext, rows: usize, started: Instant) {
        if let Some(obs) = self.observer.as_ref() {
            obs.on_success(
                ctx,
                ProcessingOutcome {
                    rows,
                    duration_seconds: started.elapsed().as_secs_f64(),
                },
            );
        }
    }

    fn report_failure(&self, ctx: &ProcessingContext, error: &ProcessingError) {
        if let Some(obs) = self.observer.as_ref() {
            obs.on_failure(ctx, severity_for_error(error), error);
        }
    }
}

fn context(operation: &'static str, format: SourceFormat) -> ProcessingContext {
    ProcessingContext { operation, format }
}
