//! Batch outcome summary handed back to the caller alongside the workbook.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One student the scrape could not resolve. The rest of the batch carries
/// on without them.
#[derive(Debug, Serialize)]
pub struct FetchFailure {
    pub student_id: String,
    pub error: String,
}

/// What happened across the whole batch.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub exam_id: String,
    pub generated_at: DateTime<Utc>,
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<FetchFailure>,
}

impl BatchReport {
    pub fn new(exam_id: impl Into<String>) -> Self {
        Self {
            exam_id: exam_id.into(),
            generated_at: Utc::now(),
            attempted: 0,
            succeeded: 0,
            failures: Vec::new(),
        }
    }

    pub fn record_success(&mut self) {
        self.attempted += 1;
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, student_id: impl Into<String>, error: impl ToString) {
        self.attempted += 1;
        self.failures.push(FetchFailure {
            student_id: student_id.into(),
            error: error.to_string(),
        });
    }
}
