//! Folds per-student scrape results into the consolidated grade table.

pub mod table;

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::fetch::{GpaSummary, StudentPage};

pub use table::Table;

/// One student's aggregated results, built from their scraped page.
#[derive(Debug, Clone)]
pub struct StudentResult {
    pub student_id: String,
    pub display_name: String,
    pub grades: HashMap<String, String>,
    pub gpa: Option<GpaSummary>,
}

/// Accumulates the whole batch: per-student results in the order they were
/// recorded, plus the running set of distinct subject names. The subject set
/// only ever grows while recording and is frozen when the table is built.
#[derive(Debug, Default)]
pub struct Aggregator {
    subjects: BTreeSet<String>,
    students: Vec<StudentResult>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one student's page. A page with no marks still yields a
    /// StudentResult, so the student keeps their (blank) row in the table.
    pub fn record(&mut self, student_id: impl Into<String>, page: StudentPage) {
        let student_id = student_id.into();
        let mut grades = HashMap::with_capacity(page.marks.len());
        for mark in page.marks {
            self.subjects.insert(mark.subject.clone());
            grades.insert(mark.subject, mark.grade);
        }
        debug!(
            student = %student_id,
            subjects = grades.len(),
            gpa = page.gpa.is_some(),
            "recorded"
        );
        self.students.push(StudentResult {
            student_id,
            display_name: page.display_name,
            grades,
            gpa: page.gpa,
        });
    }

    /// Number of students recorded so far.
    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// The subject universe observed so far, lexicographically sorted.
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.subjects.iter().map(String::as_str)
    }

    pub(crate) fn into_parts(self) -> (BTreeSet<String>, Vec<StudentResult>) {
        (self.subjects, self.students)
    }
}
