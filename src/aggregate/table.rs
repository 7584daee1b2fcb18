//! Materializes the aggregated batch as one dense table.

use super::Aggregator;

pub const ID_HEADER: &str = "Student ID";
pub const NAME_HEADER: &str = "Student Name";
pub const SGPA_HEADER: &str = "SGPA";
pub const CGPA_HEADER: &str = "CGPA";

/// Header plus one row per recorded student, ready for export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Freeze the aggregator's subject universe and lay out the table:
    /// `Student ID, Student Name, <sorted subjects...>, SGPA, CGPA`.
    ///
    /// Row order is the order students were recorded. A student with no
    /// grade for a subject gets a blank cell there; a student without a GPA
    /// summary gets blank SGPA/CGPA cells.
    pub fn build(aggregator: Aggregator) -> Self {
        let (subjects, students) = aggregator.into_parts();
        let subjects: Vec<String> = subjects.into_iter().collect();

        let mut header = Vec::with_capacity(subjects.len() + 4);
        header.push(ID_HEADER.to_string());
        header.push(NAME_HEADER.to_string());
        header.extend(subjects.iter().cloned());
        header.push(SGPA_HEADER.to_string());
        header.push(CGPA_HEADER.to_string());

        let rows = students
            .into_iter()
            .map(|student| {
                let mut row = Vec::with_capacity(subjects.len() + 4);
                row.push(student.student_id);
                row.push(student.display_name);
                for subject in &subjects {
                    row.push(student.grades.get(subject).cloned().unwrap_or_default());
                }
                let gpa = student.gpa.as_ref();
                row.push(gpa.and_then(|g| g.sgpa.clone()).unwrap_or_default());
                row.push(gpa.and_then(|g| g.cgpa.clone()).unwrap_or_default());
                row
            })
            .collect();

        Table { header, rows }
    }
}
