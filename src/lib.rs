//! Scrapes per-student results from the university results portal and
//! consolidates them into one workbook: subjects as columns, students as
//! rows, SGPA/CGPA at the end.

pub mod aggregate;
pub mod enumerate;
pub mod error;
pub mod export;
pub mod fetch;
pub mod report;
pub mod roster;
