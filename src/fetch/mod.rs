pub mod parse;
pub mod portal;

pub use parse::{FormTokens, GpaSummary, StudentPage, SubjectGrade};
pub use portal::{fetch_student, result_url};
