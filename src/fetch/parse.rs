//! HTML extraction for the results portal pages.
//!
//! Everything positional about the portal's tables stays inside this module:
//! callers get named fields, not cell arrays.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{ScrapeError, ScrapeResult};

/// Hidden anti-forgery fields the form page carries and the submission must
/// echo back.
pub const VIEWSTATE_FIELD: &str = "__VIEWSTATE";
pub const EVENTVALIDATION_FIELD: &str = "__EVENTVALIDATION";

static VIEWSTATE_SEL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"input[name="__VIEWSTATE"]"#).expect("selector should parse")
});
static EVENTVALIDATION_SEL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"input[name="__EVENTVALIDATION"]"#).expect("selector should parse")
});
static NAME_SEL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("input#ContentPlaceHolder1_txtStudentName").expect("selector should parse")
});
static MARKS_TABLE_SEL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table#ContentPlaceHolder1_dgvStudentHistory").expect("selector should parse")
});
static GPA_TABLE_SEL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table#ContentPlaceHolder1_gvSGPA_CGPA").expect("selector should parse")
});
static ROW_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("selector should parse"));
static CELL_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("selector should parse"));

/// Within a marks-table row, which cells carry the subject name and grade.
const SUBJECT_CELL: usize = 2;
const GRADE_CELL: usize = 4;

/// The opaque tokens scraped from the form page.
#[derive(Debug, Clone)]
pub struct FormTokens {
    pub view_state: String,
    pub event_validation: String,
}

/// One marks-table row, reduced to the cells we consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectGrade {
    pub subject: String,
    pub grade: String,
}

/// SGPA/CGPA scraped from the secondary table. Either value can be missing
/// when the row is shorter than the portal normally renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpaSummary {
    pub sgpa: Option<String>,
    pub cgpa: Option<String>,
}

/// Everything extracted from one student's submitted result page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StudentPage {
    pub display_name: String,
    pub marks: Vec<SubjectGrade>,
    pub gpa: Option<GpaSummary>,
}

/// Pull the anti-forgery tokens out of the form page.
pub fn extract_tokens(html: &str) -> ScrapeResult<FormTokens> {
    let document = Html::parse_document(html);
    let view_state = hidden_value(&document, &VIEWSTATE_SEL)
        .ok_or(ScrapeError::PortalFormat(VIEWSTATE_FIELD))?;
    let event_validation = hidden_value(&document, &EVENTVALIDATION_SEL)
        .ok_or(ScrapeError::PortalFormat(EVENTVALIDATION_FIELD))?;
    Ok(FormTokens {
        view_state,
        event_validation,
    })
}

fn hidden_value(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(str::to_string)
}

/// Extract the display name, marks rows and GPA summary from the page the
/// portal returns after submission. Absent elements degrade to empty/absent
/// values; this never fails.
pub fn extract_student_page(html: &str) -> StudentPage {
    let document = Html::parse_document(html);

    let display_name = document
        .select(&NAME_SEL)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(|value| value.trim().to_string())
        .unwrap_or_default();

    let marks = document
        .select(&MARKS_TABLE_SEL)
        .next()
        .map(extract_marks)
        .unwrap_or_default();

    let gpa = document.select(&GPA_TABLE_SEL).next().and_then(extract_gpa);

    StudentPage {
        display_name,
        marks,
        gpa,
    }
}

fn extract_marks(table: ElementRef) -> Vec<SubjectGrade> {
    let mut marks = Vec::new();
    // First row is the header.
    for row in table.select(&ROW_SEL).skip(1) {
        let cells: Vec<String> = row.select(&CELL_SEL).map(cell_text).collect();
        if cells.is_empty() {
            continue;
        }
        match (cells.get(SUBJECT_CELL), cells.get(GRADE_CELL)) {
            (Some(subject), Some(grade)) => marks.push(SubjectGrade {
                subject: subject.clone(),
                grade: grade.clone(),
            }),
            _ => debug!(cells = cells.len(), "marks row too short, skipping"),
        }
    }
    marks
}

fn extract_gpa(table: ElementRef) -> Option<GpaSummary> {
    let row = table.select(&ROW_SEL).nth(1)?;
    let cells: Vec<String> = row.select(&CELL_SEL).map(cell_text).collect();
    if cells.is_empty() {
        return None;
    }
    Some(GpaSummary {
        sgpa: cells.get(1).cloned(),
        cgpa: cells.get(2).cloned(),
    })
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM_PAGE: &str = r#"<html><body><form>
        <input type="hidden" name="__VIEWSTATE" value="vs-opaque-token" />
        <input type="hidden" name="__EVENTVALIDATION" value="ev-opaque-token" />
    </form></body></html>"#;

    const RESULT_PAGE: &str = r#"<html><body>
        <input id="ContentPlaceHolder1_txtStudentName" value="  DOE JOHN  " />
        <table id="ContentPlaceHolder1_dgvStudentHistory">
            <tr><th>Sno</th><th>Code</th><th>Subject</th><th>Credits</th><th>Grade</th><th>Points</th></tr>
            <tr><td>1</td><td>MA101</td><td> MATHEMATICS - I </td><td>3</td><td> A+ </td><td>10</td></tr>
            <tr><td>2</td><td>PH102</td><td>PHYSICS</td><td>3</td><td>B</td><td>8</td></tr>
            <tr><td>3</td><td>CS103</td></tr>
        </table>
        <table id="ContentPlaceHolder1_gvSGPA_CGPA">
            <tr><th>Semester</th><th>SGPA</th><th>CGPA</th></tr>
            <tr><td>I</td><td> 8.54 </td><td> 8.12 </td></tr>
        </table>
    </body></html>"#;

    #[test]
    fn tokens_come_from_the_hidden_inputs() {
        let tokens = extract_tokens(FORM_PAGE).unwrap();
        assert_eq!(tokens.view_state, "vs-opaque-token");
        assert_eq!(tokens.event_validation, "ev-opaque-token");
    }

    #[test]
    fn missing_token_field_is_a_portal_format_error() {
        let page = r#"<input type="hidden" name="__VIEWSTATE" value="x" />"#;
        match extract_tokens(page) {
            Err(ScrapeError::PortalFormat(field)) => assert_eq!(field, EVENTVALIDATION_FIELD),
            other => panic!("expected PortalFormat, got {other:?}"),
        }
    }

    #[test]
    fn result_page_yields_trimmed_named_fields() {
        let subscriber = tracing_subscriber::FmtSubscriber::builder()
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);

        let page = extract_student_page(RESULT_PAGE);
        assert_eq!(page.display_name, "DOE JOHN");

        // Header row skipped, short row skipped, cells trimmed.
        assert_eq!(
            page.marks,
            vec![
                SubjectGrade {
                    subject: "MATHEMATICS - I".into(),
                    grade: "A+".into()
                },
                SubjectGrade {
                    subject: "PHYSICS".into(),
                    grade: "B".into()
                },
            ]
        );

        let gpa = page.gpa.unwrap();
        assert_eq!(gpa.sgpa.as_deref(), Some("8.54"));
        assert_eq!(gpa.cgpa.as_deref(), Some("8.12"));
    }

    #[test]
    fn absent_elements_degrade_quietly() {
        let page = extract_student_page("<html><body><p>No results</p></body></html>");
        assert_eq!(page.display_name, "");
        assert!(page.marks.is_empty());
        assert!(page.gpa.is_none());
    }

    #[test]
    fn gpa_table_with_only_a_header_row_is_absent() {
        let html = r#"<table id="ContentPlaceHolder1_gvSGPA_CGPA">
            <tr><th>Semester</th><th>SGPA</th><th>CGPA</th></tr>
        </table>"#;
        assert!(extract_student_page(html).gpa.is_none());
    }

    #[test]
    fn short_gpa_row_leaves_the_tail_fields_absent() {
        let html = r#"<table id="ContentPlaceHolder1_gvSGPA_CGPA">
            <tr><th>Semester</th><th>SGPA</th><th>CGPA</th></tr>
            <tr><td>I</td><td>7.9</td></tr>
        </table>"#;
        let gpa = extract_student_page(html).gpa.unwrap();
        assert_eq!(gpa.sgpa.as_deref(), Some("7.9"));
        assert!(gpa.cgpa.is_none());
    }
}
