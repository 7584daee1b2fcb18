//! Roster upload handling: pulls register numbers out of a spreadsheet
//! instead of enumerating them.

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::error::{ScrapeError, ScrapeResult};

/// The roster column consumed verbatim, wherever it sits in the header row.
pub const ID_COLUMN: &str = "Student ID";

static ID_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}B91A\w{2,}$").expect("regex should parse"));

/// Read the register numbers from the first worksheet of `path`.
///
/// Blank cells are skipped. Values that do not look like register numbers
/// are kept but warned about.
pub fn read_student_ids(path: &Path) -> ScrapeResult<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| ScrapeError::Roster(format!("failed to open {}: {e}", path.display())))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ScrapeError::Roster("workbook has no sheets".into()))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| ScrapeError::Roster(format!("failed to read sheet `{sheet}`: {e}")))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| ScrapeError::Roster(format!("sheet `{sheet}` is empty")))?;
    let id_col = header
        .iter()
        .position(|cell| cell_to_string(cell) == ID_COLUMN)
        .ok_or_else(|| {
            ScrapeError::Roster(format!("sheet `{sheet}` has no `{ID_COLUMN}` column"))
        })?;

    let mut ids = Vec::new();
    for row in rows {
        let Some(cell) = row.get(id_col) else {
            continue;
        };
        let id = cell_to_string(cell);
        if id.is_empty() {
            continue;
        }
        if !ID_SHAPE.is_match(&id) {
            warn!(student = %id, "register number has an unexpected shape");
        }
        ids.push(id);
    }
    Ok(ids)
}

/// Spreadsheet cells sometimes come back numeric; integral floats are
/// rendered without the trailing `.0`.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Int(i) => i.to_string(),
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}
