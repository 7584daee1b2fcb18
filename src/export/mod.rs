//! Workbook export for the consolidated table.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use tracing::info;

use crate::aggregate::Table;
use crate::error::ScrapeResult;

const SHEET_NAME: &str = "Marks Data";

/// Output filename for a batch, keyed by branch code, year and the
/// enumeration bound.
pub fn workbook_filename(branch_code: &str, year: &str, last_number: u32) -> String {
    format!("student_results_{branch_code}_{year}_{last_number}.xlsx")
}

/// Write the table to an `.xlsx` workbook at `path`.
pub fn write_workbook(table: &Table, path: &Path) -> ScrapeResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let bold = Format::new().set_bold();
    for (col, title) in table.header.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, title, &bold)?;
    }
    for (row_index, row) in table.rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            worksheet.write_string(row_index as u32 + 1, col as u16, cell)?;
        }
    }

    workbook.save(path)?;
    info!(path = %path.display(), rows = table.rows.len(), "workbook written");
    Ok(())
}
