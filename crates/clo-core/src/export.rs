use crate::config::ExportConfig;
use crate::error::{CloError, Result};
use crate::generate::parts_for;
use crate::history::{GeneratedRecord, History, HISTORY_COLUMNS};
use crate::reference::ReferenceData;
use crate::rubric::{self, Rubric};
use crate::types::Style;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

const RUBRIC_COLUMNS: &[&str] = &[
    "ID",
    "Course",
    "Outcome",
    "Level",
    "CLO Statement",
    "Excellent",
    "Good",
    "Satisfactory",
    "Poor",
];

/// Rebuild the rubric for a saved row from the current reference tables.
pub fn rubric_for(reference: &ReferenceData, row: &GeneratedRecord) -> Rubric {
    let style = row.style.parse::<Style>().unwrap_or_default();
    let (parts, _) = parts_for(
        reference,
        &row.profile,
        &row.outcome_code,
        &row.level,
        &row.verb,
        &row.content,
        style,
    );
    rubric::generate(&parts)
}

fn write_sheet(
    sheet: &mut Worksheet,
    name: &str,
    headers: &[&str],
    rows: &[Vec<String>],
) -> Result<()> {
    sheet.set_name(name)?;
    let bold = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        let col = col_index(col)?;
        sheet.write_string_with_format(0, col, *header, &bold)?;
    }
    for (i, cells) in rows.iter().enumerate() {
        let row = u32::try_from(i + 1)
            .map_err(|_| CloError::invalid("history", "too many rows for a worksheet"))?;
        for (col, cell) in cells.iter().enumerate() {
            sheet.write_string(row, col_index(col)?, cell.as_str())?;
        }
    }
    Ok(())
}

fn col_index(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| CloError::invalid("export", "too many columns"))
}

/// The history table as a single-sheet workbook: header row plus one row
/// per saved CLO.
pub fn history_xlsx(history: &History, export: &ExportConfig) -> Result<Vec<u8>> {
    let rows: Vec<Vec<String>> = history.rows.iter().map(GeneratedRecord::cells).collect();
    let mut workbook = Workbook::new();
    write_sheet(
        workbook.add_worksheet(),
        &export.history_sheet,
        HISTORY_COLUMNS,
        &rows,
    )?;
    Ok(workbook.save_to_buffer()?)
}

/// One rubric row per saved CLO, regenerated from the reference tables.
pub fn rubric_xlsx(
    history: &History,
    reference: &ReferenceData,
    export: &ExportConfig,
) -> Result<Vec<u8>> {
    let rows: Vec<Vec<String>> = history
        .rows
        .iter()
        .map(|row| {
            let r = rubric_for(reference, row);
            vec![
                row.id.to_string(),
                row.course.clone(),
                row.outcome_code.clone(),
                row.level.clone(),
                row.sentence.clone(),
                r.excellent,
                r.good,
                r.satisfactory,
                r.poor,
            ]
        })
        .collect();
    let mut workbook = Workbook::new();
    write_sheet(
        workbook.add_worksheet(),
        &export.rubric_sheet,
        RUBRIC_COLUMNS,
        &rows,
    )?;
    Ok(workbook.save_to_buffer()?)
}

/// The history table as CSV with the same columns as the workbook.
pub fn history_csv(history: &History) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(HISTORY_COLUMNS)?;
    for row in &history.rows {
        wtr.write_record(row.cells())?;
    }
    wtr.into_inner().map_err(|e| CloError::Io(e.into_error()))
}

pub fn file_name(export: &ExportConfig, suffix: &str, ext: &str) -> String {
    if suffix.is_empty() {
        format!("{}.{ext}", export.file_stem)
    } else {
        format!("{}_{suffix}.{ext}", export.file_stem)
    }
}
