//! Excel export: the three-sheet workbook.

use std::collections::BTreeSet;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use shiftforge_core::Schedule;
use thiserror::Error;

/// Excel export errors.
#[derive(Debug, Error)]
pub enum ExcelError {
    #[error("Excel error: {0}")]
    Xlsx(#[from] XlsxError),
}

/// Renders a schedule into a workbook with `Schedule`, `Statistics` and
/// `By Worker` sheets. Header rows are bold and frozen; the layout is for
/// people, the JSON document is for machines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcelExporter;

impl ExcelExporter {
    /// Creates an exporter.
    pub fn new() -> Self {
        ExcelExporter
    }

    /// Writes the workbook to `path`.
    pub fn export(&self, schedule: &Schedule, path: impl AsRef<Path>) -> Result<(), ExcelError> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        self.write_schedule_sheet(workbook.add_worksheet(), schedule, &bold)?;
        self.write_statistics_sheet(workbook.add_worksheet(), schedule, &bold)?;
        self.write_by_worker_sheet(workbook.add_worksheet(), schedule, &bold)?;

        workbook.save(path.as_ref())?;
        tracing::info!(path = %path.as_ref().display(), "workbook written");
        Ok(())
    }

    /// Period rows against worker columns; cells hold comma-joined shifts.
    fn write_schedule_sheet(
        &self,
        sheet: &mut Worksheet,
        schedule: &Schedule,
        bold: &Format,
    ) -> Result<(), ExcelError> {
        sheet.set_name("Schedule")?;
        sheet.set_freeze_panes(1, 0)?;

        let worker_ids: Vec<&String> = schedule.statistics.keys().collect();
        sheet.write_string_with_format(0, 0, "Period", bold)?;
        sheet.write_string_with_format(0, 1, "Start", bold)?;
        sheet.write_string_with_format(0, 2, "End", bold)?;
        for (i, worker_id) in worker_ids.iter().enumerate() {
            sheet.write_string_with_format(0, 3 + i as u16, worker_id.as_str(), bold)?;
        }

        for (r, period) in schedule.periods.iter().enumerate() {
            let row = 1 + r as u32;
            sheet.write_number(row, 0, period.period_index as f64)?;
            sheet.write_string(row, 1, period.period_start.to_string())?;
            sheet.write_string(row, 2, period.period_end.to_string())?;
            for (i, worker_id) in worker_ids.iter().enumerate() {
                let cell = period
                    .assignments
                    .get(*worker_id)
                    .map(|shifts| {
                        shifts
                            .iter()
                            .map(|s| s.shift_type_id.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .unwrap_or_default();
                sheet.write_string(row, 3 + i as u16, cell)?;
            }
        }
        Ok(())
    }

    /// Per-worker totals with one column per category.
    fn write_statistics_sheet(
        &self,
        sheet: &mut Worksheet,
        schedule: &Schedule,
        bold: &Format,
    ) -> Result<(), ExcelError> {
        sheet.set_name("Statistics")?;
        sheet.set_freeze_panes(1, 0)?;

        let categories: BTreeSet<&String> = schedule
            .statistics
            .values()
            .flat_map(|s| s.by_category.keys())
            .collect();

        sheet.write_string_with_format(0, 0, "Worker", bold)?;
        sheet.write_string_with_format(0, 1, "Total Shifts", bold)?;
        for (i, category) in categories.iter().enumerate() {
            sheet.write_string_with_format(0, 2 + i as u16, category.as_str(), bold)?;
        }

        for (r, (worker_id, stats)) in schedule.statistics.iter().enumerate() {
            let row = 1 + r as u32;
            sheet.write_string(row, 0, worker_id)?;
            sheet.write_number(row, 1, stats.total_shifts as f64)?;
            for (i, category) in categories.iter().enumerate() {
                let count = stats.by_category.get(*category).copied().unwrap_or(0);
                sheet.write_number(row, 2 + i as u16, count as f64)?;
            }
        }
        Ok(())
    }

    /// One row per shift instance.
    fn write_by_worker_sheet(
        &self,
        sheet: &mut Worksheet,
        schedule: &Schedule,
        bold: &Format,
    ) -> Result<(), ExcelError> {
        sheet.set_name("By Worker")?;
        sheet.set_freeze_panes(1, 0)?;

        for (col, header) in ["Worker", "Period", "Shift", "Date"].iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *header, bold)?;
        }

        let mut row = 1u32;
        for period in &schedule.periods {
            for (worker_id, shifts) in &period.assignments {
                for shift in shifts {
                    sheet.write_string(row, 0, worker_id)?;
                    sheet.write_number(row, 1, period.period_index as f64)?;
                    sheet.write_string(row, 2, &shift.shift_type_id)?;
                    sheet.write_string(row, 3, shift.date.to_string())?;
                    row += 1;
                }
            }
        }
        Ok(())
    }
}
