use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::error::LeadError;
use crate::record::Record;

use super::columns::{self, CONFIDENCE_COLUMN};
use super::{ExportFormat, RecordExporter};

/// Single-sheet workbook: bold header row, one row per record.
pub struct XlsxExporter {
    sheet_name: String,
}

impl XlsxExporter {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }

    fn build(&self, records: &[&Record]) -> Result<Vec<u8>, XlsxError> {
        let (header, field_keys) = columns::header(records);
        let bold = Format::new().set_bold();

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(&self.sheet_name)?;

        for (col, title) in header.iter().enumerate() {
            sheet.write_string_with_format(0, column(col)?, title, &bold)?;
        }

        for (idx, record) in records.iter().enumerate() {
            let row = u32::try_from(idx + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
            for (col, cell) in columns::row(record, &field_keys).iter().enumerate() {
                if col == CONFIDENCE_COLUMN {
                    sheet.write_number(row, column(col)?, record.confidence)?;
                } else if !cell.is_empty() {
                    sheet.write_string(row, column(col)?, cell)?;
                }
            }
        }

        sheet.set_freeze_panes(1, 0)?;
        workbook.save_to_buffer()
    }
}

fn column(idx: usize) -> Result<u16, XlsxError> {
    u16::try_from(idx).map_err(|_| XlsxError::RowColumnLimitError)
}

impl RecordExporter for XlsxExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Xlsx
    }

    fn export(&self, records: &[&Record]) -> Result<Vec<u8>, LeadError> {
        self.build(records)
            .map_err(|e| LeadError::Export(format!("xlsx: {e}")))
    }
}
