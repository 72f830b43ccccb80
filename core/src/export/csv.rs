use crate::error::LeadError;
use crate::record::Record;

use super::columns;
use super::{ExportFormat, RecordExporter};

/// Header row plus one row per record, one physical line each.
pub struct CsvExporter;

impl RecordExporter for CsvExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn export(&self, records: &[&Record]) -> Result<Vec<u8>, LeadError> {
        let (header, field_keys) = columns::header(records);

        let mut writer = ::csv::WriterBuilder::new()
            .terminator(::csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer
            .write_record(header.iter().map(|h| single_line(h)))
            .map_err(csv_error)?;
        for record in records {
            let cells = columns::row(record, &field_keys);
            writer
                .write_record(cells.iter().map(|c| single_line(c)))
                .map_err(csv_error)?;
        }

        writer
            .into_inner()
            .map_err(|e| LeadError::Export(format!("csv flush: {}", e.error())))
    }
}

fn csv_error(e: ::csv::Error) -> LeadError {
    LeadError::Export(format!("csv write: {e}"))
}

fn single_line(cell: &str) -> String {
    cell.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordDraft;
    use crate::workflow::WorkflowVariant;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<Record> {
        serde_json::from_value::<Vec<RecordDraft>>(value)
            .unwrap()
            .into_iter()
            .map(|d| d.into_record(WorkflowVariant::Four).unwrap())
            .collect()
    }

    #[test]
    fn test_n_records_give_n_plus_one_lines() {
        let recs = records(json!([
            {"articleID": "a", "date": "2025-01-01", "excerpt": "line one\nline two"},
            {"articleID": "b", "date": "2025-01-02", "title": "Comma, inside \"quotes\""},
            {"articleID": "c", "date": "2025-01-03", "notes": "x\r\ny"}
        ]));
        let refs: Vec<&Record> = recs.iter().collect();
        let out = String::from_utf8(CsvExporter.export(&refs).unwrap()).unwrap();

        assert_eq!(out.lines().count(), 4);
        assert!(out.starts_with("articleID,title,company,excerpt,url,location,confidence,date,stage,notes\n"));
        assert!(out.contains("line one line two"));
        assert!(out.contains("\"Comma, inside \"\"quotes\"\"\""));
    }

    #[test]
    fn test_header_stays_on_one_line() {
        let mut recs = records(json!([
            {"articleID": "a", "date": "2025-01-01"},
            {"articleID": "b", "date": "2025-01-02"}
        ]));
        recs[0].fields.insert("note\nx".into(), json!("v"));
        recs[1].fields.insert("crlf\r\nkey".into(), json!("w"));
        let refs: Vec<&Record> = recs.iter().collect();
        let out = String::from_utf8(CsvExporter.export(&refs).unwrap()).unwrap();

        assert_eq!(out.lines().count(), 3);
        let header = out.lines().next().unwrap();
        assert!(header.ends_with(",crlf key,note x"), "{header}");
    }

    #[test]
    fn test_empty_export_is_header_only() {
        let out = String::from_utf8(CsvExporter.export(&[]).unwrap()).unwrap();
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_field_columns_parse_back() {
        let recs = records(json!([
            {"articleID": "a", "date": "2025-01-01", "contact": "jane@acme.example"},
            {"articleID": "b", "date": "2025-01-02", "budget": 2500}
        ]));
        let refs: Vec<&Record> = recs.iter().collect();
        let bytes = CsvExporter.export(&refs).unwrap();

        let mut reader = ::csv::Reader::from_reader(bytes.as_slice());
        let headers = reader.headers().unwrap().clone();
        let budget = headers.iter().position(|h| h == "budget").unwrap();
        let contact = headers.iter().position(|h| h == "contact").unwrap();
        let rows: Vec<::csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(&rows[0][contact], "jane@acme.example");
        assert_eq!(&rows[0][budget], "");
        assert_eq!(&rows[1][budget], "2500");
    }
}
