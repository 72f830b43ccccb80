//! Plain-text rendering of records for the terminal.
use prospector_core::api::{format_date, Record};

const TITLE_WIDTH: usize = 48;
const COMPANY_WIDTH: usize = 24;

fn truncate(s: &str, width: usize) -> String {
    let s = s.trim();
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - len))
    }
}

pub fn records_table(records: &[&Record]) -> String {
    let id_width = records
        .iter()
        .map(|r| r.id.chars().count())
        .chain(std::iter::once(2))
        .max()
        .unwrap_or(2);

    let mut out = String::new();
    out.push_str(&format!(
        "{}  {}  {}  {}  {}  TITLE\n",
        pad("ID", id_width),
        pad("STAGE", 11),
        pad("CONF", 5),
        pad("DATE", 10),
        pad("COMPANY", COMPANY_WIDTH),
    ));

    for r in records {
        out.push_str(&format!(
            "{}  {}  {}  {}  {}  {}\n",
            pad(&r.id, id_width),
            pad(r.stage.as_str(), 11),
            pad(&format!("{:.0}", r.confidence), 5),
            r.date.format("%Y-%m-%d"),
            pad(&truncate(&r.company, COMPANY_WIDTH), COMPANY_WIDTH),
            truncate(&r.title, TITLE_WIDTH),
        ));
    }

    out.push_str(&format!("{} record(s)\n", records.len()));
    out
}

pub fn record_detail(record: &Record) -> String {
    let mut out = String::new();
    out.push_str(&format!("id:         {}\n", record.id));
    out.push_str(&format!("title:      {}\n", record.title));
    out.push_str(&format!("company:    {}\n", record.company));
    out.push_str(&format!("stage:      {}\n", record.stage));
    out.push_str(&format!("confidence: {}\n", record.confidence));
    out.push_str(&format!("date:       {}\n", format_date(&record.date)));
    if let Some(url) = &record.url {
        out.push_str(&format!("url:        {url}\n"));
    }
    if let Some(location) = &record.location {
        out.push_str(&format!("location:   {location}\n"));
    }
    if !record.content.is_empty() {
        out.push_str(&format!("excerpt:    {}\n", record.content));
    }
    if !record.fields.is_empty() {
        out.push_str("fields:\n");
        for (key, value) in &record.fields {
            let shown = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            out.push_str(&format!("  {key}: {shown}\n"));
        }
    }
    out
}
