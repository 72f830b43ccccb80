#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const SURVEY_BATCH: &str = r#"[
  {
    "articleID": "srv-100",
    "title": "Hooli breaks ground on campus",
    "company": "Hooli",
    "excerpt": "Construction starts on a 12-acre campus.",
    "url": "https://news.example/hooli-campus",
    "confidence": 64,
    "date": "2025-07-01T09:30:00"
  },
  {
    "title": "Vandelay Industries import deal",
    "company": "Vandelay Industries",
    "excerpt": "New latex import agreement signed.",
    "url": "https://news.example/vandelay",
    "confidence": 33,
    "date": "2025-07-02"
  }
]"#;

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
