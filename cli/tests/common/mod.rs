#![allow(dead_code)]

use clap::Parser;
use std::path::{Path, PathBuf};

use prospector_cli::app::{self, AppContext};
use prospector_cli::commands::{self, cli::Args};
use prospector_core::api::AppConfig;

pub const BATCH: &str = r#"[
  {"articleID": "n-1", "title": "Acme opens hub", "company": "Acme", "confidence": 70, "date": "2025-05-12T08:00:00"},
  {"articleID": "n-2", "title": "Globex adds line", "company": "Globex", "confidence": 90, "date": "2025-05-14"},
  {"articleID": "n-3", "title": "Acme Corp plant", "company": "Acme Corp", "confidence": 30, "date": "2025-05-10"}
]"#;

pub struct Workspace {
    pub dir: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn config(&self) -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.data.directory = self.path("data").to_string_lossy().to_string();
        cfg
    }

    pub fn working_set(&self) -> PathBuf {
        self.config().data.working_set_path()
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Runs one command line and returns the exit code it would produce.
    pub fn run(&self, argv: &[&str]) -> i32 {
        let args = Args::try_parse_from(std::iter::once("prospector").chain(argv.iter().copied()))
            .unwrap();
        let ctx = AppContext::new(self.config(), &args);
        match commands::dispatch(args.command, &ctx) {
            Ok(code) => code,
            Err(e) => app::exit_code_for_error(&e),
        }
    }

    pub fn saved(&self) -> serde_json::Value {
        read_json(&self.working_set())
    }
}

pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
