pub mod export_file;
pub mod json_file;

pub use export_file::ExportFileWriter;
pub use json_file::JsonFileSink;
