#[allow(clippy::module_inception)]
pub mod error;
pub mod lead;

pub use error::CliError;
pub use lead::{ErrorKind, LeadError};
