//! prospector-cli library: command handlers exposed for integration tests.

pub mod app;
pub mod commands;
pub mod render;
