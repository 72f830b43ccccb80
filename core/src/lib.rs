//! Core of the lead review tool: a record store, a linear stage workflow,
//! filtered and sorted views, and flat-file exports.

pub mod annotate;
pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod record;
pub mod session;
pub mod source;
pub mod stats;
pub mod store;
pub mod view;
pub mod workflow;
