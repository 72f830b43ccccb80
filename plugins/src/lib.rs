pub mod factory;
pub mod sink;
pub mod source;
