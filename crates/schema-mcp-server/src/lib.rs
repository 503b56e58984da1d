#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod errors;
pub mod prompts;
pub mod schema_source;
pub mod server;
pub mod server_info;
pub mod tools;
