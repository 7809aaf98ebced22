//! Data models and configuration.

pub mod config;
pub mod fields;

pub use config::IdVerifyConfig;
pub use fields::{EnteredFields, ExtractedFields, FieldName, FieldVerdicts};
