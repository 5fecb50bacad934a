#![forbid(unsafe_code)]

//! Core domain model and sheet-generation engine for the Headache Diary.
//!
//! This crate provides:
//! - Domain types (medications, day descriptors, document model)
//! - Medication catalog management
//! - Date sequence generation and medication annotation
//! - Sheet model assembly and thin renderers (text, CSV)
//! - Configuration, logging and sheet export

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod dates;
pub mod annotator;
pub mod sheet;
pub mod layout;
pub mod render;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, default_catalog};
pub use config::Config;
pub use dates::{generate, parse_start_date};
pub use annotator::{resolve, Resolution};
pub use sheet::SheetBuilder;
pub use export::write_sheet;
