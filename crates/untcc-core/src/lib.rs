//! Core library for parsing UN country-contribution reports.
//!
//! This crate provides:
//! - Text extraction from source PDFs via an external converter (Poppler)
//! - Layout classification across the three historical report layouts
//! - Format-specific record extractors (one per layout era)
//! - Validation/cleaning of extracted contribution records
//!
//! The monthly reports were published with three distinct column
//! arrangements over the years; each gets its own line-scanner in
//! [`extract`], selected by [`extract::identify_pdf_format`]. The separate
//! [`layout`] classifier is a diagnostic survey tool with its own
//! heuristics; the two are intentionally not unified.

pub mod error;
pub mod extract;
pub mod layout;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod validate;

pub use error::{ExtractionError, FilenameError, FormatError, Result, UntccError};
pub use extract::{PdfFormat, identify_pdf_format, parse_lines, parse_report_filename};
pub use layout::{Layout, LayoutClassification, PositionedToken, classify_layout};
pub use models::config::UntccConfig;
pub use models::record::{ContributionRecord, PersonnelType};
pub use pdf::{PopplerExtractor, TextExtractor};
pub use pipeline::{BatchSummary, DocumentOutcome, process_document};
pub use validate::clean_records;
