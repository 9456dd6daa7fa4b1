//! Text extraction from source documents.
//!
//! Conversion itself is delegated to an external tool; this module only
//! wraps the invocation. [`TextExtractor`] is the seam: the pipeline and
//! the classification survey both consume ordered line sequences and never
//! touch the converter directly, so tests substitute in-memory fixtures.

mod poppler;

pub use poppler::PopplerExtractor;

use std::path::Path;

use crate::error::ExtractionError;

/// Backend that converts a source document into an ordered sequence of
/// text lines with column alignment preserved.
///
/// Implementations must not panic on converter failure; every failure mode
/// is a typed [`ExtractionError`], recovered by the orchestrator as zero
/// records for the document.
pub trait TextExtractor: Send + Sync {
    /// Convert the document at `path` to text lines.
    fn extract_lines(&self, path: &Path) -> Result<Vec<String>, ExtractionError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
