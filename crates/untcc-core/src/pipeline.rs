//! Per-document pipeline and batch aggregation helpers.
//!
//! One document flows filename → lines → format → scanner → cleaner.
//! Batch orchestration (worker pool, progress, sinks) lives in the CLI;
//! the pieces here are the ones with semantics worth testing: failure
//! containment, the fan-in merge, and the final sort contract.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{FilenameError, Result};
use crate::extract::{identify_pdf_format, parse_lines, parse_report_filename};
use crate::models::record::ContributionRecord;
use crate::pdf::TextExtractor;
use crate::validate::clean_records;

/// Extract and clean all records from one document.
pub fn process_document(
    extractor: &dyn TextExtractor,
    path: &Path,
) -> Result<Vec<ContributionRecord>> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| FilenameError::Pattern(path.display().to_string()))?;

    let (year, month) = parse_report_filename(filename)?;
    let lines = extractor.extract_lines(path)?;
    let format = identify_pdf_format(&lines, filename)?;

    let candidates = parse_lines(format, &lines, year, month);
    debug!(
        "{}: {} candidate records ({})",
        filename,
        candidates.len(),
        format
    );

    Ok(clean_records(candidates))
}

/// Outcome of one document, with the failure captured rather than raised.
///
/// A failed document contributes zero records and an error message; it
/// never aborts the batch.
#[derive(Debug)]
pub struct DocumentOutcome {
    pub filename: String,
    pub records: Vec<ContributionRecord>,
    pub error: Option<String>,
}

impl DocumentOutcome {
    /// Run the document pipeline, converting any failure into an outcome.
    pub fn capture(extractor: &dyn TextExtractor, path: &Path) -> Self {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        match process_document(extractor, path) {
            Ok(records) => Self {
                filename,
                records,
                error: None,
            },
            Err(e) => {
                warn!("{}: {}", filename, e);
                Self {
                    filename,
                    records: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

/// Sort a merged batch by (year, month, mission, country) — the only
/// cross-document ordering contract.
pub fn sort_records(records: &mut [ContributionRecord]) {
    records.sort_by(|a, b| a.sort_cmp(b));
}

/// Aggregate figures for the end-of-run report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub files_processed: usize,
    pub files_errored: usize,
    pub records: usize,
    /// Earliest and latest (year, month) seen, when any records exist.
    pub date_range: Option<((i32, u32), (i32, u32))>,
    pub distinct_countries: usize,
    pub distinct_missions: usize,
}

impl BatchSummary {
    pub fn compute(
        records: &[ContributionRecord],
        files_processed: usize,
        files_errored: usize,
    ) -> Self {
        let dates: BTreeSet<(i32, u32)> = records.iter().map(|r| (r.year, r.month)).collect();
        let countries: BTreeSet<&str> = records.iter().map(|r| r.country.as_str()).collect();
        let missions: BTreeSet<&str> = records.iter().map(|r| r.mission.as_str()).collect();

        Self {
            files_processed,
            files_errored,
            records: records.len(),
            date_range: dates
                .first()
                .copied()
                .zip(dates.last().copied()),
            distinct_countries: countries.len(),
            distinct_missions: missions.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;
    use crate::models::record::PersonnelType;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    /// In-memory extractor: fixed era-2 text, one configurable failure.
    struct FakeExtractor {
        fail_on: Option<String>,
    }

    impl TextExtractor for FakeExtractor {
        fn extract_lines(&self, path: &Path) -> std::result::Result<Vec<String>, ExtractionError> {
            let name = path.file_name().unwrap().to_str().unwrap();
            if self.fail_on.as_deref() == Some(name) {
                return Err(ExtractionError::NoOutput(name.to_string()));
            }
            Ok(vec![
                "1    Algeria".to_string(),
                "MINUSMA".to_string(),
                "Contingent Troops   120   6   126".to_string(),
            ])
        }

        fn backend_name(&self) -> &str {
            "fake"
        }
    }

    fn report_paths(months: &[u32]) -> Vec<PathBuf> {
        months
            .iter()
            .map(|m| PathBuf::from(format!("UN_country_contributions_2019_{m:02}.pdf")))
            .collect()
    }

    #[test]
    fn test_process_document() {
        let extractor = FakeExtractor { fail_on: None };
        let records = process_document(
            &extractor,
            Path::new("UN_country_contributions_2019_04.pdf"),
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].year, 2019);
        assert_eq!(records[0].month, 4);
        assert_eq!(records[0].personnel_type, PersonnelType::ContingentTroops);
    }

    #[test]
    fn test_bad_filename_is_typed_error() {
        let extractor = FakeExtractor { fail_on: None };
        let err = process_document(&extractor, Path::new("contributions_2020.pdf")).unwrap_err();
        assert!(matches!(
            err,
            crate::error::UntccError::Filename(FilenameError::Pattern(_))
        ));
    }

    #[test]
    fn test_batch_resilience() {
        // Five documents, the third fails extraction: four contribute
        // records, the error tally is one.
        let extractor = FakeExtractor {
            fail_on: Some("UN_country_contributions_2019_03.pdf".to_string()),
        };

        let outcomes: Vec<DocumentOutcome> = report_paths(&[1, 2, 3, 4, 5])
            .iter()
            .map(|p| DocumentOutcome::capture(&extractor, p))
            .collect();

        let errored = outcomes.iter().filter(|o| o.error.is_some()).count();
        let records: Vec<ContributionRecord> =
            outcomes.into_iter().flat_map(|o| o.records).collect();

        assert_eq!(errored, 1);
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn test_sort_contract() {
        let extractor = FakeExtractor { fail_on: None };
        let mut records: Vec<ContributionRecord> = report_paths(&[5, 1, 3])
            .iter()
            .flat_map(|p| DocumentOutcome::capture(&extractor, p).records)
            .collect();

        sort_records(&mut records);

        let keys: Vec<_> = records
            .iter()
            .map(|r| (r.year, r.month, r.mission.clone(), r.country.clone()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(records[0].month, 1);
    }

    #[test]
    fn test_batch_summary() {
        let extractor = FakeExtractor { fail_on: None };
        let records: Vec<ContributionRecord> = report_paths(&[1, 2])
            .iter()
            .flat_map(|p| DocumentOutcome::capture(&extractor, p).records)
            .collect();

        let summary = BatchSummary::compute(&records, 2, 0);
        assert_eq!(summary.records, 2);
        assert_eq!(summary.distinct_countries, 1);
        assert_eq!(summary.distinct_missions, 1);
        assert_eq!(summary.date_range, Some(((2019, 1), (2019, 2))));
    }
}
