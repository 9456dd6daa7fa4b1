//! Validation and cleaning of candidate records.
//!
//! Sequential filter stages over a batch; records are dropped, never
//! repaired. The only mutation is country whitespace normalization.
//! Running the cleaner over already-cleaned output drops nothing.

use tracing::{debug, info};

use crate::models::record::ContributionRecord;

/// A country containing any of these tokens is table furniture that leaked
/// through a scanner, not a country.
const COUNTRY_BOILERPLATE: &[&str] = &[
    "Page",
    "Report",
    "Total",
    "Mission",
    "Country",
    "Personnel",
];

/// Largest tolerated |total - (male + female)|; the source documents carry
/// occasional off-by-one rounding and typos.
const TOTAL_TOLERANCE: u64 = 1;

/// Run all cleaning stages over a candidate batch.
pub fn clean_records(records: Vec<ContributionRecord>) -> Vec<ContributionRecord> {
    let initial = records.len();

    // Numeric personnel-type text is already coerced to Other at
    // classification time; cleaning starts with the country checks.
    let mut records = records;

    // Normalized up front so every predicate sees canonical names and a
    // second pass over cleaned output drops nothing.
    for record in &mut records {
        record.country = normalize_whitespace(&record.country);
    }

    let dropped_numeric = drop_where(&mut records, |r| is_numeric(&r.country));
    let dropped_arithmetic =
        drop_where(&mut records, |r| r.total_discrepancy() > TOTAL_TOLERANCE);
    let dropped_short = drop_where(&mut records, |r| r.country.chars().count() < 3);
    let dropped_boilerplate = drop_where(&mut records, |r| {
        COUNTRY_BOILERPLATE.iter().any(|t| r.country.contains(t))
    });

    debug!(
        dropped_numeric,
        dropped_arithmetic, dropped_short, dropped_boilerplate, "cleaning stages"
    );
    info!(
        "cleaned batch: {} of {} records retained",
        records.len(),
        initial
    );

    records
}

fn drop_where<F>(records: &mut Vec<ContributionRecord>, predicate: F) -> usize
where
    F: Fn(&ContributionRecord) -> bool,
{
    let before = records.len();
    records.retain(|r| !predicate(r));
    before - records.len()
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::PersonnelType;
    use pretty_assertions::assert_eq;

    fn record(country: &str, male: u32, female: u32, total: u32) -> ContributionRecord {
        ContributionRecord {
            year: 2019,
            month: 6,
            mission: "UNMISS".into(),
            country: country.into(),
            personnel_type: PersonnelType::Troops,
            male,
            female,
            total,
        }
    }

    #[test]
    fn test_arithmetic_tolerance() {
        let batch = vec![
            record("Bangladesh", 10, 5, 15),
            record("Ghana", 10, 5, 16), // off by one: kept
            record("Nepal", 10, 5, 20), // off by five: dropped
        ];
        let cleaned = clean_records(batch);
        assert_eq!(cleaned.len(), 2);
        assert!(cleaned.iter().all(|r| r.total_discrepancy() <= 1));
    }

    #[test]
    fn test_numeric_country_dropped() {
        let cleaned = clean_records(vec![record("12345", 1, 1, 2), record("Ghana", 1, 1, 2)]);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].country, "Ghana");
    }

    #[test]
    fn test_country_whitespace_normalized() {
        let cleaned = clean_records(vec![record("  South   Africa ", 1, 1, 2)]);
        assert_eq!(cleaned[0].country, "South Africa");
    }

    #[test]
    fn test_short_country_dropped() {
        let cleaned = clean_records(vec![record("Gh", 1, 1, 2)]);
        assert!(cleaned.is_empty());
    }

    #[test]
    fn test_boilerplate_country_dropped() {
        let batch = vec![
            record("Grand Total", 100, 50, 150),
            record("Page 3 of 10", 3, 10, 13),
            record("Rwanda", 1, 1, 2),
        ];
        let cleaned = clean_records(batch);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].country, "Rwanda");
    }

    #[test]
    fn test_surviving_records_satisfy_invariants() {
        let batch = vec![
            record("Bangladesh", 12, 45, 57),
            record("Ghana", 0, 0, 0),
            record("Nepal", 7, 1, 9),
        ];
        for rec in clean_records(batch) {
            assert!(rec.total_discrepancy() <= 1);
            assert!(rec.country.chars().count() >= 3);
        }
    }

    #[test]
    fn test_idempotent() {
        let batch = vec![
            record("Bangladesh", 10, 5, 15),
            record("  South   Africa ", 3, 2, 5),
            record("Total", 99, 99, 198),
            record("123", 1, 1, 2),
            record(" 123 ", 1, 1, 2),
        ];
        let once = clean_records(batch);
        let twice = clean_records(once.clone());
        assert_eq!(once, twice);
    }
}
