//! Era-1 scanner: country-indexed layout.
//!
//! Countries appear as un-indented headings; each data line under a
//! heading carries the mission code inline.

use crate::models::record::{ContributionRecord, PersonnelType};

use super::patterns::{
    ERA1_BOILERPLATE, ERA1_COUNTRY, INTEGER, MISSION_CODE, is_boilerplate, match_personnel,
    trailing_triplet,
};

/// Ordered personnel guards for this era; first match wins. Unmatched
/// data lines classify as Other.
const PERSONNEL_GUARDS: &[(&str, PersonnelType)] = &[
    ("Individual Police", PersonnelType::IndividualPolice),
    ("Contingent Troop", PersonnelType::ContingentTroops),
    ("Experts on Mission", PersonnelType::ExpertsOnMission),
];

pub(crate) fn parse(lines: &[String], year: i32, month: u32) -> Vec<ContributionRecord> {
    let mut records = Vec::new();
    let mut current_country: Option<String> = None;

    for raw in lines {
        if raw.trim().is_empty() || is_boilerplate(raw, ERA1_BOILERPLATE) {
            continue;
        }

        let line = raw.trim_end();

        if ERA1_COUNTRY.is_match(line) {
            current_country = Some(line.to_string());
            continue;
        }

        let Some(country) = &current_country else {
            continue;
        };

        let Some(mission) = MISSION_CODE.find(line) else {
            continue;
        };
        if !INTEGER.is_match(line) {
            continue;
        }

        let personnel_type = match_personnel(line, PERSONNEL_GUARDS)
            .map(|(kind, _)| kind)
            .unwrap_or(PersonnelType::Other);

        if let Some((male, female, total)) = trailing_triplet(line) {
            records.push(ContributionRecord {
                year,
                month,
                mission: mission.as_str().to_string(),
                country: country.clone(),
                personnel_type,
                male,
                female,
                total,
            });
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_trailing_triplet_extraction() {
        let text = lines(&[
            "Bangladesh",
            "Bangladesh UNMISS Individual Police 12 45 57",
        ]);
        let records = parse(&text, 2012, 6);

        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.country, "Bangladesh");
        assert_eq!(rec.mission, "UNMISS");
        assert_eq!(rec.personnel_type, PersonnelType::IndividualPolice);
        assert_eq!((rec.male, rec.female, rec.total), (12, 45, 57));
    }

    #[test]
    fn test_data_line_without_country_is_skipped() {
        let text = lines(&["UNMISS Individual Police 12 45 57"]);
        assert!(parse(&text, 2012, 6).is_empty());
    }

    #[test]
    fn test_unknown_personnel_phrase_is_other() {
        let text = lines(&["Ghana", "MONUSCO Civilian Staff 3 1 4"]);
        let records = parse(&text, 2011, 2);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].personnel_type, PersonnelType::Other);
        assert_eq!(records[0].mission, "MONUSCO");
    }

    #[test]
    fn test_page_marker_is_inert() {
        let text = lines(&[
            "Bangladesh",
            "Page 3 of 10",
            "Bangladesh UNMISS Contingent Troop 100 4 104",
        ]);
        let records = parse(&text, 2012, 6);
        // The page marker neither produces a record nor clears the country.
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].personnel_type, PersonnelType::ContingentTroops);
    }

    #[test]
    fn test_header_line_is_skipped() {
        let text = lines(&[
            "Country    UN Mission    Description    M    F    Totals",
            "Bangladesh",
            "UNMISS Experts on Mission 5 2 7",
        ]);
        let records = parse(&text, 2010, 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].personnel_type, PersonnelType::ExpertsOnMission);
    }

    #[test]
    fn test_two_integer_line_yields_no_record() {
        let text = lines(&["Ghana", "UNMISS Individual Police 12 45"]);
        assert!(parse(&text, 2012, 6).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let text = lines(&[
            "Bangladesh",
            "UNMISS Individual Police 12 45 57",
            "Ghana",
            "MONUSCO Contingent Troop 80 4 84",
        ]);
        assert_eq!(parse(&text, 2012, 6), parse(&text, 2012, 6));
    }
}
