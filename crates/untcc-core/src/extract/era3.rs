//! Era-3 scanner: mission-indexed layout with indented countries.
//!
//! Missions appear as standalone uppercase headings; countries as
//! indented capitalized lines beneath them. Some pages also print the
//! country inline on the data line itself, so the data-line prefix takes
//! precedence over the carried country.

use crate::models::record::{ContributionRecord, PersonnelType};

use super::patterns::{
    ERA3_BOILERPLATE, ERA3_COUNTRY, ERA3_MISSION, INTEGER, is_boilerplate, match_personnel,
    trailing_triplet,
};

/// Ordered personnel guards for this era; first match wins.
const PERSONNEL_GUARDS: &[(&str, PersonnelType)] = &[
    ("Individual Police", PersonnelType::IndividualPolice),
    ("Experts on Mission", PersonnelType::ExpertsOnMission),
    ("Staff Officer", PersonnelType::StaffOfficer),
    ("Troops", PersonnelType::Troops),
    ("Formed Police Units", PersonnelType::FormedPoliceUnits),
];

pub(crate) fn parse(lines: &[String], year: i32, month: u32) -> Vec<ContributionRecord> {
    let mut records = Vec::new();
    let mut current_mission: Option<String> = None;
    let mut current_country: Option<String> = None;

    for raw in lines {
        if raw.trim().is_empty() || is_boilerplate(raw, ERA3_BOILERPLATE) {
            continue;
        }

        let line = raw.trim_end();

        if ERA3_MISSION.is_match(line) {
            current_mission = Some(line.to_string());
            current_country = None;
            continue;
        }

        if ERA3_COUNTRY.is_match(line) && !line.contains("Total") {
            current_country = Some(line.trim().to_string());
            continue;
        }

        let Some(mission) = &current_mission else {
            continue;
        };

        let Some((personnel_type, phrase_at)) = match_personnel(line, PERSONNEL_GUARDS) else {
            continue;
        };
        if !INTEGER.is_match(line) {
            continue;
        }

        // Prefer a country printed on the data line itself over the
        // carried one.
        let inline = line[..phrase_at].trim();
        let country = if inline.is_empty() {
            current_country.clone().unwrap_or_default()
        } else {
            inline.to_string()
        };
        if country.is_empty() || country.contains("Total") {
            continue;
        }

        if let Some((male, female, total)) = trailing_triplet(line) {
            records.push(ContributionRecord {
                year,
                month,
                mission: mission.clone(),
                country,
                personnel_type,
                male,
                female,
                total,
            });
        }
    }

    records
}
