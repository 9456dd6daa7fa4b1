//! Era-2 scanner: numbered-country list layout.
//!
//! Countries arrive as numbered list entries; missions are carried as
//! running state from whichever line last mentioned a mission code. Data
//! lines without a mission in scope record the sentinel "Various".

use crate::models::record::{ContributionRecord, PersonnelType};

use super::patterns::{
    ERA2_BOILERPLATE, ERA2_COUNTRY, INTEGER, MISSION_CODE, is_boilerplate, match_personnel,
    trailing_triplet,
};

/// Sentinel mission for data lines with no mission in scope.
const VARIOUS: &str = "Various";

/// Data lines must carry one of these literal phrases.
const PERSONNEL_GUARDS: &[(&str, PersonnelType)] = &[
    ("Individual Police", PersonnelType::IndividualPolice),
    ("Contingent Troops", PersonnelType::ContingentTroops),
    ("Experts on Mission", PersonnelType::ExpertsOnMission),
];

pub(crate) fn parse(lines: &[String], year: i32, month: u32) -> Vec<ContributionRecord> {
    let mut records = Vec::new();
    let mut current_country: Option<String> = None;
    let mut current_mission: Option<String> = None;

    for raw in lines {
        if raw.trim().is_empty() || is_boilerplate(raw, ERA2_BOILERPLATE) {
            continue;
        }

        let line = raw.trim_end();

        if let Some(caps) = ERA2_COUNTRY.captures(line) {
            // List numbering is discarded.
            current_country = Some(caps[2].trim().to_string());
            continue;
        }

        // A mission code anywhere on the line updates the running mission,
        // including on data lines that also carry counts.
        if let Some(code) = MISSION_CODE.find(line) {
            current_mission = Some(code.as_str().to_string());
        }

        let Some(country) = &current_country else {
            continue;
        };

        let Some((personnel_type, _)) = match_personnel(line, PERSONNEL_GUARDS) else {
            continue;
        };
        if !INTEGER.is_match(line) {
            continue;
        }

        if let Some((male, female, total)) = trailing_triplet(line) {
            records.push(ContributionRecord {
                year,
                month,
                mission: current_mission.clone().unwrap_or_else(|| VARIOUS.to_string()),
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
