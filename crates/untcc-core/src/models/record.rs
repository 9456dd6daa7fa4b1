//! Contribution record model.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// One row of a parsed contribution table: personnel counts for a
/// (mission, country, personnel type) combination in a given report month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRecord {
    /// Report year, from the source filename.
    pub year: i32,

    /// Report month (1-12), from the source filename.
    pub month: u32,

    /// Mission code (e.g. "UNMISS"), or the sentinel "Various" when the
    /// source table did not attribute the row to a single mission.
    pub mission: String,

    /// Contributing country name as printed in the report.
    pub country: String,

    /// Category of deployed personnel.
    pub personnel_type: PersonnelType,

    /// Male personnel count.
    pub male: u32,

    /// Female personnel count.
    pub female: u32,

    /// Total personnel count as printed in the source. May differ from
    /// `male + female` by at most 1 (rounding/typos in the source); larger
    /// discrepancies are dropped by the validator.
    pub total: u32,
}

impl ContributionRecord {
    /// Absolute difference between the printed total and `male + female`.
    pub fn total_discrepancy(&self) -> u64 {
        let sum = u64::from(self.male) + u64::from(self.female);
        u64::from(self.total).abs_diff(sum)
    }

    /// Ordering used for the final output sort: (year, month, mission,
    /// country). The only cross-document ordering contract.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month, &self.mission, &self.country).cmp(&(
            other.year,
            other.month,
            &other.mission,
            &other.country,
        ))
    }
}

/// Category of deployed uniformed personnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonnelType {
    /// Individual police officers.
    IndividualPolice,
    /// Military experts on mission (observers, advisers).
    ExpertsOnMission,
    /// Contingent troops.
    ContingentTroops,
    /// Staff officers.
    StaffOfficer,
    /// Troops (later-era reports drop the "Contingent" qualifier).
    Troops,
    /// Formed police units.
    FormedPoliceUnits,
    /// Anything the guard list does not recognize.
    Other,
}

impl PersonnelType {
    /// Label used in the output CSV.
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonnelType::IndividualPolice => "Individual Police",
            PersonnelType::ExpertsOnMission => "Experts on Mission",
            PersonnelType::ContingentTroops => "Contingent Troops",
            PersonnelType::StaffOfficer => "Staff Officer",
            PersonnelType::Troops => "Troops",
            PersonnelType::FormedPoliceUnits => "Formed Police Units",
            PersonnelType::Other => "Other",
        }
    }

}

impl std::fmt::Display for PersonnelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_discrepancy() {
        let rec = ContributionRecord {
            year: 2020,
            month: 1,
            mission: "UNMISS".into(),
            country: "Rwanda".into(),
            personnel_type: PersonnelType::ContingentTroops,
            male: 100,
            female: 4,
            total: 105,
        };
        assert_eq!(rec.total_discrepancy(), 1);
    }

    #[test]
    fn test_sort_cmp() {
        let a = ContributionRecord {
            year: 2019,
            month: 3,
            mission: "UNMISS".into(),
            country: "Bangladesh".into(),
            personnel_type: PersonnelType::Troops,
            male: 10,
            female: 2,
            total: 12,
        };
        let mut b = a.clone();
        b.country = "Ghana".into();
        assert_eq!(a.sort_cmp(&b), Ordering::Less);

        let mut c = a.clone();
        c.month = 2;
        assert_eq!(a.sort_cmp(&c), Ordering::Greater);
    }
}
