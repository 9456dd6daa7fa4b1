//! Line-classification patterns shared by the format extractors.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::record::PersonnelType;

lazy_static! {
    /// Mission-code token, e.g. UNMISS, MINUSMA, MONUSCO.
    pub static ref MISSION_CODE: Regex =
        Regex::new(r"\b(?:UN[A-Z]+|MIN[A-Z]+|MON[A-Z]+)\b").unwrap();

    /// Any integer substring.
    pub static ref INTEGER: Regex = Regex::new(r"\d+").unwrap();

    /// Era-1 country line: un-indented, alphabetic only.
    pub static ref ERA1_COUNTRY: Regex = Regex::new(r"^[A-Z][a-zA-Z]+$").unwrap();

    /// Era-2 numbered country line; the number is discarded.
    pub static ref ERA2_COUNTRY: Regex = Regex::new(r"^(\d+)\s+([A-Za-z].*)$").unwrap();

    /// Era-3 mission line: the line is nothing but a 3-8 letter code.
    pub static ref ERA3_MISSION: Regex = Regex::new(r"^[A-Z]{3,8}$").unwrap();

    /// Era-3 country line: indented capitalized name.
    pub static ref ERA3_COUNTRY: Regex = Regex::new(r"^\s+[A-Z][a-zA-Z\s]+$").unwrap();

    /// Required input filename shape.
    pub static ref REPORT_FILENAME: Regex =
        Regex::new(r"^UN_country_contributions_(\d{4})_(\d{2})\.pdf$").unwrap();

    /// First 4-digit year anywhere in a filename.
    pub static ref FILENAME_YEAR: Regex = Regex::new(r"(\d{4})").unwrap();
}

/// Boilerplate markers checked before any state rule, per era. A line
/// containing any marker is skipped without touching parser state.
pub const ERA1_BOILERPLATE: &[&str] = &[
    "Page",
    "United Nations",
    "Report",
    "Description",
    "Totals",
    "Grand Total",
];

pub const ERA2_BOILERPLATE: &[&str] = &[
    "Page",
    "United Nations",
    "Report",
    "Personnel Type",
    "Male",
    "Female",
    "Grand Total",
];

pub const ERA3_BOILERPLATE: &[&str] = &[
    "Page",
    "United Nations",
    "Report",
    "Personnel Type",
    "Grand Total",
    "Month of",
];

/// True when the line matches any marker of the era's skip list.
pub fn is_boilerplate(line: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| line.contains(m))
}

/// First matching personnel guard, with the byte offset of the phrase.
///
/// Guards are an ordered list, first match wins; each era carries its own
/// priority order because the phrases overlap across eras.
pub fn match_personnel(
    line: &str,
    guards: &[(&str, PersonnelType)],
) -> Option<(PersonnelType, usize)> {
    for (phrase, kind) in guards {
        if let Some(pos) = line.find(phrase) {
            return Some((*kind, pos));
        }
    }
    None
}

/// The trailing three integer substrings of a data line, in order, as
/// (male, female, total).
///
/// This positional convention is the only column signal that survives the
/// plain-text flattening; a stray numeric token at line end shifts the
/// triplet, which the validator's arithmetic check then catches.
pub fn trailing_triplet(line: &str) -> Option<(u32, u32, u32)> {
    let numbers: Vec<u32> = INTEGER
        .find_iter(line)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    match numbers[..] {
        [.., male, female, total] => Some((male, female, total)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mission_code_token() {
        assert!(MISSION_CODE.is_match("Bangladesh UNMISS Individual Police 12 45 57"));
        assert!(MISSION_CODE.is_match("MINUSMA"));
        assert!(MISSION_CODE.is_match("MONUSCO"));
        // Needs at least one uppercase letter after the prefix.
        assert!(!MISSION_CODE.is_match("UN Mission"));
        assert!(!MISSION_CODE.is_match("Bangladesh"));
    }

    #[test]
    fn test_trailing_triplet() {
        assert_eq!(
            trailing_triplet("Bangladesh UNMISS Individual Police 12 45 57"),
            Some((12, 45, 57))
        );
        // Fewer than three integers: no triplet, no record.
        assert_eq!(trailing_triplet("Individual Police 12 45"), None);
        assert_eq!(trailing_triplet("no numbers at all"), None);
    }

    #[test]
    fn test_boilerplate_markers() {
        assert!(is_boilerplate("Page 3 of 10", ERA1_BOILERPLATE));
        assert!(is_boilerplate("Page 3 of 10", ERA2_BOILERPLATE));
        assert!(is_boilerplate("Page 3 of 10", ERA3_BOILERPLATE));
        assert!(!is_boilerplate("Bangladesh", ERA1_BOILERPLATE));
    }
}
