//! Format-specific record extraction.
//!
//! The reports went through three column arrangements over the years; each
//! era gets its own single-pass line scanner. [`identify_pdf_format`]
//! picks the scanner for a document from content signatures, falling back
//! to the filename year.

mod era1;
mod era2;
mod era3;
pub mod patterns;

use tracing::debug;

use crate::error::{FilenameError, FormatError};
use crate::models::record::ContributionRecord;
use patterns::{ERA2_COUNTRY, ERA3_MISSION, FILENAME_YEAR, MISSION_CODE, REPORT_FILENAME};

/// How many leading lines are inspected for format signatures.
const SIGNATURE_SCAN_DEPTH: usize = 80;

/// The three historical layout eras, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfFormat {
    /// Country headings with inline mission codes on data lines.
    Era1CountryIndexed,
    /// Numbered country list, mission carried as running state.
    Era2NumberedList,
    /// Mission headings with indented country lines.
    Era3MissionIndexed,
}

impl PdfFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            PdfFormat::Era1CountryIndexed => "era1_country_indexed",
            PdfFormat::Era2NumberedList => "era2_numbered_list",
            PdfFormat::Era3MissionIndexed => "era3_mission_indexed",
        }
    }
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse (year, month) from a report filename.
///
/// Only `UN_country_contributions_<YYYY>_<MM>.pdf` is accepted; anything
/// else is a [`FilenameError`] and the file contributes zero records.
pub fn parse_report_filename(filename: &str) -> Result<(i32, u32), FilenameError> {
    let caps = REPORT_FILENAME
        .captures(filename)
        .ok_or_else(|| FilenameError::Pattern(filename.to_string()))?;

    // The regex guarantees 4 and 2 digits; the parses cannot fail.
    let year: i32 = caps[1].parse().unwrap_or_default();
    let month: u32 = caps[2].parse().unwrap_or_default();

    if !(1..=12).contains(&month) {
        return Err(FilenameError::Month {
            filename: filename.to_string(),
            month,
        });
    }

    Ok((year, month))
}

/// Decide which era scanner handles a document.
///
/// Content signatures are checked over the leading lines, newest era
/// first (era-3 mission-heading lines also satisfy era-1's country shape,
/// so the stronger signal must win). When content is inconclusive the
/// filename year decides. This heuristic is independent of the layout
/// classifier in [`crate::layout`] and the two may disagree on some
/// documents; only this one drives extraction.
pub fn identify_pdf_format(lines: &[String], filename: &str) -> Result<PdfFormat, FormatError> {
    let head = lines.iter().take(SIGNATURE_SCAN_DEPTH);

    let mut saw_mission_heading = false;
    let mut saw_era3_phrase = false;
    let mut saw_numbered_country = false;
    let mut saw_mission_code = false;
    let mut saw_country_heading = false;

    for line in head {
        let trimmed = line.trim_end();
        if ERA3_MISSION.is_match(trimmed) {
            saw_mission_heading = true;
        }
        if line.contains("Staff Officer") || line.contains("Formed Police Unit") {
            saw_era3_phrase = true;
        }
        if ERA2_COUNTRY.is_match(trimmed) {
            saw_numbered_country = true;
        }
        if MISSION_CODE.is_match(line) {
            saw_mission_code = true;
        }
        if patterns::ERA1_COUNTRY.is_match(trimmed) && !ERA3_MISSION.is_match(trimmed) {
            saw_country_heading = true;
        }
    }

    let format = if saw_mission_heading && saw_era3_phrase {
        Some(PdfFormat::Era3MissionIndexed)
    } else if saw_numbered_country {
        Some(PdfFormat::Era2NumberedList)
    } else if saw_country_heading && saw_mission_code {
        Some(PdfFormat::Era1CountryIndexed)
    } else {
        // Content inconclusive: fall back to the filename year.
        FILENAME_YEAR
            .captures(filename)
            .and_then(|c| c[1].parse::<i32>().ok())
            .map(|year| match year {
                ..=2018 => PdfFormat::Era1CountryIndexed,
                2019..=2020 => PdfFormat::Era2NumberedList,
                _ => PdfFormat::Era3MissionIndexed,
            })
    };

    match format {
        Some(f) => {
            debug!("{}: identified as {}", filename, f);
            Ok(f)
        }
        None => Err(FormatError::Unknown(filename.to_string())),
    }
}

/// Run the era scanner for `format` over a document's lines.
///
/// Deterministic: identical input lines yield an identical record
/// sequence.
pub fn parse_lines(
    format: PdfFormat,
    lines: &[String],
    year: i32,
    month: u32,
) -> Vec<ContributionRecord> {
    match format {
        PdfFormat::Era1CountryIndexed => era1::parse(lines, year, month),
        PdfFormat::Era2NumberedList => era2::parse(lines, year, month),
        PdfFormat::Era3MissionIndexed => era3::parse(lines, year, month),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_report_filename() {
        assert_eq!(
            parse_report_filename("UN_country_contributions_2017_03.pdf").unwrap(),
            (2017, 3)
        );
    }

    #[test]
    fn test_filename_rejection() {
        let err = parse_report_filename("contributions_2020.pdf").unwrap_err();
        assert!(matches!(err, FilenameError::Pattern(_)));

        let err = parse_report_filename("UN_country_contributions_2020_13.pdf").unwrap_err();
        assert!(matches!(err, FilenameError::Month { month: 13, .. }));
    }

    #[test]
    fn test_identify_era3_by_content() {
        let text = lines(&[
            "UNMISS",
            "   Bangladesh",
            "      Staff Officer          4     1      5",
        ]);
        assert_eq!(
            identify_pdf_format(&text, "UN_country_contributions_2022_01.pdf").unwrap(),
            PdfFormat::Era3MissionIndexed
        );
    }

    #[test]
    fn test_identify_era2_by_content() {
        let text = lines(&[
            "1    Algeria",
            "UNMISS",
            "Individual Police     10    2    12",
        ]);
        assert_eq!(
            identify_pdf_format(&text, "UN_country_contributions_2019_06.pdf").unwrap(),
            PdfFormat::Era2NumberedList
        );
    }

    #[test]
    fn test_identify_era1_by_content() {
        let text = lines(&[
            "Bangladesh",
            "UNMISS Individual Police 12 45 57",
        ]);
        assert_eq!(
            identify_pdf_format(&text, "UN_country_contributions_2012_06.pdf").unwrap(),
            PdfFormat::Era1CountryIndexed
        );
    }

    #[test]
    fn test_identify_year_fallback() {
        let text = lines(&["nothing recognizable"]);
        assert_eq!(
            identify_pdf_format(&text, "UN_country_contributions_2016_01.pdf").unwrap(),
            PdfFormat::Era1CountryIndexed
        );
        assert_eq!(
            identify_pdf_format(&text, "UN_country_contributions_2020_01.pdf").unwrap(),
            PdfFormat::Era2NumberedList
        );
        assert_eq!(
            identify_pdf_format(&text, "UN_country_contributions_2023_01.pdf").unwrap(),
            PdfFormat::Era3MissionIndexed
        );
    }

    #[test]
    fn test_identify_unknown() {
        let text = lines(&["nothing recognizable"]);
        let err = identify_pdf_format(&text, "report.pdf").unwrap_err();
        assert!(matches!(err, FormatError::Unknown(_)));
    }
}
