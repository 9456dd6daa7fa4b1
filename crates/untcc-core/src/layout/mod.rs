//! Layout classification survey.
//!
//! Assigns one of the known column arrangements to a document from its
//! text (and, when available, positioned tokens). The output is purely
//! diagnostic: the main extraction pipeline carries its own dispatch in
//! [`crate::extract::identify_pdf_format`], and the two heuristics are
//! intentionally kept independent.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    // Header literal patterns, applied to the lowercased header line. The
    // pipe-separated check runs before the plain country/mission pattern,
    // which would otherwise shadow it.
    static ref HEADER_PIPED: Regex =
        Regex::new(r"country[^|]*\|.*mission[^|]*\|.*description").unwrap();
    static ref HEADER_COUNTRY_FIRST: Regex =
        Regex::new(r"country.*mission.*description").unwrap();
    static ref HEADER_MISSION_FIRST: Regex = Regex::new(r"mission.*country").unwrap();

    static ref FILENAME_DATE: Regex = Regex::new(r"(\d{4})_(\d{2})").unwrap();
    static ref FILENAME_YEAR: Regex = Regex::new(r"(\d{4})").unwrap();

    static ref DATE_SLASH: Regex = Regex::new(r"\b\d{1,2}/\d{1,2}/\d{4}\b").unwrap();
    static ref DATE_DAY_MON_YY: Regex = Regex::new(r"\b\d{1,2}-[A-Za-z]{3}-\d{2}\b").unwrap();
    static ref DATE_LABELED: Regex =
        Regex::new(r"(?i)(?:report\s+date|as\s+of)\s*:?\s*(\S.*)").unwrap();
}

/// Header keywords; a header line carries at least three of them.
const HEADER_KEYWORDS: &[&str] = &[
    "country", "mission", "description", "personnel", "post", "male", "female", "total",
];

/// How many non-trivial lines are searched for a header.
const HEADER_SEARCH_DEPTH: usize = 15;

/// A text token with its horizontal position, when the extraction backend
/// exposes layout geometry.
#[derive(Debug, Clone)]
pub struct PositionedToken {
    pub text: String,
    pub x: f32,
}

/// Known column arrangements across the report's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    AMissionCountry,
    BCountryPost,
    CCountryUnmission,
    Unknown,
    Error,
}

impl Layout {
    /// Label used in the classification report.
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::AMissionCountry => "A_mission_country",
            Layout::BCountryPost => "B_country_post",
            Layout::CCountryUnmission => "C_country_unmission",
            Layout::Unknown => "unknown",
            Layout::Error => "error",
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-document classification result.
#[derive(Debug, Clone)]
pub struct LayoutClassification {
    pub filename: String,
    pub layout: Layout,
    pub report_date: Option<String>,
    pub sample_header_line: String,
    pub notes: String,
}

impl LayoutClassification {
    /// Classification for a document whose text could not be obtained.
    pub fn error(filename: &str, message: &str) -> Self {
        Self {
            filename: filename.to_string(),
            layout: Layout::Error,
            report_date: None,
            sample_header_line: String::new(),
            notes: message.to_string(),
        }
    }
}

/// Classify a document's layout from its text lines.
///
/// Heuristics run in priority order, first conclusive answer wins:
/// header literal patterns, header token positions, token geometry (when
/// `tokens` is given), then the filename year.
pub fn classify_layout(
    filename: &str,
    lines: &[String],
    tokens: Option<&[PositionedToken]>,
) -> LayoutClassification {
    let report_date = extract_report_date(filename, lines);
    let header = find_header_line(lines);
    let mut notes = String::new();

    let mut layout = match &header {
        Some(h) => classify_header(h),
        None => {
            notes.push_str("no header line found");
            Layout::Unknown
        }
    };

    if layout == Layout::Unknown {
        if let Some(toks) = tokens {
            if let Some(by_geometry) = classify_by_geometry(toks) {
                layout = by_geometry;
                notes = "token geometry".to_string();
            }
        }
    }

    if layout == Layout::Unknown {
        if let Some(year) = filename_year(filename) {
            layout = if year <= 2018 {
                Layout::AMissionCountry
            } else {
                Layout::BCountryPost
            };
            notes = format!("year fallback ({year})");
        }
    }

    debug!("{}: {}", filename, layout.as_str());

    LayoutClassification {
        filename: filename.to_string(),
        layout,
        report_date,
        sample_header_line: header
            .or_else(|| first_nontrivial_line(lines))
            .unwrap_or_default(),
        notes,
    }
}

/// Literal and positional header checks.
fn classify_header(header: &str) -> Layout {
    let lower = header.to_lowercase();

    if HEADER_PIPED.is_match(&lower) {
        return Layout::CCountryUnmission;
    }
    if HEADER_COUNTRY_FIRST.is_match(&lower) {
        return Layout::AMissionCountry;
    }
    if HEADER_MISSION_FIRST.is_match(&lower) {
        return Layout::BCountryPost;
    }

    // Both tokens present but no literal pattern matched: compare first
    // occurrences.
    if let (Some(country_at), Some(mission_at)) = (lower.find("country"), lower.find("mission")) {
        return if country_at < mission_at {
            Layout::AMissionCountry
        } else {
            Layout::BCountryPost
        };
    }

    Layout::Unknown
}

/// X-coordinate comparison of the first "mission" and "country" tokens.
fn classify_by_geometry(tokens: &[PositionedToken]) -> Option<Layout> {
    let mission_x = tokens
        .iter()
        .find(|t| t.text.to_lowercase().contains("mission"))
        .map(|t| t.x)?;
    let country_x = tokens
        .iter()
        .find(|t| t.text.to_lowercase().contains("country"))
        .map(|t| t.x)?;

    if mission_x < country_x {
        Some(Layout::AMissionCountry)
    } else {
        Some(Layout::CCountryUnmission)
    }
}

/// A line is non-trivial when it has at least three non-whitespace chars.
fn is_nontrivial(line: &str) -> bool {
    line.chars().filter(|c| !c.is_whitespace()).count() >= 3
}

fn first_nontrivial_line(lines: &[String]) -> Option<String> {
    lines
        .iter()
        .find(|l| is_nontrivial(l))
        .map(|l| l.trim().to_string())
}

/// Scan the first [`HEADER_SEARCH_DEPTH`] non-trivial lines for one
/// carrying at least three distinct header keywords.
fn find_header_line(lines: &[String]) -> Option<String> {
    lines
        .iter()
        .filter(|l| is_nontrivial(l))
        .take(HEADER_SEARCH_DEPTH)
        .find(|line| {
            let lower = line.to_lowercase();
            let hits = HEADER_KEYWORDS
                .iter()
                .filter(|kw| lower.contains(*kw))
                .count();
            hits >= 3
        })
        .map(|l| l.trim().to_string())
}

fn filename_year(filename: &str) -> Option<i32> {
    FILENAME_YEAR
        .captures(filename)
        .and_then(|c| c[1].parse().ok())
}

/// Report date: filename `YYYY_MM` first, then the first date-like
/// substring in the text.
fn extract_report_date(filename: &str, lines: &[String]) -> Option<String> {
    if let Some(caps) = FILENAME_DATE.captures(filename) {
        return Some(format!("{}_{}", &caps[1], &caps[2]));
    }

    for line in lines {
        if let Some(m) = DATE_SLASH.find(line) {
            return Some(m.as_str().to_string());
        }
        if let Some(m) = DATE_DAY_MON_YY.find(line) {
            return Some(m.as_str().to_string());
        }
        if let Some(caps) = DATE_LABELED.captures(line) {
            return Some(caps[1].trim().to_string());
        }
    }

    None
}
