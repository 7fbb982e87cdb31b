//! Display labels for sections, e.g. "BSIT 4A".

use crate::canonical::canonical_year_number;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Trailing campus direction, separated by a hyphen or whitespace
    static ref DIRECTIONAL_SUFFIX: Regex =
        Regex::new(r"(?i)(?:\s*-\s*|\s+)(?:west|north|east|south)\s*$").unwrap();
    /// "BSIT-4A", "BSIT 4A", "bsit4a"
    static ref PROGRAM_YEAR_SECTION: Regex =
        Regex::new(r"(?i)([a-z]+)[\s\-]*(\d+)([a-z]+)").unwrap();
    /// "4A"
    static ref YEAR_SECTION: Regex = Regex::new(r"(?i)(\d+)([a-z]+)").unwrap();
}

/// Removes a trailing directional suffix ("A-West" -> "A", "C NORTH" -> "C").
///
/// Every place that displays or compares a section goes through here.
pub fn strip_directional_suffix(section: &str) -> String {
    DIRECTIONAL_SUFFIX
        .replace(section.trim(), "")
        .trim()
        .to_owned()
}

/// Builds the display label for a section of a program.
///
/// Yields "PROGRAM {year}{section}" when all three parts are known, "PROGRAM
/// {section}" when the year level is missing or unrecognized, and the cleaned
/// section otherwise. A section that is only a direction yields "".
pub fn format_section_label(program_code: &str, year_level: &str, section: &str) -> String {
    let program_code = program_code.trim();
    let cleaned = strip_directional_suffix(section);
    let year = canonical_year_number(year_level);

    match (program_code.is_empty(), year, cleaned.is_empty()) {
        (false, Some(year), false) => format!("{program_code} {year}{cleaned}").to_uppercase(),
        (false, None, false) => format!("{program_code} {cleaned}").to_uppercase(),
        _ => cleaned,
    }
}

/// Reverse-parses a manually typed section such as "BSIT-4A" or "4A".
///
/// Falls back to the suffix-stripped input when neither pattern applies.
pub fn parse_manual_section(section: &str) -> String {
    let cleaned = strip_directional_suffix(section);

    if let Some(caps) = PROGRAM_YEAR_SECTION.captures(&cleaned) {
        return format!("{} {}{}", &caps[1], &caps[2], &caps[3]).to_uppercase();
    }

    if let Some(caps) = YEAR_SECTION.captures(&cleaned) {
        return format!("{}{}", &caps[1], &caps[2]).to_uppercase();
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_directional_suffix() {
        assert_eq!(strip_directional_suffix("A-West"), "A");
        assert_eq!(strip_directional_suffix("A - north"), "A");
        assert_eq!(strip_directional_suffix("C WEST"), "C");
        assert_eq!(strip_directional_suffix("B-South "), "B");
        assert_eq!(strip_directional_suffix("A"), "A");
        // A direction glued to the code is part of the code
        assert_eq!(strip_directional_suffix("Northeast"), "Northeast");
        assert_eq!(strip_directional_suffix("AWest"), "AWest");
    }

    #[test]
    fn test_format_full_label() {
        assert_eq!(format_section_label("BSIT", "4", "A"), "BSIT 4A");
        assert_eq!(format_section_label("BSIT", "Fourth Year", "A-West"), "BSIT 4A");
        assert_eq!(format_section_label("bscs", "2nd Year", "b"), "BSCS 2B");
    }

    #[test]
    fn test_format_without_year() {
        assert_eq!(format_section_label("BSIT", "", "A-North"), "BSIT A");
        assert_eq!(format_section_label("BSIT", "Irregular", "A"), "BSIT A");
    }

    #[test]
    fn test_format_without_program() {
        assert_eq!(format_section_label("", "4", "A-East"), "A");
        assert_eq!(format_section_label("", "", ""), "");
    }

    #[test]
    fn test_format_never_shows_a_direction() {
        assert_eq!(format_section_label("BSIT", "4", "-West"), "");
        assert_eq!(format_section_label("", "", " - north"), "");
        assert_eq!(format_section_label("BSIT", "4", "A-West-East"), "BSIT 4A-WEST");
    }

    #[test]
    fn test_parse_manual_section() {
        assert_eq!(parse_manual_section("BSIT-4A"), "BSIT 4A");
        assert_eq!(parse_manual_section("bsit 4a-West"), "BSIT 4A");
        assert_eq!(parse_manual_section("4A"), "4A");
        assert_eq!(parse_manual_section("Section Alpha - South"), "Section Alpha");
    }
}
