//! Canonical identities for free-form year-level and semester descriptors.
//!
//! Stored descriptors come in many shapes ("4", "4th Year", "Fourth"). Each
//! recognized shape resolves to one canonical number, and the canonical number
//! expands back into every surface form we accept, so stored values can be
//! compared by set membership.

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{EnumIter, EnumProperty, IntoEnumIterator};

lazy_static! {
    static ref ORDINAL_YEAR: Regex =
        Regex::new(r"(?i)^(\d+)\s*(?:st|nd|rd|th)(?:\s+year)?$").unwrap();
    static ref WORD_YEAR: Regex = Regex::new(r"(?i)^([a-z]+)(?:\s+year)?$").unwrap();
    static ref ORDINAL_SEMESTER: Regex =
        Regex::new(r"(?i)^(\d+)\s*(?:st|nd|rd|th)(?:\s+sem(?:ester)?)?$").unwrap();
    static ref WORD_SEMESTER: Regex = Regex::new(r"(?i)^([a-z]+)(?:\s+sem(?:ester)?)?$").unwrap();
}

/// Year levels that have a word form
const YEAR_WORDS: [(u32, &str); 5] = [
    (1, "First"),
    (2, "Second"),
    (3, "Third"),
    (4, "Fourth"),
    (5, "Fifth"),
];

/// Parses a string made only of ASCII digits
fn parse_digits(s: &str) -> Option<u32> {
    (!s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
        .then(|| s.parse().ok())
        .flatten()
}

/// English ordinal with the grammatically correct suffix ("1st", "12th", "23rd")
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };

    format!("{n}{suffix}")
}

/// Word form of a year level, only defined for 1 through 5
pub fn year_word(n: u32) -> Option<&'static str> {
    YEAR_WORDS
        .iter()
        .find(|&&(number, _)| number == n)
        .map(|&(_, word)| word)
}

/// Resolves a year-level descriptor to its canonical number.
///
/// Accepts a pure digit ("4"), an ordinal with any suffix letters ("4th",
/// "4th Year", "4TH YEAR") or a word form ("Fourth", "Fourth Year").
pub fn canonical_year_number(input: &str) -> Option<u32> {
    let input = input.trim();

    if let Some(n) = parse_digits(input) {
        return Some(n);
    }

    if let Some(caps) = ORDINAL_YEAR.captures(input) {
        return caps[1].parse().ok();
    }

    WORD_YEAR.captures(input).and_then(|caps| {
        YEAR_WORDS
            .iter()
            .find(|(_, word)| word.eq_ignore_ascii_case(&caps[1]))
            .map(|&(n, _)| n)
    })
}

/// Every surface form equivalent to a year-level descriptor.
///
/// Always contains the trimmed input. For a recognized descriptor it adds the
/// digit, the ordinal ("4th"), "4th Year", and for 1 through 5 the word forms
/// ("Fourth", "Fourth Year"). Only the correct ordinal suffix is generated.
pub fn canonical_year_forms(input: &str) -> BTreeSet<String> {
    let trimmed = input.trim();
    let mut forms = BTreeSet::from([trimmed.to_owned()]);

    match canonical_year_number(trimmed) {
        Some(n) => {
            let ordinal = ordinal(n);
            forms.insert(n.to_string());
            forms.insert(format!("{ordinal} Year"));
            forms.insert(ordinal);

            if let Some(word) = year_word(n) {
                forms.insert(word.to_owned());
                forms.insert(format!("{word} Year"));
            }
        }
        None => trace!("Unrecognized year level descriptor: {trimmed:?}"),
    }

    forms
}

/// Academic term within a school year
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumProperty,
)]
pub enum Semester {
    #[strum(props(word = "First", number = "1"))]
    First,
    #[strum(props(word = "Second", number = "2"))]
    Second,
    /// Has no numeric alias
    #[strum(props(word = "Summer"))]
    Summer,
}

impl Semester {
    pub fn word(&self) -> &'static str {
        self.get_str("word").unwrap_or_default()
    }

    pub fn number(&self) -> Option<u32> {
        self.get_str("number").and_then(|n| n.parse().ok())
    }

    fn from_number(n: u32) -> Option<Self> {
        Self::iter().find(|semester| semester.number() == Some(n))
    }

    /// Resolves a semester descriptor ("2", "2nd Semester", "Second", "summer")
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();

        if let Some(n) = parse_digits(input) {
            return Self::from_number(n);
        }

        if let Some(caps) = ORDINAL_SEMESTER.captures(input) {
            return caps[1].parse().ok().and_then(Self::from_number);
        }

        WORD_SEMESTER.captures(input).and_then(|caps| {
            Self::iter().find(|semester| semester.word().eq_ignore_ascii_case(&caps[1]))
        })
    }

    /// Recognized surface forms of this semester
    pub fn forms(&self) -> BTreeSet<String> {
        let word = self.word();

        match self.number() {
            Some(n) => BTreeSet::from([
                n.to_string(),
                word.to_owned(),
                format!("{} Semester", ordinal(n)),
                format!("{word} Semester"),
            ]),
            None => BTreeSet::from([word.to_owned()]),
        }
    }
}

/// Every surface form equivalent to a semester descriptor, including the
/// trimmed input itself
pub fn canonical_semester_forms(input: &str) -> BTreeSet<String> {
    let trimmed = input.trim();
    let mut forms = BTreeSet::from([trimmed.to_owned()]);

    match Semester::parse(trimmed) {
        Some(semester) => forms.extend(semester.forms()),
        None => trace!("Unrecognized semester descriptor: {trimmed:?}"),
    }

    forms
}

/// Case-insensitive, trimmed membership test against a form set
pub fn contains_form(forms: &BTreeSet<String>, value: &str) -> bool {
    let value = value.trim().to_lowercase();
    forms.iter().any(|form| form.to_lowercase() == value)
}

/// Whether a stored year level is equivalent to a descriptor
pub fn same_year_level(stored: &str, descriptor: &str) -> bool {
    contains_form(&canonical_year_forms(descriptor), stored)
}

/// Whether a stored semester is equivalent to a descriptor
pub fn same_semester(stored: &str, descriptor: &str) -> bool {
    contains_form(&canonical_semester_forms(descriptor), stored)
}
