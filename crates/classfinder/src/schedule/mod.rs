/// Class schedule lookup: raw API records, course-number discovery and conversion
mod client;
mod types;

pub use client::ScheduleClient;
pub use types::*;

use crate::types::{CourseRecord, NOT_AVAILABLE};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

// Subject + three-digit number (plus any suffix), e.g. "C S 142" out of "C S 142 001"
static CLASS_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\D*\d\d\d\S*").unwrap());
static COURSE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d\d\d\S*").unwrap());

/// Semesters and the digit each one contributes to a year-term.
pub const TERMS: [(&str, &str); 4] = [("Winter", "1"), ("Spring", "3"), ("Summer", "4"), ("Fall", "5")];

/// Teaching areas offered in the search menu.
pub const TEACHING_AREAS: &[&str] = &[
    "A HTG", "ACC", "AEROS", "AFRIK", "AM ST", "ANES", "ANTHR", "ARAB", "ARMEN", "ART", "ARTHC",
    "ASIAN", "ASL", "BIO", "BULGN", "C S", "CANT", "CCE", "CE", "CEBU", "CELL", "CFM", "CH EN",
    "CHEM", "CHIN", "CL CV", "CLSCS", "CMLIT", "CMPST", "COMD", "COMMS", "CPSE", "CREOL", "CROAT",
    "CSANM", "DANCE", "DANSH", "DES", "DESAN", "DESGD", "DESIL", "DESPH", "DIGHT", "DUTCH",
    "EC EN", "ECE", "ECON", "EDLF", "EIME", "EL ED", "ELING", "EMBA", "ENGL", "ENT", "ESL",
    "EUROP", "EXDM", "EXSC", "FHSS", "FIJI", "FIN", "FINN", "FLANG", "FNART", "FREN", "GEOG",
    "GEOL", "GERM", "GREEK", "GSCM", "GWS", "HAWAI", "HCOLL", "HEB", "HILIG", "HINDI", "HIST",
    "HLTH", "HMONG", "HONRS", "HRM", "IAS", "ICLND", "ICS", "IHUM", "INDES", "INDON", "IP&T",
    "IS", "IT&C", "ITAL", "JAPAN", "KHMER", "KICHE", "KOREA", "LATIN", "LATVI", "LAW", "LFSCI",
    "LING", "LT AM", "M COM", "MALAG", "MARCH", "MATH", "MBA", "MDT", "ME EN", "MESA", "MFGEN",
    "MFHD", "MFT", "MIL S", "MKTH", "MMBIO", "MPA", "MSB", "MTHED", "MUSIC", "NAVAJ", "NDFS",
    "NE LG", "NES", "NEURO", "NORWE", "NURS", "PERSI", "PETE", "PHIL", "PHSCS", "PHY S", "PLANG",
    "POLI", "POLSH", "PORT", "PHYCH", "PWD", "QUECH", "REL A", "REL C", "REL E", "ROM", "RUSS",
    "SAMOA", "SC ED", "SCAND", "SFL", "SLAT", "SLN", "SOC", "SOC W", "SPAN", "SRBIA", "STAC",
    "STAT", "STDEV", "STRAT", "SWAHI", "SWED", "SWELL", "T ED", "TAGAL", "TECH", "TEE", "TELL",
    "TES", "TEST", "THAI", "TMA", "TONGA", "TURK", "UKRAI", "VIET", "WELSH", "WRTG",
];

/// Teaching area used when manual entry is left blank.
pub const DEFAULT_TEACHING_AREA: &str = "C S";

/// Combines a year and a term digit into the year-term the API expects, e.g. `20225`.
pub fn year_term(year: i32, term_code: &str) -> String {
    format!("{}{}", year, term_code)
}

/// Keeps the classes whose name contains `course_number`.
pub fn filter_classes(classes: &[RawClass], course_number: &str) -> Vec<RawClass> {
    classes
        .iter()
        .filter(|c| {
            c.class_name
                .as_deref()
                .is_some_and(|name| name.contains(course_number))
        })
        .cloned()
        .collect()
}

/// Distinct course numbers (e.g. "142", "235R") in first-seen order.
pub fn course_numbers(classes: &[RawClass]) -> Vec<String> {
    let mut seen = HashSet::new();
    classes
        .iter()
        .filter_map(|c| c.class_name.as_deref())
        .filter_map(|name| COURSE_NUMBER_REGEX.find(name))
        .map(|m| m.as_str().to_string())
        .filter(|n| seen.insert(n.clone()))
        .collect()
}

/// Converts a raw API class into a [`CourseRecord`].
///
/// Returns `None` for rows without a class name (the API mixes header rows into the list).
pub fn to_course_record(raw: &RawClass) -> Option<CourseRecord> {
    let full_name = raw.class_name.as_deref()?.trim();
    if full_name.is_empty() {
        return None;
    }

    let (class_name, remainder) = match CLASS_NAME_REGEX.find(full_name) {
        Some(m) => (m.as_str().trim(), full_name[m.end()..].trim()),
        None => (full_name, ""),
    };

    let section = raw
        .section
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| remainder.split_whitespace().next())
        .unwrap_or(NOT_AVAILABLE);

    Some(CourseRecord::new(
        class_name,
        raw.class_title.as_deref().unwrap_or_default().trim(),
        section,
        raw.instructor.as_deref().unwrap_or_default().trim(),
        raw.instruction_mode.as_deref().unwrap_or_default().trim(),
        raw.days.clone(),
        raw.class_time.clone(),
        raw.building.clone(),
        raw.available_seats,
        raw.total_enrolled,
        raw.waitlisted,
    ))
}
