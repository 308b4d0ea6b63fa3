//! Sorting of enriched courses by section, rating, difficulty or meeting time.
//!
//! All orderings use a stable sort, so records with equal keys keep their
//! relative order. Missing or unusable values (no rating data, NaN, an
//! unparsable time component) never fail the sort; they are placed after
//! every usable value at the same level of comparison.

use crate::types::{EnrichedCourse, NOT_AVAILABLE};
use std::cmp::Ordering;
use std::fmt;

/// Key a course list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Section code, ascending
    Section,
    /// Average rating, highest first
    Rating,
    /// Average difficulty, easiest first
    Difficulty,
    /// Meeting time, earliest first
    Time,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        SortMode::Section,
        SortMode::Rating,
        SortMode::Difficulty,
        SortMode::Time,
    ];
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortMode::Section => "Sort by section",
            SortMode::Rating => "Sort by rating",
            SortMode::Difficulty => "Sort by difficulty",
            SortMode::Time => "Sort by class time",
        };
        f.write_str(label)
    }
}

/// Sorts `courses` in place by `mode`.
pub fn sort_courses<T: AsRef<EnrichedCourse>>(courses: &mut [T], mode: SortMode) {
    courses.sort_by(|a, b| compare(a.as_ref(), b.as_ref(), mode));
}

fn compare(a: &EnrichedCourse, b: &EnrichedCourse, mode: SortMode) -> Ordering {
    match mode {
        SortMode::Section => a.course.section.cmp(&b.course.section),
        SortMode::Rating => compare_present_first(usable(b.avg_rating()), usable(a.avg_rating()), true),
        SortMode::Difficulty => compare_present_first(usable(a.avg_difficulty()), usable(b.avg_difficulty()), false),
        SortMode::Time => {
            MeetingTime::parse(&a.course.class_time).cmp_start(&MeetingTime::parse(&b.course.class_time))
        }
    }
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// Compares two optional values, with `None` after every `Some`.
///
/// `swapped` tells us the arguments were passed as (b, a) for a descending
/// order, so the `None` placement has to be flipped back.
fn compare_present_first<T: PartialOrd>(a: Option<T>, b: Option<T>, swapped: bool) -> Ordering {
    let ord = match (&a, &b) {
        (Some(x), Some(y)) => return x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    if swapped {
        ord.reverse()
    } else {
        ord
    }
}

/// The start of a meeting time, broken into the parts the time ordering uses.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MeetingTime {
    /// "N/A" or blank: online or unscheduled
    NotAvailable,
    At {
        /// Upper-cased AM/PM marker, compared as text
        marker: String,
        hour: Option<u32>,
        /// Only the first digit of the minutes
        minute_tens: Option<u32>,
    },
}

impl MeetingTime {
    /// Parses the start of strings like `"9:05 AM - 9:55 AM"`, `"9:05a"` or `"09:05PM"`.
    fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
            return MeetingTime::NotAvailable;
        }

        let start = trimmed.split('-').next().unwrap_or(trimmed).trim();
        let numeric = start.trim_end_matches(|c: char| c.is_ascii_alphabetic());
        let marker = &start[numeric.len()..];

        let mut marker = marker.trim().to_ascii_uppercase();
        if marker == "A" || marker == "P" {
            marker.push('M');
        }

        let numeric = numeric.trim();
        let (hour, minute_tens) = match numeric.split_once(':') {
            Some((h, m)) => (
                h.trim().parse().ok(),
                m.trim().chars().next().and_then(|c| c.to_digit(10)),
            ),
            None => (numeric.parse().ok(), None),
        };

        MeetingTime::At {
            marker,
            hour,
            minute_tens,
        }
    }

    /// N/A first, then AM/PM marker as text, then hour, then the first minute digit.
    fn cmp_start(&self, other: &Self) -> Ordering {
        match (self, other) {
            (MeetingTime::NotAvailable, MeetingTime::NotAvailable) => Ordering::Equal,
            (MeetingTime::NotAvailable, _) => Ordering::Less,
            (_, MeetingTime::NotAvailable) => Ordering::Greater,
            (
                MeetingTime::At {
                    marker: m1,
                    hour: h1,
                    minute_tens: t1,
                },
                MeetingTime::At {
                    marker: m2,
                    hour: h2,
                    minute_tens: t2,
                },
            ) => m1
                .cmp(m2)
                .then_with(|| compare_present_first(*h1, *h2, false))
                .then_with(|| compare_present_first(*t1, *t2, false)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CourseRecord, RatingInfo};

    fn course(section: &str, time: Option<&str>, rating: Option<(f64, f64)>) -> EnrichedCourse {
        let record = CourseRecord::new(
            "C S 142",
            "Intro to Programming",
            section,
            "Jane Q Public",
            "Classroom",
            Some("MWF".to_string()),
            time.map(str::to_string),
            Some("TMCB".to_string()),
            1,
            2,
            0,
        );
        let mut c = EnrichedCourse::new(record);
        if let Some((avg_rating, avg_difficulty)) = rating {
            c.set_rating(RatingInfo {
                avg_difficulty,
                avg_rating,
                num_ratings: 3,
            });
        }
        c
    }

    fn sections(courses: &[EnrichedCourse]) -> Vec<&str> {
        courses.iter().map(|c| c.course.section.as_str()).collect()
    }

    #[test]
    fn test_section_and_rating_scenario() {
        let mut courses = vec![
            course("002", None, Some((4.5, 2.0))),
            course("001", None, Some((3.0, 3.0))),
            course("003", None, Some((5.0, 4.0))),
        ];

        sort_courses(&mut courses, SortMode::Section);
        assert_eq!(sections(&courses), vec!["001", "002", "003"]);

        sort_courses(&mut courses, SortMode::Rating);
        assert_eq!(sections(&courses), vec!["003", "002", "001"]);
        let ratings: Vec<_> = courses.iter().map(|c| c.avg_rating().unwrap()).collect();
        assert_eq!(ratings, vec![5.0, 4.5, 3.0]);
    }

    #[test]
    fn test_rating_follows_the_course_not_its_input_position() {
        let mut courses = vec![
            course("002", None, Some((3.0, 3.0))),
            course("001", None, Some((4.5, 2.0))),
            course("003", None, Some((5.0, 4.0))),
        ];

        sort_courses(&mut courses, SortMode::Section);
        assert_eq!(sections(&courses), vec!["001", "002", "003"]);

        sort_courses(&mut courses, SortMode::Rating);
        assert_eq!(sections(&courses), vec!["003", "001", "002"]);
    }

    #[test]
    fn test_short_am_pm_suffixes() {
        let mut courses = vec![
            course("001", Some("1:00p - 1:50p"), None),
            course("002", Some("9:50a - 10:40a"), None),
            course("003", None, None),
            course("004", Some("11:00a - 11:50a"), None),
            course("005", Some("9:05a - 9:55a"), None),
        ];
        sort_courses(&mut courses, SortMode::Time);
        assert_eq!(sections(&courses), vec!["003", "005", "002", "004", "001"]);
    }

    #[test]
    fn test_section_sort_is_idempotent() {
        let mut courses = vec![
            course("010", None, None),
            course("002", None, None),
            course("002", Some("9:00 AM"), None),
            course("001", None, None),
        ];
        sort_courses(&mut courses, SortMode::Section);
        let once = courses.clone();
        sort_courses(&mut courses, SortMode::Section);
        assert_eq!(courses, once);
    }

    #[test]
    fn test_difficulty_ascending_with_missing_last() {
        let mut courses = vec![
            course("001", None, Some((4.0, 3.5))),
            course("002", None, None),
            course("003", None, Some((4.0, 1.5))),
            course("004", None, Some((4.0, f64::NAN))),
        ];
        sort_courses(&mut courses, SortMode::Difficulty);
        assert_eq!(sections(&courses), vec!["003", "001", "002", "004"]);
    }

    #[test]
    fn test_rating_ties_keep_relative_order_and_missing_last() {
        let mut courses = vec![
            course("001", None, None),
            course("002", None, Some((4.0, 1.0))),
            course("003", None, Some((4.0, 2.0))),
            course("004", None, Some((4.9, 2.0))),
        ];
        sort_courses(&mut courses, SortMode::Rating);
        assert_eq!(sections(&courses), vec!["004", "002", "003", "001"]);
    }

    #[test]
    fn test_unscheduled_sections_come_first_in_input_order() {
        let mut courses = vec![
            course("001", Some("8:00 AM - 8:50 AM"), None),
            course("002", None, None),
            course("003", Some("1:00 PM - 1:50 PM"), None),
            course("004", Some("N/A"), None),
        ];
        sort_courses(&mut courses, SortMode::Time);
        assert_eq!(sections(&courses), vec!["002", "004", "001", "003"]);
    }

    #[test]
    fn test_am_before_pm_regardless_of_hour() {
        let mut courses = vec![
            course("001", Some("1:00 PM"), None),
            course("002", Some("11:00 AM"), None),
            course("003", Some("12:30 PM"), None),
        ];
        sort_courses(&mut courses, SortMode::Time);
        // Hours compare as plain integers within a marker, so 1 PM sorts before 12 PM.
        assert_eq!(sections(&courses), vec!["002", "001", "003"]);
    }

    #[test]
    fn test_only_first_minute_digit_is_compared() {
        let mut courses = vec![
            course("001", Some("9:50 AM"), None),
            course("002", Some("9:05 AM"), None),
        ];
        sort_courses(&mut courses, SortMode::Time);
        assert_eq!(sections(&courses), vec!["002", "001"]);

        // 9:15 and 9:10 share the first minute digit, so they stay as given.
        let mut courses = vec![
            course("001", Some("9:15 AM"), None),
            course("002", Some("9:10 AM"), None),
        ];
        sort_courses(&mut courses, SortMode::Time);
        assert_eq!(sections(&courses), vec!["001", "002"]);
    }

    #[test]
    fn test_time_formats() {
        assert_eq!(
            MeetingTime::parse("9:05a - 9:55a"),
            MeetingTime::At {
                marker: "AM".to_string(),
                hour: Some(9),
                minute_tens: Some(0),
            }
        );
        assert_eq!(
            MeetingTime::parse("02:30PM"),
            MeetingTime::At {
                marker: "PM".to_string(),
                hour: Some(2),
                minute_tens: Some(3),
            }
        );
        assert_eq!(MeetingTime::parse("  "), MeetingTime::NotAvailable);
    }

    #[test]
    fn test_malformed_times_sort_deterministically() {
        let mut courses = vec![
            course("001", Some("TBA"), None),
            course("002", Some("x:y AM"), None),
            course("003", Some("10:00 AM"), None),
            course("004", Some("x:y AM"), None),
        ];
        sort_courses(&mut courses, SortMode::Time);
        assert_eq!(sections(&courses), vec!["003", "002", "004", "001"]);
    }
}
