/// Domain types shared by the schedule, ratings, sorting and storage layers
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder stored in place of missing days, meeting time or building.
pub const NOT_AVAILABLE: &str = "N/A";

/// One scheduled section of a course, as returned by the schedule lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Subject + number, e.g. "C S 142"
    pub class_name: String,
    pub class_title: String,
    /// Section code, e.g. "001"
    pub section: String,
    pub instructor: String,
    pub instruction_mode: String,
    pub days: String,
    pub class_time: String,
    pub building: String,
    pub available_seats: i64,
    pub total_enrolled: i64,
    pub waitlist: i64,
}

impl CourseRecord {
    /// Builds a record, replacing absent or blank days, time and building with `"N/A"`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        class_name: impl Into<String>,
        class_title: impl Into<String>,
        section: impl Into<String>,
        instructor: impl Into<String>,
        instruction_mode: impl Into<String>,
        days: Option<String>,
        class_time: Option<String>,
        building: Option<String>,
        available_seats: i64,
        total_enrolled: i64,
        waitlist: i64,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            class_title: class_title.into(),
            section: section.into(),
            instructor: instructor.into(),
            instruction_mode: instruction_mode.into(),
            days: or_not_available(days),
            class_time: or_not_available(class_time),
            building: or_not_available(building),
            available_seats,
            total_enrolled,
            waitlist,
        }
    }
}

fn or_not_available(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Rating data attached to a course when the instructor was found.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingInfo {
    pub avg_difficulty: f64,
    pub avg_rating: f64,
    pub num_ratings: u32,
}

/// A course record plus its identity key and optional rating data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCourse {
    /// Identity key, used as the storage row key
    pub id: String,
    pub course: CourseRecord,
    rating: Option<RatingInfo>,
}

impl EnrichedCourse {
    /// Mints a fresh identity key for `course`. Rating data starts out empty.
    pub fn new(course: CourseRecord) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            course,
            rating: None,
        }
    }

    /// Rebuilds a course that already has an identity key (e.g. loaded from storage).
    pub fn from_parts(id: String, course: CourseRecord, rating: Option<RatingInfo>) -> Self {
        Self { id, course, rating }
    }

    pub fn rating(&self) -> Option<&RatingInfo> {
        self.rating.as_ref()
    }

    /// Attaches rating data. Returns false, leaving the existing data untouched,
    /// if a rating was already set.
    pub fn set_rating(&mut self, rating: RatingInfo) -> bool {
        if self.rating.is_some() {
            return false;
        }
        self.rating = Some(rating);
        true
    }

    pub fn avg_rating(&self) -> Option<f64> {
        self.rating.map(|r| r.avg_rating)
    }

    pub fn avg_difficulty(&self) -> Option<f64> {
        self.rating.map(|r| r.avg_difficulty)
    }

    pub fn num_ratings(&self) -> Option<u32> {
        self.rating.map(|r| r.num_ratings)
    }
}

/// An enriched course persisted for a specific user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCourse {
    pub owner_id: String,
    pub course: EnrichedCourse,
}

impl SavedCourse {
    pub fn id(&self) -> &str {
        &self.course.id
    }
}

impl AsRef<EnrichedCourse> for EnrichedCourse {
    fn as_ref(&self) -> &EnrichedCourse {
        self
    }
}

impl AsRef<EnrichedCourse> for SavedCourse {
    fn as_ref(&self) -> &EnrichedCourse {
        &self.course
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn online_course() -> CourseRecord {
        CourseRecord::new(
            "C S 142",
            "Intro to Programming",
            "002",
            "Jane Q Public",
            "Online",
            None,
            Some("   ".to_string()),
            None,
            10,
            90,
            0,
        )
    }

    #[test]
    fn test_missing_meeting_fields_become_not_available() {
        let course = online_course();
        assert_eq!(course.days, NOT_AVAILABLE);
        assert_eq!(course.class_time, NOT_AVAILABLE);
        assert_eq!(course.building, NOT_AVAILABLE);
    }

    #[test]
    fn test_identity_keys_are_unique() {
        let a = EnrichedCourse::new(online_course());
        let b = EnrichedCourse::new(online_course());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_rating_is_set_at_most_once() {
        let mut course = EnrichedCourse::new(online_course());
        assert!(course.rating().is_none());

        let first = RatingInfo {
            avg_difficulty: 2.5,
            avg_rating: 4.1,
            num_ratings: 12,
        };
        let second = RatingInfo {
            avg_difficulty: 1.0,
            avg_rating: 1.0,
            num_ratings: 1,
        };

        assert!(course.set_rating(first));
        assert!(!course.set_rating(second));
        assert_eq!(course.rating(), Some(&first));
    }
}
