/// Wire types for the class schedule and persons APIs
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Envelope returned by the class schedule API
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleResponse {
    #[serde(rename = "CourseSchedProofService")]
    pub service: ScheduleService,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleService {
    pub response: ScheduleBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleBody {
    #[serde(rename = "Course_List", default)]
    pub course_list: Vec<RawClass>,
}

/// One class exactly as the schedule API returns it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawClass {
    #[serde(rename = "className")]
    pub class_name: Option<String>,

    #[serde(rename = "classTitle")]
    pub class_title: Option<String>,

    pub section: Option<String>,

    pub instructor: Option<String>,

    #[serde(rename = "instruction_mode")]
    pub instruction_mode: Option<String>,

    pub days: Option<String>,

    #[serde(rename = "classtime")]
    pub class_time: Option<String>,

    pub building: Option<String>,

    #[serde(rename = "availableSeats", default, deserialize_with = "lenient_count")]
    pub available_seats: i64,

    #[serde(rename = "totalEnrolled", default, deserialize_with = "lenient_count")]
    pub total_enrolled: i64,

    #[serde(rename = "waitlisted", default, deserialize_with = "lenient_count")]
    pub waitlisted: i64,
}

/// Seat counts arrive as numbers, numeric strings, or null depending on the record.
fn lenient_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Subset of the persons API response we read
#[derive(Debug, Clone, Deserialize)]
pub struct PersonResponse {
    pub basic: PersonBasic,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonBasic {
    pub preferred_first_name: PersonField,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonField {
    pub value: Option<String>,
}
