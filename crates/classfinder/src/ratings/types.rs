/// Types for the professor ratings GraphQL API
use serde::{Deserialize, Deserializer, Serialize};

/// An instructor returned by a name search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherCandidate {
    pub id: String,
    #[serde(rename = "firstName", default)]
    pub first_name: String,
    #[serde(rename = "lastName", default)]
    pub last_name: String,
}

/// Full rating details for one instructor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherDetails {
    pub id: String,
    #[serde(rename = "avgDifficulty", default, deserialize_with = "null_as_default")]
    pub avg_difficulty: f64,
    #[serde(rename = "avgRating", default, deserialize_with = "null_as_default")]
    pub avg_rating: f64,
    #[serde(rename = "numRatings", default, deserialize_with = "null_as_default")]
    pub num_ratings: u32,
}

// Averages are null for instructors nobody has rated yet.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Generic GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchData {
    pub search: SearchResults,
}

#[derive(Debug, Deserialize)]
pub struct SearchResults {
    pub teachers: TeacherConnection,
}

#[derive(Debug, Deserialize)]
pub struct TeacherConnection {
    #[serde(default)]
    pub edges: Vec<TeacherEdge>,
}

#[derive(Debug, Deserialize)]
pub struct TeacherEdge {
    pub node: TeacherCandidate,
}

#[derive(Debug, Deserialize)]
pub struct NodeData {
    pub node: Option<TeacherDetails>,
}
