//! GraphQL client for the professor ratings site.

use super::types::{GraphQlResponse, NodeData, SearchData, TeacherCandidate, TeacherDetails};
use super::RatingsLookup;
use crate::config::AppConfig;
use crate::error::{ClassFinderError, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

const SEARCH_TEACHER_QUERY: &str = "query TeacherSearchResultsPageQuery($query: TeacherSearchQuery!) {
  search: newSearch {
    teachers(query: $query, first: 1000) {
      edges { node { id firstName lastName } }
    }
  }
}";

const GET_TEACHER_QUERY: &str = "query TeacherRatingsPageQuery($id: ID!) {
  node(id: $id) {
    ... on Teacher { id avgDifficulty avgRating numRatings }
  }
}";

/// HTTP implementation of [`RatingsLookup`].
pub struct RatingsClient {
    client: Client,
    url: String,
    authorization: String,
}

impl RatingsClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ClassFinderError::Network {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            url: config.ratings_url.clone(),
            authorization: config.ratings_authorization.clone(),
        })
    }

    /// Posts one GraphQL query and unwraps the `data` member.
    async fn query<T: DeserializeOwned>(&self, query: &str, variables: serde_json::Value) -> Result<T> {
        let response = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, &self.authorization)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClassFinderError::UnexpectedResponse {
                message: format!("ratings API returned status {}", response.status()),
            });
        }

        let body: GraphQlResponse<T> = response.json().await?;
        if let Some(err) = body.errors.first() {
            return Err(ClassFinderError::UnexpectedResponse {
                message: format!("ratings API error: {}", err.message),
            });
        }
        body.data.ok_or_else(|| ClassFinderError::UnexpectedResponse {
            message: "ratings API response had no data".to_string(),
        })
    }
}

impl RatingsLookup for RatingsClient {
    async fn search_teacher(&self, name: &str, institution_id: &str) -> Result<Vec<TeacherCandidate>> {
        debug!(name = %name, "Searching ratings for instructor");
        let data: SearchData = self
            .query(
                SEARCH_TEACHER_QUERY,
                json!({ "query": { "text": name, "schoolID": institution_id } }),
            )
            .await?;
        Ok(data.search.teachers.edges.into_iter().map(|e| e.node).collect())
    }

    async fn get_teacher(&self, id: &str) -> Result<TeacherDetails> {
        debug!(id = %id, "Fetching instructor ratings");
        let data: NodeData = self.query(GET_TEACHER_QUERY, json!({ "id": id })).await?;
        data.node.ok_or_else(|| ClassFinderError::UnexpectedResponse {
            message: format!("no instructor with id {}", id),
        })
    }
}
