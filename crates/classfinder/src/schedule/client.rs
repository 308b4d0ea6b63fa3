//! HTTP client for the class schedule and persons APIs.
//!
//! Every call builds its own request (URL + bearer header) from immutable
//! client state; nothing is shared or mutated between calls.

use super::types::{PersonResponse, RawClass, ScheduleResponse};
use super::{course_numbers, filter_classes, to_course_record};
use crate::config::AppConfig;
use crate::error::{ClassFinderError, Result};
use crate::types::CourseRecord;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

const SCHEDULE_API_NAME: &str = "the AcademicClassScheduleClassSchedule - v1 API";
const PERSONS_API_NAME: &str = "the Persons - v3 API";

/// Client for the class schedule lookup service.
pub struct ScheduleClient {
    client: Client,
    schedule_base_url: String,
    persons_base_url: String,
    token: String,
}

impl ScheduleClient {
    /// Creates a client that authenticates every call with `token`.
    pub fn new(config: &AppConfig, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ClassFinderError::Network {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            schedule_base_url: config.schedule_base_url.clone(),
            persons_base_url: config.persons_base_url.clone(),
            token: token.into(),
        })
    }

    /// Builds `{base}/{year_term}/{teaching_area}/ALL`, percent-encoding each segment.
    fn schedule_url(&self, year_term: &str, teaching_area: &str) -> Result<Url> {
        append_segments(&self.schedule_base_url, &[year_term, teaching_area, "ALL"])
    }

    /// Fetches every class listed for a teaching area in a year-term.
    async fn fetch_course_list(&self, year_term: &str, teaching_area: &str) -> Result<Vec<RawClass>> {
        let url = self.schedule_url(year_term, teaching_area)?;
        debug!(url = %url, "Requesting class schedule");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClassFinderError::UnexpectedResponse {
                message: format!("class schedule returned status {}", response.status()),
            });
        }

        let body: ScheduleResponse = response.json().await?;
        let list = body.service.response.course_list;
        info!(
            year_term = %year_term,
            teaching_area = %teaching_area,
            count = list.len(),
            "Fetched class schedule"
        );
        Ok(list)
    }

    /// Returns the classes whose name contains `course_number`, converted to records.
    ///
    /// # Arguments
    /// * `year_term` - e.g. `20225`
    /// * `teaching_area` - e.g. `C S`
    /// * `course_number` - substring filter, e.g. `142`
    pub async fn get_classes(
        &self,
        year_term: &str,
        teaching_area: &str,
        course_number: &str,
    ) -> Result<Vec<CourseRecord>> {
        let all = self.fetch_course_list(year_term, teaching_area).await?;
        Ok(filter_classes(&all, course_number)
            .iter()
            .filter_map(to_course_record)
            .collect())
    }

    /// Returns the distinct course numbers offered in a teaching area for a year-term.
    pub async fn get_course_numbers(&self, year_term: &str, teaching_area: &str) -> Result<Vec<String>> {
        let all = self.fetch_course_list(year_term, teaching_area).await?;
        Ok(course_numbers(&all))
    }

    /// Looks up the user's preferred first name in the persons API.
    pub async fn fetch_first_name(&self, user_id: &str) -> Result<String> {
        let url = append_segments(&self.persons_base_url, &[user_id])?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClassFinderError::UnexpectedResponse {
                message: format!("persons API returned status {}", response.status()),
            });
        }

        let person: PersonResponse = response.json().await?;
        Ok(person.basic.preferred_first_name.value.unwrap_or_default())
    }

    /// Checks that the token can call both the persons and class schedule APIs.
    ///
    /// # Returns
    /// * `Ok(String)` - The user's preferred first name
    /// * `Err(MissingSubscription)` - Naming every API that could not be called
    pub async fn verify_subscriptions(
        &self,
        user_id: &str,
        probe_year_term: &str,
        probe_teaching_area: &str,
    ) -> Result<String> {
        info!("Testing API connections");
        let mut missing = Vec::new();

        let first_name = match self.fetch_first_name(user_id).await {
            Ok(name) => name,
            Err(e) => {
                warn!(error = %e, "Persons API call failed");
                missing.push(PERSONS_API_NAME.to_string());
                String::new()
            }
        };

        if let Err(e) = self
            .fetch_course_list(probe_year_term, probe_teaching_area)
            .await
        {
            warn!(error = %e, "Class schedule API call failed");
            missing.insert(0, SCHEDULE_API_NAME.to_string());
        }

        if missing.is_empty() {
            Ok(first_name)
        } else {
            Err(ClassFinderError::MissingSubscription { apis: missing })
        }
    }
}

/// Appends path segments to `base`, percent-encoding spaces and `&` in teaching areas.
fn append_segments(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| ClassFinderError::Url {
            message: format!("{} cannot be used as a base URL", base),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_url_encodes_teaching_area() {
        let client = ScheduleClient::new(&AppConfig::default(), "token").unwrap();
        let url = client.schedule_url("20225", "C S").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.byu.edu/domains/legacy/academic/classschedule/classschedule/v1/20225/C%20S/ALL"
        );
    }

    #[test]
    fn test_trailing_slash_in_base_is_not_doubled() {
        let url = append_segments("https://example.com/persons/", &["123456789"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/persons/123456789");
    }

    #[test]
    fn test_non_base_url_is_rejected() {
        let err = append_segments("mailto:someone@example.com", &["x"]).unwrap_err();
        assert!(matches!(err, ClassFinderError::Url { .. }));
    }
}
