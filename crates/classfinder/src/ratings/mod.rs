/// Professor rating lookup and instructor-name matching
mod client;
mod types;

pub use client::RatingsClient;
pub use types::{TeacherCandidate, TeacherDetails};

use crate::error::Result;
use crate::types::RatingInfo;
use tracing::debug;

/// Two-call contract of the ratings service: search by name, then fetch by id.
#[allow(async_fn_in_trait)]
pub trait RatingsLookup {
    /// Returns instructors at `institution_id` matching `name`, best match first.
    async fn search_teacher(&self, name: &str, institution_id: &str) -> Result<Vec<TeacherCandidate>>;

    /// Returns the rating details for one instructor.
    async fn get_teacher(&self, id: &str) -> Result<TeacherDetails>;
}

/// Search names derived from a full instructor name.
///
/// The primary name is the first two tokens (drops a middle name). The
/// fallback is the first and third tokens, only present for names with at
/// least three tokens, and covers the case where the second token was
/// actually part of the surname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNames {
    pub primary: String,
    pub fallback: Option<String>,
}

impl SearchNames {
    /// Returns `None` for a blank name.
    pub fn from_full_name(full_name: &str) -> Option<Self> {
        let tokens: Vec<&str> = full_name.split_whitespace().collect();
        if tokens.is_empty() {
            return None;
        }

        let primary = tokens.iter().take(2).copied().collect::<Vec<_>>().join(" ");
        let fallback = (tokens.len() >= 3).then(|| format!("{} {}", tokens[0], tokens[2]));
        Some(Self { primary, fallback })
    }
}

/// Resolves instructor names to [`RatingInfo`] through a [`RatingsLookup`].
pub struct RatingResolver<'a, L> {
    lookup: &'a L,
    institution_id: String,
    suppress_zero_rating_matches: bool,
}

impl<'a, L: RatingsLookup> RatingResolver<'a, L> {
    pub fn new(lookup: &'a L, institution_id: impl Into<String>) -> Self {
        Self {
            lookup,
            institution_id: institution_id.into(),
            suppress_zero_rating_matches: false,
        }
    }

    /// When set, a matched instructor with no ratings yields `None`.
    pub fn suppress_zero_rating_matches(mut self, suppress: bool) -> Self {
        self.suppress_zero_rating_matches = suppress;
        self
    }

    /// Looks up ratings for `full_name`.
    ///
    /// # Returns
    /// * `Ok(Some(RatingInfo))` - From the first candidate of the first search that matched
    /// * `Ok(None)` - Neither search matched (or the match had zero ratings and those are suppressed)
    /// * `Err` - A lookup call failed
    pub async fn resolve(&self, full_name: &str) -> Result<Option<RatingInfo>> {
        let Some(names) = SearchNames::from_full_name(full_name) else {
            return Ok(None);
        };

        let mut candidates = self
            .lookup
            .search_teacher(&names.primary, &self.institution_id)
            .await?;

        if candidates.is_empty() {
            if let Some(fallback) = &names.fallback {
                debug!(primary = %names.primary, fallback = %fallback, "No match, retrying with fallback name");
                candidates = self
                    .lookup
                    .search_teacher(fallback, &self.institution_id)
                    .await?;
            }
        }

        let Some(first) = candidates.first() else {
            debug!(instructor = %full_name, "No ratings match");
            return Ok(None);
        };
        debug!(
            instructor = %full_name,
            matched = %format!("{} {}", first.first_name, first.last_name),
            "Using first ratings match"
        );

        let teacher = self.lookup.get_teacher(&first.id).await?;
        if teacher.num_ratings == 0 && self.suppress_zero_rating_matches {
            debug!(instructor = %full_name, "Match has no ratings, leaving empty");
            return Ok(None);
        }

        Ok(Some(RatingInfo {
            avg_difficulty: teacher.avg_difficulty,
            avg_rating: teacher.avg_rating,
            num_ratings: teacher.num_ratings,
        }))
    }
}
