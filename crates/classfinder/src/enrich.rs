//! Sequential batch enrichment of course records with rating data.

use crate::config::RetryPolicy;
use crate::error::Result;
use crate::ratings::{RatingResolver, RatingsLookup};
use crate::types::{CourseRecord, EnrichedCourse, RatingInfo};
use rand::Rng;
use std::time::Duration;
use tracing::{info, warn};

/// Turns search results into [`EnrichedCourse`]s, one rating lookup at a time.
pub struct Enricher<'a, L> {
    resolver: RatingResolver<'a, L>,
    retry: RetryPolicy,
}

impl<'a, L: RatingsLookup> Enricher<'a, L> {
    pub fn new(resolver: RatingResolver<'a, L>, retry: RetryPolicy) -> Self {
        Self { resolver, retry }
    }

    /// Enriches `courses` in order.
    ///
    /// Each lookup finishes before the next one starts. A failing record is
    /// retried with backoff while the error is retryable and attempts remain;
    /// any other failure aborts the whole batch.
    pub async fn enrich_courses(&self, courses: Vec<CourseRecord>) -> Result<Vec<EnrichedCourse>> {
        info!(count = courses.len(), "Adding rating data to classes");
        let mut enriched = Vec::with_capacity(courses.len());

        for course in courses {
            let rating = self.resolve_with_retry(&course.instructor).await?;
            let mut item = EnrichedCourse::new(course);
            if let Some(rating) = rating {
                item.set_rating(rating);
            }
            enriched.push(item);
        }

        Ok(enriched)
    }

    async fn resolve_with_retry(&self, instructor: &str) -> Result<Option<RatingInfo>> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.resolver.resolve(instructor).await {
                Ok(rating) => return Ok(rating),
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    let delay = backoff_delay(&self.retry, attempt);
                    warn!(
                        instructor = %instructor,
                        attempt = attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Rating lookup failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Exponential backoff with up to 20% jitter, capped at `max_delay_ms`.
fn backoff_delay(policy: &RetryPolicy, attempt: u32) -> Duration {
    let base = policy.base_delay().as_millis() as u64;
    // base * 2^min(attempt-1, 5)
    let exponential = base.saturating_mul(2u64.pow(attempt.saturating_sub(1).min(5)));
    let capped = exponential.min(policy.max_delay_ms);
    let jitter = rand::thread_rng().gen_range(0..=(capped / 5));
    Duration::from_millis(capped + jitter)
}
