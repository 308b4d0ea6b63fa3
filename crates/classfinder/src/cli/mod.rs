/// Interactive menus tying the schedule, ratings and storage clients together
mod prompt;
mod saved;
mod search;
mod table;

pub use prompt::Prompter;

use crate::config::AppConfig;
use crate::db::SavedCourseDb;
use crate::enrich::Enricher;
use crate::error::Result;
use crate::ratings::{RatingResolver, RatingsLookup};
use crate::schedule::ScheduleClient;
use chrono::Datelike;
use std::io::{BufRead, Write};
use table::Layout;
use tracing::info;

const MAIN_MENU: [&str; 3] = ["Search Courses", "View Saved Courses", "Exit Program"];
const SEARCH_MENU: [&str; 3] = ["Return to Main Menu", "Sort Results", "Select Courses to Save"];
const SAVED_MENU: [&str; 4] = [
    "Return to Main Menu",
    "View Sorted",
    "Select Courses to Remove",
    "Remove All",
];

/// Prompts for whatever part of the login wasn't supplied up front.
///
/// # Returns
/// * `(user_id, token)`
pub fn prompt_login<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    user_id: Option<String>,
    token: Option<String>,
) -> Result<(String, String)> {
    p.say("Welcome to the BYU course searcher with Rate-My-Professor data")?;

    let user_id = match user_id {
        Some(id) => id,
        None => ask_until_filled(p, "Enter your BYU-ID (ex. 123456789):")?,
    };
    let token = match token {
        Some(t) => t,
        None => ask_until_filled(p, "Enter your WSO2 token:")?,
    };
    Ok((user_id, token))
}

fn ask_until_filled<R: BufRead, W: Write>(p: &mut Prompter<R, W>, message: &str) -> Result<String> {
    loop {
        let answer = p.input(message)?;
        if !answer.is_empty() {
            return Ok(answer);
        }
    }
}

/// One logged-in session of the menu loop.
pub struct App<'a, L, R, W> {
    pub user_id: String,
    pub config: &'a AppConfig,
    pub schedule: &'a ScheduleClient,
    pub ratings: &'a L,
    pub db: &'a SavedCourseDb,
    pub prompter: Prompter<R, W>,
}

impl<'a, L: RatingsLookup, R: BufRead, W: Write> App<'a, L, R, W> {
    /// Runs the main menu until the user exits.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            match self.prompter.select("What would you like to do?", &MAIN_MENU)? {
                0 => self.search().await?,
                1 => self.saved_courses()?,
                _ => {
                    self.prompter.say("Thanks for using")?;
                    return Ok(());
                }
            }
        }
    }

    async fn search(&mut self) -> Result<()> {
        let current_year = chrono::Local::now().year();
        let Some(records) = search::search_courses(&mut self.prompter, self.schedule, current_year).await? else {
            return Ok(());
        };

        let resolver = RatingResolver::new(self.ratings, self.config.institution_id.clone())
            .suppress_zero_rating_matches(self.config.suppress_zero_rating_matches);
        let enricher = Enricher::new(resolver, self.config.enrichment_retry.clone());
        let mut courses = enricher.enrich_courses(records).await?;

        if let Some(first) = courses.first() {
            let heading = format!("{} {}", first.course.class_name, first.course.class_title);
            self.prompter.say(heading)?;
        }
        table::render(self.prompter.out(), &courses, Layout::Section)?;

        loop {
            match self.prompter.select("What would you like to do?", &SEARCH_MENU)? {
                0 => return Ok(()),
                1 => {
                    let mode = saved::choose_and_sort(&mut self.prompter, &mut courses)?;
                    info!(mode = ?mode, "Sorted search results");
                    table::render(self.prompter.out(), &courses, Layout::Section)?;
                }
                _ => saved::save_classes(&mut self.prompter, self.db, &courses, &self.user_id)?,
            }
        }
    }

    fn saved_courses(&mut self) -> Result<()> {
        let mut saved = saved::view_saved(&mut self.prompter, self.db, &self.user_id)?;

        loop {
            match self.prompter.select("What would you like to do?", &SAVED_MENU)? {
                0 => return Ok(()),
                1 => {
                    saved::choose_and_sort(&mut self.prompter, &mut saved)?;
                    table::render(self.prompter.out(), &saved, Layout::Full)?;
                }
                2 => {
                    saved::remove_saved_courses(&mut self.prompter, self.db, &self.user_id, saved)?;
                    return Ok(());
                }
                _ => {
                    let removed = self.db.remove_all_for_owner(&self.user_id)?;
                    self.prompter.say(format!("Removed {} saved classes", removed))?;
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratings::testing::FakeLookup;
    use crate::types::{CourseRecord, EnrichedCourse};
    use prompt::testing::scripted;

    fn saved_course(db: &SavedCourseDb, owner: &str, section: &str) {
        let course = EnrichedCourse::new(CourseRecord::new(
            "C S 235",
            "Data Structures",
            section,
            "Keith Wilson",
            "Classroom",
            None,
            None,
            None,
            0,
            0,
            0,
        ));
        db.insert(&course, owner).unwrap();
    }

    #[test]
    fn test_login_prompts_only_for_missing_values() {
        let mut p = scripted(&["", "123456789"]);
        let (user, token) = prompt_login(&mut p, None, Some("tok".to_string())).unwrap();
        assert_eq!(user, "123456789");
        assert_eq!(token, "tok");
    }

    #[tokio::test]
    async fn test_remove_all_from_saved_menu() {
        let config = AppConfig::default();
        let schedule = ScheduleClient::new(&config, "token").unwrap();
        let ratings = FakeLookup::default();
        let db = SavedCourseDb::open_in_memory().unwrap();
        saved_course(&db, "u1", "001");
        saved_course(&db, "u1", "002");
        saved_course(&db, "u2", "001");

        // View saved -> Remove All -> Exit
        let mut app = App {
            user_id: "u1".to_string(),
            config: &config,
            schedule: &schedule,
            ratings: &ratings,
            db: &db,
            prompter: scripted(&["2", "4", "3"]),
        };
        app.run().await.unwrap();

        assert!(db.list_for_owner("u1").unwrap().is_empty());
        assert_eq!(db.list_for_owner("u2").unwrap().len(), 1);
        assert!(ratings.calls().is_empty());
    }

    #[tokio::test]
    async fn test_view_sorted_does_not_touch_storage() {
        let config = AppConfig::default();
        let schedule = ScheduleClient::new(&config, "token").unwrap();
        let ratings = FakeLookup::default();
        let db = SavedCourseDb::open_in_memory().unwrap();
        saved_course(&db, "u1", "002");
        saved_course(&db, "u1", "001");

        // View saved -> View Sorted -> by section -> Return -> Exit
        let mut app = App {
            user_id: "u1".to_string(),
            config: &config,
            schedule: &schedule,
            ratings: &ratings,
            db: &db,
            prompter: scripted(&["2", "2", "1", "1", "3"]),
        };
        app.run().await.unwrap();

        let stored: Vec<_> = db
            .list_for_owner("u1")
            .unwrap()
            .into_iter()
            .map(|s| s.course.course.section)
            .collect();
        assert_eq!(stored, vec!["002", "001"]);
    }
}
