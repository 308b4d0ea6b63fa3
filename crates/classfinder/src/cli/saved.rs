//! Saving, listing, sorting and removing courses.

use super::prompt::Prompter;
use super::table::{self, Layout};
use crate::db::{SaveOutcome, SavedCourseDb};
use crate::error::Result;
use crate::sort::{sort_courses, SortMode};
use crate::types::{EnrichedCourse, SavedCourse};
use std::io::{BufRead, Write};

const SAVE_PROMPT: &str =
    "Enter the index of a class you would like to save or leave blank to return to the menu";
const REMOVE_PROMPT: &str =
    "Enter the index of a class you would like to remove or leave blank to return to the menu";

/// Asks which key to sort by, then sorts `courses` in place.
pub fn choose_and_sort<T, R, W>(p: &mut Prompter<R, W>, courses: &mut [T]) -> Result<SortMode>
where
    T: AsRef<EnrichedCourse>,
    R: BufRead,
    W: Write,
{
    let mode = SortMode::ALL[p.select("How would you like to sort?", &SortMode::ALL)?];
    sort_courses(courses, mode);
    Ok(mode)
}

/// Saves courses picked by index until the user leaves the prompt blank.
pub fn save_classes<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    db: &SavedCourseDb,
    courses: &[EnrichedCourse],
    owner_id: &str,
) -> Result<()> {
    while let Some(index) = p.select_index(SAVE_PROMPT, courses.len())? {
        let course = &courses[index];
        match db.insert(course, owner_id)? {
            SaveOutcome::Added => p.say(format!("Added '{}' to the database", course.course.class_title))?,
            SaveOutcome::AlreadySaved => p.say("Class already added")?,
        }
    }
    Ok(())
}

/// Prints the user's saved courses and returns them in the printed order.
pub fn view_saved<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    db: &SavedCourseDb,
    owner_id: &str,
) -> Result<Vec<SavedCourse>> {
    let saved = db.list_for_owner(owner_id)?;
    if saved.is_empty() {
        p.say("You have no saved classes")?;
    } else {
        table::render(p.out(), &saved, Layout::Full)?;
    }
    Ok(saved)
}

/// Removes saved courses picked by index, reprinting the list after each removal.
///
/// Indexes refer to `saved` as currently printed. An index outside the list
/// is rejected and asked again without touching storage.
pub fn remove_saved_courses<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    db: &SavedCourseDb,
    owner_id: &str,
    mut saved: Vec<SavedCourse>,
) -> Result<()> {
    while let Some(index) = p.select_index(REMOVE_PROMPT, saved.len())? {
        let target = &saved[index];
        if db.remove(target.id(), owner_id)? {
            p.say(format!(
                "Removed class '{}' from the database",
                target.course.course.class_title
            ))?;
            saved = view_saved(p, db, owner_id)?;
        } else {
            p.say("error removing class from database")?;
        }
    }
    Ok(())
}
