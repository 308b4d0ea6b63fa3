//! Search flow: year, term, teaching area and course number pickers.

use super::prompt::Prompter;
use crate::error::Result;
use crate::schedule::{self, ScheduleClient, DEFAULT_TEACHING_AREA, TEACHING_AREAS, TERMS};
use crate::types::CourseRecord;
use std::io::{BufRead, Write};

const RESTART_TEXT: &str = "Restart Search";
const MAIN_MENU_TEXT: &str = "Return to Main Menu";
const MANUAL_YEAR_TEXT: &str = "Enter another year";
const MANUAL_AREA_TEXT: &str = "Enter manually";

/// Outcome of one picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick<T> {
    Value(T),
    Restart,
    MainMenu,
}

/// Offers last, this and next year, or manual entry (blank means `current_year`).
pub fn select_year<R: BufRead, W: Write>(p: &mut Prompter<R, W>, current_year: i32) -> Result<i32> {
    let years = [current_year - 1, current_year, current_year + 1];
    let mut choices: Vec<String> = years.iter().map(|y| y.to_string()).collect();
    choices.push(MANUAL_YEAR_TEXT.to_string());

    let picked = p.select("Select a year", &choices)?;
    if picked < years.len() {
        return Ok(years[picked]);
    }

    loop {
        let answer = p.input("Enter a year:")?;
        if answer.is_empty() {
            p.say("current year used")?;
            return Ok(current_year);
        }
        match answer.parse::<i32>() {
            Ok(year) if (1000..=9999).contains(&year) => return Ok(year),
            _ => p.say("Not a valid year")?,
        }
    }
}

/// Returns the term digit for the picked semester.
pub fn select_term<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<Pick<&'static str>> {
    let mut choices = vec![RESTART_TEXT, MAIN_MENU_TEXT];
    choices.extend(TERMS.iter().map(|(name, _)| *name));

    Ok(match p.select("Select a semester", &choices)? {
        0 => Pick::Restart,
        1 => Pick::MainMenu,
        n => Pick::Value(TERMS[n - 2].1),
    })
}

pub fn select_teaching_area<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<Pick<String>> {
    let mut choices = vec![RESTART_TEXT, MANUAL_AREA_TEXT];
    choices.extend(TEACHING_AREAS.iter().copied());

    Ok(match p.select("Select a Teaching Area", &choices)? {
        0 => Pick::Restart,
        1 => {
            let answer = p.input("Enter a teaching area:")?;
            if answer.is_empty() {
                p.say(format!("{} used", DEFAULT_TEACHING_AREA))?;
                Pick::Value(DEFAULT_TEACHING_AREA.to_string())
            } else {
                Pick::Value(answer.to_uppercase())
            }
        }
        n => Pick::Value(choices[n].to_string()),
    })
}

/// Walks the user through a search and returns the matching classes.
///
/// Returns `None` if the user chose to go back to the main menu.
pub async fn search_courses<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    schedule: &ScheduleClient,
    current_year: i32,
) -> Result<Option<Vec<CourseRecord>>> {
    loop {
        let year = select_year(p, current_year)?;

        let term = match select_term(p)? {
            Pick::Value(t) => t,
            Pick::Restart => continue,
            Pick::MainMenu => return Ok(None),
        };
        let year_term = schedule::year_term(year, term);

        let teaching_area = match select_teaching_area(p)? {
            Pick::Value(a) => a,
            Pick::Restart => continue,
            Pick::MainMenu => return Ok(None),
        };

        p.say("loading...")?;
        let numbers = schedule.get_course_numbers(&year_term, &teaching_area).await?;
        if numbers.is_empty() {
            p.say("No classes found. Check to make sure you entered a valid teaching area and course number")?;
            continue;
        }

        let picked = p.select("Select a course number", &numbers)?;
        let classes = schedule
            .get_classes(&year_term, &teaching_area, &numbers[picked])
            .await?;

        if classes.is_empty() {
            p.say("No classes found. Check to make sure you entered a valid teaching area and course number")?;
            continue;
        }
        return Ok(Some(classes));
    }
}
