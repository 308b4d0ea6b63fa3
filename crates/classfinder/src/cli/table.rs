//! Plain-text tables of courses.

use crate::types::EnrichedCourse;
use std::io::{self, Write};

/// Which columns to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Search results: all rows share one class, so name and title are left out
    Section,
    /// Saved courses: can mix classes, so name and title are included
    Full,
}

fn headers(layout: Layout) -> Vec<&'static str> {
    let mut headers = vec!["(index)"];
    if layout == Layout::Full {
        headers.extend(["CLASS_NAME", "CLASS_TITLE"]);
    }
    headers.extend([
        "SECTION",
        "INSTRUCTOR",
        "AVG_RATING",
        "AVG_DIFFICULTY",
        "NUM_RATINGS",
        "INSTRUCTION_MODE",
        "DAYS",
        "CLASS_TIME",
        "BUILDING",
        "AVAILABLE_SEATS",
        "TOTAL_ENROLLED",
        "WAITLIST",
    ]);
    headers
}

fn row(index: usize, course: &EnrichedCourse, layout: Layout) -> Vec<String> {
    let c = &course.course;
    let opt = |v: Option<String>| v.unwrap_or_default();

    let mut cells = vec![index.to_string()];
    if layout == Layout::Full {
        cells.push(c.class_name.clone());
        cells.push(c.class_title.clone());
    }
    cells.extend([
        c.section.clone(),
        c.instructor.clone(),
        opt(course.avg_rating().map(|v| v.to_string())),
        opt(course.avg_difficulty().map(|v| v.to_string())),
        opt(course.num_ratings().map(|v| v.to_string())),
        c.instruction_mode.clone(),
        c.days.clone(),
        c.class_time.clone(),
        c.building.clone(),
        c.available_seats.to_string(),
        c.total_enrolled.to_string(),
        c.waitlist.to_string(),
    ]);
    cells
}

/// Writes `courses` as an aligned table, one row per course, indexed from 0.
pub fn render<T: AsRef<EnrichedCourse>>(out: &mut impl Write, courses: &[T], layout: Layout) -> io::Result<()> {
    let headers = headers(layout);
    let rows: Vec<Vec<String>> = courses
        .iter()
        .enumerate()
        .map(|(i, c)| row(i, c.as_ref(), layout))
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let separator: String = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");

    write_line(out, headers.iter().copied(), &widths)?;
    writeln!(out, "{}", separator)?;
    for r in &rows {
        write_line(out, r.iter().map(String::as_str), &widths)?;
    }
    Ok(())
}

fn write_line<'a>(out: &mut impl Write, cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> io::Result<()> {
    let line = cells
        .zip(widths)
        .map(|(cell, w)| format!(" {:<width$} ", cell, width = w))
        .collect::<Vec<_>>()
        .join("|");
    writeln!(out, "{}", line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CourseRecord, RatingInfo};

    fn course(rating: Option<f64>) -> EnrichedCourse {
        let mut c = EnrichedCourse::new(CourseRecord::new(
            "C S 142",
            "Intro to Programming",
            "001",
            "Keith Wilson",
            "Classroom",
            Some("MWF".to_string()),
            None,
            Some("TMCB".to_string()),
            4,
            96,
            1,
        ));
        if let Some(avg_rating) = rating {
            c.set_rating(RatingInfo {
                avg_difficulty: 3.2,
                avg_rating,
                num_ratings: 41,
            });
        }
        c
    }

    #[test]
    fn test_section_layout_omits_class_name() {
        let mut out = Vec::new();
        render(&mut out, &[course(Some(4.7))], Layout::Section).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("SECTION"));
        assert!(!lines[0].contains("CLASS_TITLE"));
        assert!(lines[2].starts_with(" 0 "));
        assert!(lines[2].contains("4.7"));
        assert!(lines[2].contains("N/A"));
    }

    #[test]
    fn test_full_layout_and_blank_ratings() {
        let mut out = Vec::new();
        render(&mut out, &[course(None), course(Some(3.0))], Layout::Full).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.lines().next().unwrap().contains("CLASS_TITLE"));
        assert!(text.contains("Intro to Programming"));
        assert!(!text.lines().nth(2).unwrap().contains("3.2"));
        assert!(text.lines().nth(3).unwrap().contains("3.2"));
    }
}
