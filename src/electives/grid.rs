//! Grilla de oferta multi-semestre: una columna por semestre (FA/SP) y un
//! check por curso cuando su `predicted_schedule` incluye ese código.

use chrono::Datelike;
use serde::Serialize;

use crate::electives::table::course_number_display;
use crate::models::ElectiveCourse;

/// Nivel visual del check según la certeza del curso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerTier {
    Confirmed,
    Tentative,
    Planned,
    /// Certeza desconocida: check sin estilo
    Unstyled,
}

impl MarkerTier {
    pub fn from_certainty(certainty: &str) -> Self {
        match certainty.trim() {
            "Confirmed" => MarkerTier::Confirmed,
            "Tentative" => MarkerTier::Tentative,
            "Planned" => MarkerTier::Planned,
            _ => MarkerTier::Unstyled,
        }
    }

    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            MarkerTier::Confirmed => Some("status-confirmed"),
            MarkerTier::Tentative => Some("status-tentative"),
            MarkerTier::Planned => Some("status-planned"),
            MarkerTier::Unstyled => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    pub course: String,
    pub title: String,
    /// Una celda por columna; `None` = sin check
    pub cells: Vec<Option<MarkerTier>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferingGrid {
    pub columns: Vec<String>,
    pub rows: Vec<GridRow>,
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Códigos de semestre para `years` años académicos desde `start_year`:
/// FA{yy}, SP{yy+1}, FA{yy+1}, ...
pub fn semester_codes(start_year: i32, years: u32) -> Vec<String> {
    let mut codes = Vec::with_capacity(years as usize * 2);
    for i in 0..years as i32 {
        let year = start_year + i;
        codes.push(format!("FA{:02}", year.rem_euclid(100)));
        codes.push(format!("SP{:02}", (year + 1).rem_euclid(100)));
    }
    codes
}

pub fn build_offering_grid(courses: &[ElectiveCourse], start_year: i32, years: u32) -> OfferingGrid {
    let columns = semester_codes(start_year, years);
    let rows = courses
        .iter()
        .map(|c| {
            let tier = MarkerTier::from_certainty(&c.certainty);
            let cells = columns
                .iter()
                .map(|code| c.predicted_schedule.contains(code).then_some(tier))
                .collect();
            GridRow {
                course: course_number_display(c),
                title: c.title.clone(),
                cells,
            }
        })
        .collect();
    OfferingGrid { columns, rows }
}
