use serde::Serialize;

use crate::models::ElectiveCourse;

/// Columnas fijas de la tabla de electivos.
pub const COLUMN_COUNT: usize = 10;
pub const NO_RESULTS_MESSAGE: &str = "No electives match the current filter selection.";

pub const HEADERS: [&str; COLUMN_COUNT] = [
    "Course Number",
    "Course Title",
    "Program",
    "Offering Frequency",
    "Next Offering",
    "Last Offered",
    "Certainty",
    "Format",
    "Potential Instructors",
    "Notes",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElectiveRow {
    pub cells: [String; COLUMN_COUNT],
}

/// Contenido del cuerpo de la tabla. Sin resultados o con error de carga
/// se muestra una única fila que ocupa todas las columnas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ElectiveTable {
    Rows { rows: Vec<ElectiveRow> },
    NoResults { message: String, colspan: usize },
    Error { message: String, colspan: usize },
}

/// "UG / GR" si existen ambos; si no, el que exista.
pub fn course_number_display(course: &ElectiveCourse) -> String {
    match (course.ug_number.as_deref(), course.gr_number.as_deref()) {
        (Some(ug), Some(gr)) => format!("{} / {}", ug, gr),
        (Some(ug), None) => ug.to_string(),
        (None, Some(gr)) => gr.to_string(),
        (None, None) => String::new(),
    }
}

pub fn project_row(course: &ElectiveCourse) -> ElectiveRow {
    ElectiveRow {
        cells: [
            course_number_display(course),
            course.title.clone(),
            course.program.clone(),
            course.offering_frequency.clone(),
            course.next_offering.clone().unwrap_or_else(|| "TBD".to_string()),
            course.last_offered.clone(),
            course.certainty.clone(),
            course.format.clone(),
            course.potential_instructors.clone(),
            course.notes.clone(),
        ],
    }
}

pub fn project_rows(courses: &[ElectiveCourse]) -> ElectiveTable {
    if courses.is_empty() {
        return ElectiveTable::NoResults {
            message: NO_RESULTS_MESSAGE.to_string(),
            colspan: COLUMN_COUNT,
        };
    }
    ElectiveTable::Rows { rows: courses.iter().map(project_row).collect() }
}
