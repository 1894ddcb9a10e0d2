// Partición y ubicación de bloques en las columnas del calendario semanal.
//
// Cada día del string `days` genera una copia independiente del bloque: un
// curso MWF produce tres ubicaciones. No hay resolución de solapamientos;
// dos cursos a la misma hora comparten la misma franja de la columna.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::models::ScheduledCourse;
use crate::schedule::color::FALLBACK_COLOR;

/// Columnas por defecto: código de día -> etiqueta.
pub const DEFAULT_DAYS: [(char, &str); 5] = [('M', "Mo"), ('T', "Tu"), ('W', "We"), ('R', "Th"), ('F', "Fr")];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayColumn {
    pub code: char,
    pub label: &'static str,
}

pub fn default_columns() -> Vec<DayColumn> {
    DEFAULT_DAYS
        .iter()
        .map(|&(code, label)| DayColumn { code, label })
        .collect()
}

/// Rango de horas visible en el calendario (ambos extremos incluidos).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl CalendarWindow {
    /// Etiquetas de la columna de horas: "7:00", "8:00", ...
    pub fn hour_labels(&self) -> Vec<String> {
        (self.start_hour..=self.end_hour).map(|h| format!("{}:00", h)).collect()
    }

    pub fn start_minutes(&self) -> u32 {
        self.start_hour * 60
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub course_number: String,
    /// "{número}\n{hora}\n{sala}"
    pub text: String,
    pub color: String,
    pub start_minutes: u32,
    pub end_minutes: u32,
    /// Minutos desde el inicio de la ventana (negativo si empieza antes)
    pub offset_minutes: i64,
    pub height_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    pub day: DayColumn,
    pub blocks: Vec<Placement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition<'a> {
    pub schedulable: Vec<&'a ScheduledCourse>,
    pub unschedulable: Vec<&'a ScheduledCourse>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub total: usize,
    pub schedulable: usize,
    pub unschedulable: usize,
}

pub fn partition<'a>(filtered: &[&'a ScheduledCourse]) -> Partition<'a> {
    let (schedulable, unschedulable): (Vec<_>, Vec<_>) =
        filtered.iter().copied().partition(|c| c.is_schedulable());
    Partition { schedulable, unschedulable }
}

impl Partition<'_> {
    pub fn metrics(&self) -> Metrics {
        Metrics {
            total: self.schedulable.len() + self.unschedulable.len(),
            schedulable: self.schedulable.len(),
            unschedulable: self.unschedulable.len(),
        }
    }
}

fn block_text(course: &ScheduledCourse) -> String {
    format!(
        "{}\n{}\n{}",
        course.course.course_number,
        course.course.time.as_deref().unwrap_or(""),
        course.course.location
    )
}

/// Ubica cada curso programable en las columnas de sus días. Los códigos de
/// día sin columna se ignoran.
pub fn place_courses(
    schedulable: &[&ScheduledCourse],
    columns: &[DayColumn],
    colors: &BTreeMap<String, String>,
    window: CalendarWindow,
) -> Vec<DaySchedule> {
    let mut days: Vec<DaySchedule> = columns
        .iter()
        .map(|&day| DaySchedule { day, blocks: Vec::new() })
        .collect();

    for course in schedulable {
        let (Some(start), Some(end)) = (course.start_minutes, course.end_minutes) else {
            continue;
        };
        let color = colors
            .get(course.number())
            .cloned()
            .unwrap_or_else(|| FALLBACK_COLOR.to_string());

        for code in course.course.days.chars() {
            match days.iter_mut().find(|d| d.day.code == code) {
                Some(column) => column.blocks.push(Placement {
                    course_number: course.number().to_string(),
                    text: block_text(course),
                    color: color.clone(),
                    start_minutes: start,
                    end_minutes: end,
                    offset_minutes: start as i64 - window.start_minutes() as i64,
                    height_minutes: end - start,
                }),
                None => {
                    if !code.is_whitespace() {
                        debug!(course = %course.number(), day = %code, "día sin columna, se omite");
                    }
                }
            }
        }
    }
    days
}

/// Líneas del archivo de cursos no programables.
pub fn archive_entries(unschedulable: &[&ScheduledCourse]) -> Vec<String> {
    unschedulable
        .iter()
        .map(|c| {
            format!(
                "{} — {} ({})",
                c.course.course_number,
                c.course.title,
                c.course.time.as_deref().unwrap_or("no time")
            )
        })
        .collect()
}

/// Leyenda: números de curso distintos del resultado filtrado, en orden de aparición.
pub fn legend(filtered: &[&ScheduledCourse]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for c in filtered {
        if seen.insert(c.number().to_string()) {
            out.push(c.number().to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleCourse;
    use crate::schedule::time::normalize_course;

    fn course(number: &str, days: &str, time: Option<&str>) -> ScheduledCourse {
        normalize_course(ScheduleCourse {
            course_number: number.to_string(),
            title: format!("{} title", number),
            days: days.to_string(),
            time: time.map(str::to_string),
            duration: 50,
            location: "EB 101".to_string(),
            ..Default::default()
        })
    }

    const WINDOW: CalendarWindow = CalendarWindow { start_hour: 7, end_hour: 20 };

    #[test]
    fn test_mwf_produces_three_placements() {
        let c = course("CHEN 3353", "MWF", Some("9:00 AM"));
        let columns: Vec<DayColumn> = default_columns()
            .into_iter()
            .filter(|d| "MWF".contains(d.code))
            .collect();
        let days = place_courses(&[&c], &columns, &BTreeMap::new(), WINDOW);
        assert_eq!(days.len(), 3);
        for d in &days {
            assert_eq!(d.blocks.len(), 1, "columna {}", d.day.code);
            let b = &d.blocks[0];
            assert_eq!(b.offset_minutes, 120);
            assert_eq!(b.height_minutes, 50);
            assert_eq!(b.color, FALLBACK_COLOR);
            assert_eq!(b.text, "CHEN 3353\n9:00 AM\nEB 101");
        }
    }

    #[test]
    fn test_overlaps_are_not_stacked() {
        let a = course("CH 1", "TR", Some("1:00 PM"));
        let b = course("CH 2", "R", Some("1:00 PM"));
        let days = place_courses(&[&a, &b], &default_columns(), &BTreeMap::new(), WINDOW);
        let thursday = days.iter().find(|d| d.day.code == 'R').expect("columna R");
        assert_eq!(thursday.blocks.len(), 2);
        assert_eq!(thursday.blocks[0].offset_minutes, thursday.blocks[1].offset_minutes);
        let monday = days.iter().find(|d| d.day.code == 'M').expect("columna M");
        assert!(monday.blocks.is_empty());
    }

    #[test]
    fn test_unknown_day_codes_are_skipped() {
        let c = course("CH 1", "MS", Some("8:00 AM"));
        let days = place_courses(&[&c], &default_columns(), &BTreeMap::new(), WINDOW);
        let total: usize = days.iter().map(|d| d.blocks.len()).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_partition_and_metrics() {
        let ok = course("CH 1", "MW", Some("8:00 AM"));
        let no_time = course("CH 2", "MW", Some("TBD"));
        let no_days = course("CH 3", "  ", Some("8:00 AM"));
        let filtered = vec![&ok, &no_time, &no_days];
        let p = partition(&filtered);
        assert_eq!(p.schedulable.len(), 1);
        assert_eq!(
            p.metrics(),
            Metrics { total: 3, schedulable: 1, unschedulable: 2 }
        );

        let archive = archive_entries(&p.unschedulable);
        assert_eq!(archive[0], "CH 2 — CH 2 title (TBD)");
        let no_time_at_all = course("CH 4", "", None);
        assert_eq!(archive_entries(&[&no_time_at_all])[0], "CH 4 — CH 4 title (no time)");
    }

    #[test]
    fn test_legend_and_hour_labels() {
        let a = course("CH 1", "M", Some("8:00 AM"));
        let b = course("CH 1", "W", Some("8:00 AM"));
        let c = course("EN 2", "F", None);
        assert_eq!(legend(&[&a, &b, &c]), vec!["CH 1", "EN 2"]);

        let labels = WINDOW.hour_labels();
        assert_eq!(labels.len(), 14);
        assert_eq!(labels[0], "7:00");
        assert_eq!(labels[13], "20:00");
    }
}
