// Normalización de horas en texto libre ("2:30 PM") a minutos desde medianoche.
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::MalformedTimeError;
use crate::models::{ScheduleCourse, ScheduledCourse};

static TIME_RE: OnceLock<Regex> = OnceLock::new();

fn time_regex() -> &'static Regex {
    TIME_RE.get_or_init(|| Regex::new(r"(?i)(\d{1,2}):(\d{2})\s*(AM|PM)").expect("time pattern is valid"))
}

/// Convierte "H:MM AM|PM" a minutos desde medianoche.
/// 12 AM -> 0, 12 PM se mantiene en 12, PM suma 12 al resto.
///
/// El patrón no está anclado: "10:30 AM - 11:45 AM" toma la primera hora.
pub fn parse_start_minutes(raw: &str) -> Result<u32, MalformedTimeError> {
    let malformed = || MalformedTimeError { raw: raw.to_string() };
    let caps = time_regex().captures(raw).ok_or_else(malformed)?;

    let mut hour: u32 = caps[1].parse().map_err(|_| malformed())?;
    let minute: u32 = caps[2].parse().map_err(|_| malformed())?;
    let is_pm = caps[3].eq_ignore_ascii_case("PM");

    if is_pm && hour != 12 {
        hour += 12;
    }
    if !is_pm && hour == 12 {
        hour = 0;
    }
    Ok(hour * 60 + minute)
}

/// Agrega `start_minutes` / `end_minutes` a un curso. Nunca falla: si la hora
/// no es parseable ambos quedan en `None` y el curso pasa a "no programable".
pub fn normalize_course(course: ScheduleCourse) -> ScheduledCourse {
    let start = match course.time.as_deref() {
        Some(raw) => match parse_start_minutes(raw) {
            Ok(m) => Some(m),
            Err(e) => {
                debug!(course = %course.course_number, "{}", e);
                None
            }
        },
        None => None,
    };
    let end = start.and_then(|s| s.checked_add(course.duration));
    if start.is_some() && end.is_none() {
        debug!(course = %course.course_number, duration = course.duration, "duración fuera de rango");
    }
    let start = end.and(start);
    ScheduledCourse {
        course,
        start_minutes: start,
        end_minutes: end,
    }
}

pub fn normalize_courses(courses: Vec<ScheduleCourse>) -> Vec<ScheduledCourse> {
    courses.into_iter().map(normalize_course).collect()
}
