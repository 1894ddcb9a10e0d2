//! Filtros del calendario.
//!
//! Hay cuatro superficies: dropdown de profesor, dropdown de sala,
//! checkboxes de tipo y checkboxes de curso. No son independientes:
//!
//! - elegir profesor limpia los tipos, deja sala en "all" y marca los
//!   cursos de ese profesor (sala es simétrico);
//! - marcar un tipo deja ambos dropdowns en "all" y sincroniza los cursos
//!   con los tipos marcados.
//!
//! Al evaluar se resuelve en cascada (ver `ActiveFilter`):
//! dropdown activo > cursos marcados > tipos marcados > sin filtro.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::models::{Choice, ScheduledCourse};

/// Prefijos que marca el atajo "show all CHEN".
pub const CHEN_PREFIXES: [&str; 2] = ["CH", "EN"];

/// Estado de todas las superficies de filtro, tal como las ve la UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    instructor: Choice,
    location: Choice,
    checked_types: BTreeSet<String>,
    checked_courses: BTreeSet<String>,
}

/// Filtro efectivo tras aplicar la precedencia.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveFilter<'a> {
    NoFilter,
    /// Algún dropdown distinto de "all": AND de profesor y sala; los checkboxes se ignoran
    Dropdown {
        instructor: Option<&'a str>,
        location: Option<&'a str>,
    },
    /// Exactamente los números de curso marcados
    ExplicitCourses(&'a BTreeSet<String>),
    /// Cursos cuyo `type` contiene alguno de los tipos marcados
    Types(&'a BTreeSet<String>),
}

fn field_contains(field: &str, needle: &str) -> bool {
    !field.is_empty() && field.contains(needle)
}

pub fn instructor_matches(course: &ScheduledCourse, instructor: &str) -> bool {
    field_contains(&course.course.instructors, instructor)
}

pub fn location_matches(course: &ScheduledCourse, location: &str) -> bool {
    field_contains(&course.course.location, location)
}

pub fn type_matches(course: &ScheduledCourse, types: &BTreeSet<String>) -> bool {
    types.iter().any(|t| field_contains(&course.course.course_type, t))
}

impl ActiveFilter<'_> {
    pub fn matches(&self, course: &ScheduledCourse) -> bool {
        match self {
            ActiveFilter::NoFilter => true,
            ActiveFilter::Dropdown { instructor, location } => {
                let instructor_ok = instructor.is_none_or(|i| instructor_matches(course, i));
                let location_ok = location.is_none_or(|l| location_matches(course, l));
                instructor_ok && location_ok
            }
            ActiveFilter::ExplicitCourses(numbers) => numbers.contains(course.number()),
            ActiveFilter::Types(types) => type_matches(course, types),
        }
    }
}

/// Un checkbox por número de curso; si el número se repite manda el primer curso.
fn checkbox_index(courses: &[ScheduledCourse]) -> BTreeMap<&str, &ScheduledCourse> {
    let mut index = BTreeMap::new();
    for c in courses {
        if !c.number().is_empty() {
            index.entry(c.number()).or_insert(c);
        }
    }
    index
}

fn checked_where<F>(courses: &[ScheduledCourse], pred: F) -> BTreeSet<String>
where
    F: Fn(&ScheduledCourse) -> bool,
{
    checkbox_index(courses)
        .into_iter()
        .filter(|(_, c)| pred(c))
        .map(|(n, _)| n.to_string())
        .collect()
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instructor(&self) -> &Choice {
        &self.instructor
    }

    pub fn location(&self) -> &Choice {
        &self.location
    }

    pub fn checked_types(&self) -> &BTreeSet<String> {
        &self.checked_types
    }

    pub fn checked_courses(&self) -> &BTreeSet<String> {
        &self.checked_courses
    }

    pub fn active(&self) -> ActiveFilter<'_> {
        if !self.instructor.is_all() || !self.location.is_all() {
            ActiveFilter::Dropdown {
                instructor: self.instructor.value(),
                location: self.location.value(),
            }
        } else if !self.checked_courses.is_empty() {
            ActiveFilter::ExplicitCourses(&self.checked_courses)
        } else if !self.checked_types.is_empty() {
            ActiveFilter::Types(&self.checked_types)
        } else {
            ActiveFilter::NoFilter
        }
    }

    /// Dropdown de profesor. Con "all" los checkboxes de curso quedan como estaban.
    pub fn select_instructor(&mut self, choice: Choice, courses: &[ScheduledCourse]) {
        self.checked_types.clear();
        self.location = Choice::All;
        if let Some(name) = choice.value() {
            self.checked_courses = checked_where(courses, |c| instructor_matches(c, name));
        }
        debug!(instructor = %choice, checked = self.checked_courses.len(), "filtro por profesor");
        self.instructor = choice;
    }

    /// Dropdown de sala, simétrico al de profesor.
    pub fn select_location(&mut self, choice: Choice, courses: &[ScheduledCourse]) {
        self.checked_types.clear();
        self.instructor = Choice::All;
        if let Some(room) = choice.value() {
            self.checked_courses = checked_where(courses, |c| location_matches(c, room));
        }
        debug!(location = %choice, checked = self.checked_courses.len(), "filtro por sala");
        self.location = choice;
    }

    /// Checkbox de tipo. Si queda algún tipo marcado, los cursos se sincronizan;
    /// si no queda ninguno, los checkboxes de curso no se tocan.
    pub fn set_type_checked(&mut self, type_name: &str, checked: bool, courses: &[ScheduledCourse]) {
        if checked {
            self.checked_types.insert(type_name.to_string());
        } else {
            self.checked_types.remove(type_name);
        }
        self.instructor = Choice::All;
        self.location = Choice::All;

        if !self.checked_types.is_empty() {
            let types = &self.checked_types;
            self.checked_courses = checked_where(courses, |c| type_matches(c, types));
        }
        debug!(types = ?self.checked_types, checked = self.checked_courses.len(), "filtro por tipo");
    }

    /// Checkbox de curso individual. No altera los dropdowns: si alguno está
    /// activo la selección se ignora hasta que vuelva a "all".
    pub fn set_course_checked(&mut self, course_number: &str, checked: bool) {
        if checked {
            self.checked_courses.insert(course_number.to_string());
        } else {
            self.checked_courses.remove(course_number);
        }
    }

    /// Marca todos los cursos CH*/EN* y desmarca el resto.
    pub fn show_all_chen(&mut self, courses: &[ScheduledCourse]) {
        self.checked_courses = checked_where(courses, |c| {
            CHEN_PREFIXES.iter().any(|p| c.number().starts_with(p))
        });
        debug!(checked = self.checked_courses.len(), "show all CHEN");
    }

    pub fn reset(&mut self) {
        *self = FilterState::default();
    }

    pub fn matches(&self, course: &ScheduledCourse) -> bool {
        self.active().matches(course)
    }

    pub fn apply<'c>(&self, courses: &'c [ScheduledCourse]) -> Vec<&'c ScheduledCourse> {
        let active = self.active();
        courses.iter().filter(|c| active.matches(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleCourse;
    use crate::schedule::time::normalize_course;

    fn course(number: &str, instructors: &str, course_type: &str, location: &str) -> ScheduledCourse {
        normalize_course(ScheduleCourse {
            course_number: number.to_string(),
            instructors: instructors.to_string(),
            course_type: course_type.to_string(),
            location: location.to_string(),
            days: "MWF".to_string(),
            time: Some("9:00 AM".to_string()),
            duration: 50,
            ..Default::default()
        })
    }

    fn sample() -> Vec<ScheduledCourse> {
        vec![
            course("CHEN 1010", "Dr. Smith", "Year 1", "EB 101"),
            course("CHEN 3353", "Dr. Smith; Dr. Jones", "Year 3, Elective", "EB 205"),
            course("MATH 2250", "Dr. Lee", "Other", "LCB 121"),
            course("ENGR 5000", "Dr. Jones", "Graduate, Elective", "EB 101"),
        ]
    }

    fn numbers(out: &[&ScheduledCourse]) -> Vec<String> {
        out.iter().map(|c| c.number().to_string()).collect()
    }

    #[test]
    fn test_no_filter_passes_everything() {
        let courses = sample();
        let state = FilterState::new();
        assert_eq!(state.active(), ActiveFilter::NoFilter);
        assert_eq!(state.apply(&courses).len(), courses.len());
    }

    #[test]
    fn test_dropdown_ignores_checked_courses() {
        let courses = sample();
        let mut state = FilterState::new();
        state.select_instructor(Choice::from("Dr. Smith"), &courses);
        // marcar a mano dos cursos que no son de Dr. Smith
        state.set_course_checked("MATH 2250", true);
        state.set_course_checked("ENGR 5000", true);

        let out = state.apply(&courses);
        assert_eq!(numbers(&out), vec!["CHEN 1010", "CHEN 3353"]);
    }

    #[test]
    fn test_instructor_select_syncs_checkboxes_and_clears_others() {
        let courses = sample();
        let mut state = FilterState::new();
        state.set_type_checked("Elective", true, &courses);
        state.select_location(Choice::from("LCB 121"), &courses);
        assert!(state.checked_types().is_empty());

        state.select_instructor(Choice::from("Dr. Jones"), &courses);
        assert!(state.location().is_all());
        let checked: Vec<&str> = state.checked_courses().iter().map(String::as_str).collect();
        assert_eq!(checked, vec!["CHEN 3353", "ENGR 5000"]);
    }

    #[test]
    fn test_instructor_back_to_all_keeps_checkboxes() {
        let courses = sample();
        let mut state = FilterState::new();
        state.select_instructor(Choice::from("Dr. Lee"), &courses);
        state.select_instructor(Choice::All, &courses);

        // los checkboxes sincronizados siguen marcados y ahora mandan
        assert!(matches!(state.active(), ActiveFilter::ExplicitCourses(_)));
        assert_eq!(numbers(&state.apply(&courses)), vec!["MATH 2250"]);
    }

    #[test]
    fn test_location_dropdown_is_substring() {
        let courses = sample();
        let mut state = FilterState::new();
        state.select_location(Choice::from("EB"), &courses);
        assert!(state.instructor().is_all());
        assert_eq!(numbers(&state.apply(&courses)), vec!["CHEN 1010", "CHEN 3353", "ENGR 5000"]);
    }

    #[test]
    fn test_type_checkbox_substring_match() {
        let courses = sample();
        let mut state = FilterState::new();
        state.set_type_checked("Elective", true, &courses);
        // sin cursos marcados a mano: la sincronización marca los mismos que el tipo
        state.checked_courses.clear();
        assert!(matches!(state.active(), ActiveFilter::Types(_)));
        assert_eq!(numbers(&state.apply(&courses)), vec!["CHEN 3353", "ENGR 5000"]);
    }

    #[test]
    fn test_type_checkbox_resets_dropdowns_and_syncs() {
        let courses = sample();
        let mut state = FilterState::new();
        state.select_instructor(Choice::from("Dr. Lee"), &courses);
        state.set_type_checked("Year 1", true, &courses);
        assert!(state.instructor().is_all());
        assert!(state.location().is_all());
        let checked: Vec<&str> = state.checked_courses().iter().map(String::as_str).collect();
        assert_eq!(checked, vec!["CHEN 1010"]);

        // desmarcar el último tipo no toca los cursos marcados
        state.set_type_checked("Year 1", false, &courses);
        assert_eq!(state.checked_courses().len(), 1);
    }

    #[test]
    fn test_explicit_courses_beat_types() {
        let courses = sample();
        let mut state = FilterState::new();
        state.set_type_checked("Elective", true, &courses);
        state.set_course_checked("CHEN 3353", false);
        assert_eq!(numbers(&state.apply(&courses)), vec!["ENGR 5000"]);
    }

    #[test]
    fn test_show_all_chen_reassigns() {
        let courses = sample();
        let mut state = FilterState::new();
        state.set_course_checked("MATH 2250", true);
        state.show_all_chen(&courses);
        let checked: Vec<&str> = state.checked_courses().iter().map(String::as_str).collect();
        assert_eq!(checked, vec!["CHEN 1010", "CHEN 3353", "ENGR 5000"]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let courses = sample();
        let mut state = FilterState::new();
        state.select_instructor(Choice::from("Dr. Smith"), &courses);
        state.reset();
        assert_eq!(state, FilterState::default());
    }
}
