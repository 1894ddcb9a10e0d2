// Vocabularios de filtros del horario: valores distintos, ordenados y no vacíos.
use serde::Serialize;
use std::collections::BTreeSet;

use crate::models::ScheduledCourse;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleVocabularies {
    pub instructors: BTreeSet<String>,
    pub types: BTreeSet<String>,
    pub locations: BTreeSet<String>,
    /// Universo de checkboxes de curso
    pub course_numbers: BTreeSet<String>,
}

fn split_into(out: &mut BTreeSet<String>, field: &str, delim: char) {
    for part in field.split(delim).map(str::trim).filter(|p| !p.is_empty()) {
        out.insert(part.to_string());
    }
}

pub fn derive_vocabularies(courses: &[ScheduledCourse]) -> ScheduleVocabularies {
    let mut vocab = ScheduleVocabularies::default();
    for c in courses {
        split_into(&mut vocab.instructors, &c.course.instructors, ';');
        split_into(&mut vocab.types, &c.course.course_type, ',');
        split_into(&mut vocab.locations, &c.course.location, ';');
        if !c.course.course_number.is_empty() {
            vocab.course_numbers.insert(c.course.course_number.clone());
        }
    }
    vocab
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleCourse;
    use crate::schedule::time::normalize_course;

    #[test]
    fn test_split_trim_and_sort() {
        let courses = vec![
            normalize_course(ScheduleCourse {
                course_number: "CHEN 3353".to_string(),
                instructors: "Dr. Smith; Dr. Jones;".to_string(),
                course_type: "Year 2, Elective".to_string(),
                location: "EB 101".to_string(),
                ..Default::default()
            }),
            normalize_course(ScheduleCourse {
                course_number: "CH 1010".to_string(),
                instructors: "Dr. Jones".to_string(),
                course_type: "Year 1".to_string(),
                location: "".to_string(),
                ..Default::default()
            }),
        ];
        let v = derive_vocabularies(&courses);
        let instructors: Vec<&str> = v.instructors.iter().map(String::as_str).collect();
        assert_eq!(instructors, vec!["Dr. Jones", "Dr. Smith"]);
        let types: Vec<&str> = v.types.iter().map(String::as_str).collect();
        assert_eq!(types, vec!["Elective", "Year 1", "Year 2"]);
        assert_eq!(v.locations.len(), 1);
        let numbers: Vec<&str> = v.course_numbers.iter().map(String::as_str).collect();
        assert_eq!(numbers, vec!["CH 1010", "CHEN 3353"]);
    }
}
