//! Colores deterministas por curso.
//!
//! Tono base según el tipo principal del curso (primer token de `type`) más
//! una variación de ±10 grados derivada de un hash del número de curso, así
//! cursos del mismo tipo quedan distinguibles y estables entre recargas.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::models::ScheduledCourse;

/// Color para cursos sin entrada en el mapa.
pub const FALLBACK_COLOR: &str = "#ddd";

const SATURATION: u8 = 65;
const LIGHTNESS: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CourseColor {
    pub hue: i32,
    pub saturation: u8,
    pub lightness: u8,
}

impl fmt::Display for CourseColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

/// Tono base por tipo; `None` para tipos desconocidos (se pintan en gris).
pub fn base_hue(primary_type: &str) -> Option<i32> {
    match primary_type {
        "Year 1" | "Freshman" => Some(220),
        "Year 2" | "Sophomore" => Some(160),
        "Year 3" | "Junior" => Some(50),
        "Year 4" | "Senior" => Some(0),
        "Elective" => Some(280),
        "Graduate" => Some(30),
        "Other" => Some(300),
        _ => None,
    }
}

pub fn primary_type(type_field: &str) -> &str {
    type_field.split(',').next().unwrap_or("").trim()
}

/// hash = c + (hash << 5) - hash sobre unidades UTF-16.
///
/// Sólo el desplazamiento trunca a 32 bits; la resta y la suma no, así que el
/// acumulador sale del rango de `i32` en números como "CH EN 2800" y se
/// guarda en `i64`.
pub fn course_hash(course_number: &str) -> i64 {
    course_number.encode_utf16().fold(0i64, |hash, c| {
        let shifted = (hash as i32).wrapping_shl(5) as i64;
        (c as i64).wrapping_add(shifted.wrapping_sub(hash))
    })
}

/// Variación de tono en [-10, 10].
pub fn hue_jitter(course_number: &str) -> i32 {
    (course_hash(course_number).rem_euclid(21) - 10) as i32
}

pub fn course_color(course_number: &str, type_field: &str) -> CourseColor {
    let (hue, saturation) = match base_hue(primary_type(type_field)) {
        Some(h) => (h, SATURATION),
        None => (0, 0),
    };
    CourseColor {
        hue: hue + hue_jitter(course_number),
        saturation,
        lightness: LIGHTNESS,
    }
}

/// Mapa número de curso -> color CSS. Si un número se repite gana el primero.
pub fn build_color_map(courses: &[ScheduledCourse]) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for c in courses {
        map.entry(c.course.course_number.clone())
            .or_insert_with(|| course_color(&c.course.course_number, &c.course.course_type).to_string());
    }
    map
}
