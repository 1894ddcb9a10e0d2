// Estructuras de datos principales

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// Valor centinela que usan los selectores para "sin filtro".
pub const ALL: &str = "all";

/// Opción de un selector (dropdown). `All` equivale al valor `"all"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Choice {
    #[default]
    All,
    Value(String),
}

impl Choice {
    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }

    /// Valor seleccionado, o `None` si el selector está en "all".
    pub fn value(&self) -> Option<&str> {
        match self {
            Choice::All => None,
            Choice::Value(v) => Some(v.as_str()),
        }
    }
}

impl From<&str> for Choice {
    fn from(s: &str) -> Self {
        if s == ALL { Choice::All } else { Choice::Value(s.to_string()) }
    }
}

impl From<String> for Choice {
    fn from(s: String) -> Self {
        if s == ALL { Choice::All } else { Choice::Value(s) }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value().unwrap_or(ALL))
    }
}

impl Serialize for Choice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.value().unwrap_or(ALL))
    }
}

impl<'de> Deserialize<'de> for Choice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Choice::from(s))
    }
}

/// Curso electivo tal como viene en `electives.json`.
///
/// Las claves JSON son los encabezados de la planilla original
/// ("Course Number (UG)", "Course Title", ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectiveCourse {
    #[serde(rename = "Course Number (UG)", default, deserialize_with = "de_opt_text")]
    pub ug_number: Option<String>,
    #[serde(rename = "Course Number (GR)", default, deserialize_with = "de_opt_text")]
    pub gr_number: Option<String>,
    #[serde(rename = "Course Title", default, deserialize_with = "de_text")]
    pub title: String,
    /// Lista de programas separada por `;`
    #[serde(rename = "Program", default, deserialize_with = "de_raw_text")]
    pub program: String,
    #[serde(rename = "Offering Frequency", default, deserialize_with = "de_raw_text")]
    pub offering_frequency: String,
    #[serde(rename = "Next Offering", default, deserialize_with = "de_opt_text")]
    pub next_offering: Option<String>,
    #[serde(rename = "Last Offered", default, deserialize_with = "de_text")]
    pub last_offered: String,
    /// Confirmed / Tentative / Planned, u otro texto libre
    #[serde(rename = "Certainty", default, deserialize_with = "de_raw_text")]
    pub certainty: String,
    #[serde(rename = "Format", default, deserialize_with = "de_text")]
    pub format: String,
    #[serde(rename = "Potential Instructors", default, deserialize_with = "de_text")]
    pub potential_instructors: String,
    #[serde(rename = "Notes", default, deserialize_with = "de_text")]
    pub notes: String,
    /// Códigos de semestre previstos ("FA25", "SP26", ...)
    #[serde(
        rename = "predicted_schedule",
        alias = "Predicted Schedule",
        default,
        deserialize_with = "de_semester_codes"
    )]
    pub predicted_schedule: BTreeSet<String>,
}

/// Curso de un semestre (variante horario), sin campos derivados.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CourseRecord")]
pub struct ScheduleCourse {
    pub course_number: String,
    pub title: String,
    /// Profesores separados por `;`
    pub instructors: String,
    /// Categorías separadas por `,` ("Year 1, Elective")
    #[serde(rename = "type")]
    pub course_type: String,
    /// Salas separadas por `;`
    pub location: String,
    /// Códigos de día de una letra: "MWF", "TR"
    pub days: String,
    /// Hora de inicio en texto libre ("2:30 PM")
    pub time: Option<String>,
    /// Duración en minutos
    pub duration: u32,
    pub notes: String,
    pub anticipated_enrollment: Option<String>,
}

/// Registro tal como viene en el JSON. El conversor escribe la hora como
/// `time_of_day`; si el registro trae ambas claves manda `time`.
#[derive(Debug, Deserialize)]
struct CourseRecord {
    #[serde(default, deserialize_with = "de_text")]
    course_number: String,
    #[serde(default, deserialize_with = "de_text")]
    title: String,
    #[serde(default, deserialize_with = "de_text")]
    instructors: String,
    #[serde(rename = "type", default, deserialize_with = "de_text")]
    course_type: String,
    #[serde(default, deserialize_with = "de_text")]
    location: String,
    #[serde(default, deserialize_with = "de_text")]
    days: String,
    #[serde(default, deserialize_with = "de_opt_text")]
    time: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    time_of_day: Option<String>,
    #[serde(default, deserialize_with = "de_minutes")]
    duration: u32,
    #[serde(default, deserialize_with = "de_text")]
    notes: String,
    #[serde(default, deserialize_with = "de_opt_text")]
    anticipated_enrollment: Option<String>,
}

impl From<CourseRecord> for ScheduleCourse {
    fn from(r: CourseRecord) -> Self {
        ScheduleCourse {
            course_number: r.course_number,
            title: r.title,
            instructors: r.instructors,
            course_type: r.course_type,
            location: r.location,
            days: r.days,
            time: r.time.or(r.time_of_day),
            duration: r.duration,
            notes: r.notes,
            anticipated_enrollment: r.anticipated_enrollment,
        }
    }
}

/// Curso normalizado: el registro original más los minutos derivados al cargar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledCourse {
    #[serde(flatten)]
    pub course: ScheduleCourse,
    pub start_minutes: Option<u32>,
    pub end_minutes: Option<u32>,
}

impl ScheduledCourse {
    /// Un curso entra a la grilla sólo si tiene hora parseable y días.
    pub fn is_schedulable(&self) -> bool {
        self.start_minutes.is_some() && !self.course.days.trim().is_empty()
    }

    pub fn number(&self) -> &str {
        &self.course.course_number
    }
}

/// Entrada de `semesters.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterIndexEntry {
    pub data_file: String,
    pub display_title: String,
}

/// Semestre ya cargado: título y lista de cursos.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub display_title: String,
    pub courses: Vec<ScheduleCourse>,
}

/// Formatos aceptados para un archivo de semestre: el objeto completo o,
/// como lo escribe el conversor de planillas, sólo el arreglo de cursos.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SemesterFile {
    Bare(Vec<ScheduleCourse>),
    Titled {
        display_title: String,
        courses: Vec<ScheduleCourse>,
    },
}

impl SemesterFile {
    pub(crate) fn into_semester(self, fallback_title: &str) -> Semester {
        match self {
            SemesterFile::Titled { display_title, courses } => Semester { display_title, courses },
            SemesterFile::Bare(courses) => Semester {
                display_title: fallback_title.to_string(),
                courses,
            },
        }
    }
}

// --- helpers de deserialización tolerante ---

const MINUTES_PER_DAY: u32 = 24 * 60;
// Las planillas exportadas mezclan strings, números y null en la misma columna.

fn value_to_raw(v: Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn value_to_text(v: Value) -> Option<String> {
    let s = value_to_raw(v)?;
    let trimmed = s.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

/// Sin recortar: frecuencia y certeza se comparan por igualdad exacta con el
/// valor elegido en el dropdown, que sale de este mismo texto.
fn de_raw_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.and_then(value_to_raw).unwrap_or_default())
}

fn de_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.and_then(value_to_text).unwrap_or_default())
}

fn de_opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.and_then(value_to_text))
}

/// Duraciones fuera de un día (negativas, NaN o mayores a 24 h) se leen como 0.
fn de_minutes<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    let raw = match v {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    let minutes = raw
        .filter(|f| (0.0..=MINUTES_PER_DAY as f64).contains(f))
        .map(|f| f as u32);
    Ok(minutes.unwrap_or(0))
}

fn de_semester_codes<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeSet<String>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    let mut out = BTreeSet::new();
    match v {
        Some(Value::Array(items)) => {
            for item in items {
                if let Some(code) = value_to_text(item) {
                    out.insert(code);
                }
            }
        }
        Some(Value::String(s)) => {
            for tok in s.split(|c: char| c == ',' || c == ';' || c.is_whitespace()) {
                let tok = tok.trim();
                if !tok.is_empty() {
                    out.insert(tok.to_string());
                }
            }
        }
        _ => {}
    }
    Ok(out)
}
