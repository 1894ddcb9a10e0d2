//! Controlador del calendario: dueño del snapshot del semestre y del estado
//! de filtros. Cada carga o reset reconstruye el snapshot completo; nunca se
//! mezcla información de dos semestres.
//!
//! Las cargas usan un contador de generación (`LoadTicket`): si el usuario
//! cambia de semestre antes de que termine una carga lenta, la respuesta vieja
//! se descarta en vez de pisar la selección nueva.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::config::Config;
use crate::datafiles;
use crate::error::LoadError;
use crate::models::{Choice, ScheduledCourse, Semester, SemesterIndexEntry};
use crate::schedule::color::build_color_map;
use crate::schedule::filters::FilterState;
use crate::schedule::layout::{
    archive_entries, default_columns, legend, partition, place_courses, CalendarWindow, DayColumn, DaySchedule,
    Metrics,
};
use crate::schedule::time::normalize_courses;
use crate::schedule::vocab::{derive_vocabularies, ScheduleVocabularies};

pub const TITLE_SUFFIX: &str = "CH-EN Course Schedule";

/// Datos derivados de un semestre cargado. Inmutable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleSnapshot {
    display_title: String,
    courses: Vec<ScheduledCourse>,
    vocabularies: ScheduleVocabularies,
    colors: BTreeMap<String, String>,
}

impl ScheduleSnapshot {
    pub fn from_semester(semester: Semester) -> Self {
        let courses = normalize_courses(semester.courses);
        let vocabularies = derive_vocabularies(&courses);
        let colors = build_color_map(&courses);
        ScheduleSnapshot {
            display_title: semester.display_title,
            courses,
            vocabularies,
            colors,
        }
    }

    pub fn display_title(&self) -> &str {
        &self.display_title
    }

    pub fn page_title(&self) -> String {
        format!("{} — {}", self.display_title, TITLE_SUFFIX)
    }

    pub fn courses(&self) -> &[ScheduledCourse] {
        &self.courses
    }

    pub fn vocabularies(&self) -> &ScheduleVocabularies {
        &self.vocabularies
    }

    pub fn colors(&self) -> &BTreeMap<String, String> {
        &self.colors
    }
}

/// Ficha entregada al iniciar una carga; sólo la más reciente se aplica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// Llegó después de una carga más nueva; se descartó
    Stale,
    /// La carga falló; el snapshot anterior se mantiene
    Failed(String),
}

/// Todo lo que la capa de presentación necesita para dibujar el calendario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleView {
    pub title: String,
    pub vocabularies: ScheduleVocabularies,
    pub filters: FilterState,
    pub hour_labels: Vec<String>,
    pub days: Vec<DaySchedule>,
    pub legend: Vec<String>,
    pub metrics: Metrics,
    pub archive: Vec<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ScheduleController {
    config: Config,
    columns: Vec<DayColumn>,
    index: Vec<SemesterIndexEntry>,
    snapshot: ScheduleSnapshot,
    filters: FilterState,
    generation: u64,
    error: Option<String>,
}

impl ScheduleController {
    pub fn new(config: Config) -> Self {
        ScheduleController {
            config,
            columns: default_columns(),
            index: Vec::new(),
            snapshot: ScheduleSnapshot::default(),
            filters: FilterState::new(),
            generation: 0,
            error: None,
        }
    }

    pub fn with_columns(mut self, columns: Vec<DayColumn>) -> Self {
        self.columns = columns;
        self
    }

    pub fn snapshot(&self) -> &ScheduleSnapshot {
        &self.snapshot
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn index(&self) -> &[SemesterIndexEntry] {
        &self.index
    }

    pub fn window(&self) -> CalendarWindow {
        CalendarWindow {
            start_hour: self.config.start_hour,
            end_hour: self.config.end_hour,
        }
    }

    // --- carga ---

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    /// Aplica el resultado de una carga si su ficha sigue vigente.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Semester, LoadError>) -> LoadOutcome {
        if ticket.0 != self.generation {
            warn!(ticket = ticket.0, current = self.generation, "carga de semestre obsoleta descartada");
            return LoadOutcome::Stale;
        }
        match result {
            Ok(semester) => {
                self.snapshot = ScheduleSnapshot::from_semester(semester);
                self.filters = FilterState::new();
                self.error = None;
                info!(
                    title = %self.snapshot.display_title,
                    courses = self.snapshot.courses.len(),
                    "semestre aplicado"
                );
                LoadOutcome::Applied
            }
            Err(e) => {
                warn!(path = %e.path().display(), error = %e, "error cargando datos del semestre");
                let message = format!("Error loading schedule data: {}", e);
                self.error = Some(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }

    /// Carga el semestre descrito por una entrada del índice.
    pub async fn select_semester(&mut self, entry: &SemesterIndexEntry) -> LoadOutcome {
        let ticket = self.begin_load();
        let path = self.config.resolve(&entry.data_file);
        let result = datafiles::load_semester(&path, &entry.display_title).await;
        self.finish_load(ticket, result)
    }

    /// Lee el índice de semestres y carga el primero, como al abrir la página.
    pub async fn load_index(&mut self) -> Result<Option<LoadOutcome>, LoadError> {
        self.index = datafiles::load_semester_index(self.config.semesters_index_path()).await?;
        let Some(first) = self.index.first().cloned() else {
            warn!("índice de semestres vacío");
            return Ok(None);
        };
        Ok(Some(self.select_semester(&first).await))
    }

    // --- eventos de filtros ---

    pub fn select_instructor(&mut self, value: &str) {
        self.filters.select_instructor(Choice::from(value), &self.snapshot.courses);
    }

    pub fn select_location(&mut self, value: &str) {
        self.filters.select_location(Choice::from(value), &self.snapshot.courses);
    }

    pub fn set_type_checked(&mut self, type_name: &str, checked: bool) {
        self.filters.set_type_checked(type_name, checked, &self.snapshot.courses);
    }

    pub fn set_course_checked(&mut self, course_number: &str, checked: bool) {
        self.filters.set_course_checked(course_number, checked);
    }

    pub fn show_all_chen(&mut self) {
        self.filters.show_all_chen(&self.snapshot.courses);
    }

    /// Limpia los filtros y reconstruye los vocabularios desde los cursos actuales.
    pub fn reset(&mut self) {
        let semester = Semester {
            display_title: self.snapshot.display_title.clone(),
            courses: self.snapshot.courses.iter().map(|c| c.course.clone()).collect(),
        };
        self.snapshot = ScheduleSnapshot::from_semester(semester);
        self.filters.reset();
    }

    // --- vista ---

    pub fn filtered(&self) -> Vec<&ScheduledCourse> {
        self.filters.apply(&self.snapshot.courses)
    }

    pub fn view(&self) -> ScheduleView {
        let filtered = self.filtered();
        let parts = partition(&filtered);
        let window = self.window();
        ScheduleView {
            title: self.snapshot.page_title(),
            vocabularies: self.snapshot.vocabularies.clone(),
            filters: self.filters.clone(),
            hour_labels: window.hour_labels(),
            days: place_courses(&parts.schedulable, &self.columns, &self.snapshot.colors, window),
            legend: legend(&filtered),
            metrics: parts.metrics(),
            archive: archive_entries(&parts.unschedulable),
            error: self.error.clone(),
        }
    }
}
