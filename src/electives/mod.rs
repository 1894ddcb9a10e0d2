//! Motor de filtros de electivos.
//!
//! Flujo: cargar → derivar vocabularios (programa, frecuencia, certeza) →
//! filtrar (AND de los tres) → proyectar a tabla y a grilla de oferta.

pub mod grid;
pub mod table;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

use crate::config::Config;
use crate::datafiles::load_electives;
use crate::error::LoadError;
use crate::models::{Choice, ElectiveCourse};
use grid::OfferingGrid;
use table::ElectiveTable;

/// Mensaje que se muestra en la tabla cuando no se pudo cargar el dataset.
pub const LOAD_ERROR_MESSAGE: &str = "Error: Could not load electives data.";

/// Valores disponibles para cada selector, ordenados y sin repetidos.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElectiveVocabularies {
    pub programs: BTreeSet<String>,
    pub frequencies: BTreeSet<String>,
    pub certainties: BTreeSet<String>,
}

/// Selección actual de los tres dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectiveFilters {
    #[serde(default)]
    pub program: Choice,
    #[serde(default)]
    pub frequency: Choice,
    #[serde(default)]
    pub certainty: Choice,
}

pub fn derive_filter_vocabularies(courses: &[ElectiveCourse]) -> ElectiveVocabularies {
    let mut vocab = ElectiveVocabularies::default();
    for c in courses {
        for p in c.program.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            vocab.programs.insert(p.to_string());
        }
        if !c.offering_frequency.is_empty() {
            vocab.frequencies.insert(c.offering_frequency.clone());
        }
        if !c.certainty.is_empty() {
            vocab.certainties.insert(c.certainty.clone());
        }
    }
    vocab
}

/// Programa: coincidencia por substring sobre el texto crudo ("Elect" calza
/// con "Mechanical;Electrical"). Frecuencia y certeza: igualdad exacta.
pub fn matches_filters(course: &ElectiveCourse, filters: &ElectiveFilters) -> bool {
    let program_match = match filters.program.value() {
        None => true,
        Some(p) => !course.program.is_empty() && course.program.contains(p),
    };
    let frequency_match = match filters.frequency.value() {
        None => true,
        Some(f) => course.offering_frequency == f,
    };
    let certainty_match = match filters.certainty.value() {
        None => true,
        Some(c) => course.certainty == c,
    };
    program_match && frequency_match && certainty_match
}

pub fn apply_filters(courses: &[ElectiveCourse], filters: &ElectiveFilters) -> Vec<ElectiveCourse> {
    let out: Vec<ElectiveCourse> = courses
        .iter()
        .filter(|c| matches_filters(c, filters))
        .cloned()
        .collect();
    debug!(
        program = %filters.program,
        frequency = %filters.frequency,
        certainty = %filters.certainty,
        matched = out.len(),
        total = courses.len(),
        "filtro de electivos aplicado"
    );
    out
}

/// Dataset cargado junto a sus vocabularios. Se reconstruye entero en cada carga.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElectiveCatalog {
    courses: Vec<ElectiveCourse>,
    vocabularies: ElectiveVocabularies,
}

impl ElectiveCatalog {
    pub fn new(courses: Vec<ElectiveCourse>) -> Self {
        let vocabularies = derive_filter_vocabularies(&courses);
        ElectiveCatalog { courses, vocabularies }
    }

    pub fn courses(&self) -> &[ElectiveCourse] {
        &self.courses
    }

    pub fn vocabularies(&self) -> &ElectiveVocabularies {
        &self.vocabularies
    }

    /// Vista completa para la capa de presentación.
    pub fn view(&self, filters: &ElectiveFilters, start_year: i32, years: u32) -> ElectivesView {
        let filtered = apply_filters(&self.courses, filters);
        ElectivesView {
            headers: table::HEADERS,
            vocabularies: self.vocabularies.clone(),
            filters: filters.clone(),
            table: table::project_rows(&filtered),
            grid: grid::build_offering_grid(&filtered, start_year, years),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElectivesView {
    pub headers: [&'static str; table::COLUMN_COUNT],
    pub vocabularies: ElectiveVocabularies,
    pub filters: ElectiveFilters,
    pub table: ElectiveTable,
    pub grid: OfferingGrid,
}

/// Resultado de la carga de la página de electivos: o el catálogo, o un
/// mensaje de error para mostrar en línea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElectivesPage {
    Ready(ElectiveCatalog),
    Failed { message: String },
}

impl ElectivesPage {
    pub fn from_load(result: Result<Vec<ElectiveCourse>, LoadError>) -> Self {
        match result {
            Ok(courses) => ElectivesPage::Ready(ElectiveCatalog::new(courses)),
            Err(e) => {
                warn!(path = %e.path().display(), error = %e, "no se pudo cargar el dataset de electivos");
                ElectivesPage::Failed { message: LOAD_ERROR_MESSAGE.to_string() }
            }
        }
    }

    /// Carga el dataset desde disco; nunca falla, el error queda como estado.
    pub async fn load<P: AsRef<Path>>(path: P) -> Self {
        Self::from_load(load_electives(path).await)
    }

    /// Igual que `load`, con la ruta resuelta desde la configuración.
    pub async fn load_configured(config: &Config) -> Self {
        Self::load(config.electives_path()).await
    }

    /// Vista completa con la grilla a partir del año calendario actual.
    /// `None` si el dataset no cargó.
    pub fn current_view(&self, filters: &ElectiveFilters, config: &Config) -> Option<ElectivesView> {
        match self {
            ElectivesPage::Ready(catalog) => Some(catalog.view(filters, grid::current_year(), config.grid_years)),
            ElectivesPage::Failed { .. } => None,
        }
    }

    /// Tabla para los filtros dados. En estado de error devuelve la fila de error.
    pub fn table(&self, filters: &ElectiveFilters) -> ElectiveTable {
        match self {
            ElectivesPage::Ready(catalog) => table::project_rows(&apply_filters(catalog.courses(), filters)),
            ElectivesPage::Failed { message } => ElectiveTable::Error {
                message: message.clone(),
                colspan: table::COLUMN_COUNT,
            },
        }
    }
}
