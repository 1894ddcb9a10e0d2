// Biblioteca raíz del crate `coursegrid`.
// Convierte los JSON estáticos de electivos y semestres en datos listos para
// dibujar: tablas filtradas, grilla de oferta y calendario semanal.
pub mod config;
pub mod datafiles;
pub mod electives;
pub mod error;
pub mod logging;
pub mod models;
pub mod schedule;

pub use config::Config;
pub use error::{LoadError, MalformedTimeError};
pub use electives::{ElectiveCatalog, ElectiveFilters, ElectivesPage};
pub use schedule::{ScheduleController, ScheduleView};
