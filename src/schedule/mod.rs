// Motor de filtros y layout del calendario semanal.
//
// Flujo: cargar semestre → normalizar horas → vocabularios → filtros con
// precedencia → partición programable / no programable → ubicación por día.
pub mod color;
pub mod controller;
pub mod filters;
pub mod layout;
pub mod time;
pub mod vocab;

pub use controller::{LoadOutcome, LoadTicket, ScheduleController, ScheduleSnapshot, ScheduleView};
pub use filters::{ActiveFilter, FilterState};
