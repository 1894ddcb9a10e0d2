//! Tipos de error del crate.
//!
//! Ningún error escala a un fallo del proceso: `LoadError` se transforma en un
//! estado de error visible en la vista y `MalformedTimeError` degrada el curso
//! a "no programable".

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fallo al leer o parsear un archivo de datos (electivos, índice o semestre).
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("no se pudo leer '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON inválido en '{}': {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Io { path, .. } | LoadError::Parse { path, .. } => path,
        }
    }
}

/// El texto de hora no calza con `H:MM AM|PM`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("hora '{raw}' no calza con el formato H:MM AM|PM")]
pub struct MalformedTimeError {
    pub raw: String,
}
