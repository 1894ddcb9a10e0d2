//! Lectura de los JSON estáticos (electivos, índice de semestres y semestres).
//!
//! Todas las funciones son async (tokio::fs) y devuelven `LoadError` con la
//! ruta involucrada; quien llama decide cómo mostrar el fallo.

use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info};

use crate::error::LoadError;
use crate::models::{ElectiveCourse, Semester, SemesterFile, SemesterIndexEntry};

/// Lee y deserializa un archivo JSON.
pub async fn read_json<T, P>(path: P) -> Result<T, LoadError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    debug!(path = %path.display(), "leyendo datafile");
    let s = tokio::fs::read_to_string(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&s).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Carga el dataset de electivos.
pub async fn load_electives<P: AsRef<Path>>(path: P) -> Result<Vec<ElectiveCourse>, LoadError> {
    let courses: Vec<ElectiveCourse> = read_json(path.as_ref()).await?;
    info!(count = courses.len(), "electivos cargados");
    Ok(courses)
}

/// Carga `semesters.json`: lista ordenada de `{data_file, display_title}`.
pub async fn load_semester_index<P: AsRef<Path>>(path: P) -> Result<Vec<SemesterIndexEntry>, LoadError> {
    let entries: Vec<SemesterIndexEntry> = read_json(path.as_ref()).await?;
    info!(count = entries.len(), "índice de semestres cargado");
    Ok(entries)
}

/// Carga un archivo de semestre. Si el archivo es sólo el arreglo de cursos
/// se usa `fallback_title` (normalmente el `display_title` del índice).
pub async fn load_semester<P: AsRef<Path>>(path: P, fallback_title: &str) -> Result<Semester, LoadError> {
    let file: SemesterFile = read_json(path.as_ref()).await?;
    let semester = file.into_semester(fallback_title);
    info!(
        title = %semester.display_title,
        count = semester.courses.len(),
        "semestre cargado"
    );
    Ok(semester)
}

/// Versión síncrona sobre un string ya leído (útil en tests y para datos embebidos).
pub fn parse_semester(json_str: &str, fallback_title: &str) -> Result<Semester, serde_json::Error> {
    let file: SemesterFile = serde_json::from_str(json_str)?;
    Ok(file.into_semester(fallback_title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_semester_titled() {
        let mut f = tempfile::NamedTempFile::new().expect("create tmp file");
        let json = r#"
        {
            "display_title": "Fall 2025",
            "courses": [
                { "course_number": "CHEN 3353", "days": "MWF", "time": "9:00 AM", "duration": 50 }
            ]
        }
        "#;
        f.write_all(json.as_bytes()).expect("write test json");

        let sem = load_semester(f.path(), "ignored").await.expect("load semester");
        assert_eq!(sem.display_title, "Fall 2025");
        assert_eq!(sem.courses.len(), 1);
        assert_eq!(sem.courses[0].course_number, "CHEN 3353");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let missing = dir.path().join("nope.json");
        match load_electives(&missing).await {
            Err(LoadError::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("se esperaba LoadError::Io, obtuvo {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let mut f = tempfile::NamedTempFile::new().expect("create tmp file");
        f.write_all(b"{ not json").expect("write");
        let err = load_semester_index(f.path()).await.expect_err("debe fallar");
        assert!(matches!(err, LoadError::Parse { .. }));
        assert_eq!(err.path(), f.path());
        assert!(err.to_string().contains(&f.path().display().to_string()));
    }

    #[test]
    fn test_parse_semester_bare_array() {
        let sem = parse_semester(r#"[{"course_number": "CH 101"}]"#, "Spring 2026").expect("parse");
        assert_eq!(sem.display_title, "Spring 2026");
    }
}
