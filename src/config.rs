//! Configuración del sitio: rutas de los JSON estáticos y ventana del calendario.
//!
//! Se lee desde variables de entorno (con `.env` si existe):
//! - `COURSEGRID_SITE_ROOT`: raíz contra la que se resuelven las rutas (default `.`)
//! - `COURSEGRID_ELECTIVES_FILE`: dataset de electivos (default `electives.json`)
//! - `COURSEGRID_SEMESTERS_INDEX`: índice de semestres (default `data/semesters.json`)
//! - `COURSEGRID_START_HOUR` / `COURSEGRID_END_HOUR`: horas visibles (default 7 y 20)
//! - `COURSEGRID_GRID_YEARS`: años académicos de la grilla de oferta (default 5)

use std::env;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_START_HOUR: u32 = 7;
pub const DEFAULT_END_HOUR: u32 = 20;
pub const DEFAULT_GRID_YEARS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub site_root: PathBuf,
    pub electives_file: String,
    pub semesters_index: String,
    pub start_hour: u32,
    pub end_hour: u32,
    pub grid_years: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            site_root: PathBuf::from("."),
            electives_file: "electives.json".to_string(),
            semesters_index: "data/semesters.json".to_string(),
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
            grid_years: DEFAULT_GRID_YEARS,
        }
    }
}

// load .env if present
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

impl Config {
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración desde una función de búsqueda arbitraria
    /// (inyectable en tests sin tocar el entorno del proceso).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let text = |key: &str, default: String| -> String {
            match lookup(key) {
                Some(v) if !v.trim().is_empty() => v.trim().to_string(),
                _ => default,
            }
        };
        let number = |key: &str, default: u32| -> u32 {
            match lookup(key) {
                Some(v) => match v.trim().parse::<u32>() {
                    Ok(n) => n,
                    Err(_) => {
                        warn!(key, value = %v, "valor numérico inválido, usando default {}", default);
                        default
                    }
                },
                None => default,
            }
        };

        let mut cfg = Config {
            site_root: PathBuf::from(text("COURSEGRID_SITE_ROOT", ".".to_string())),
            electives_file: text("COURSEGRID_ELECTIVES_FILE", defaults.electives_file),
            semesters_index: text("COURSEGRID_SEMESTERS_INDEX", defaults.semesters_index),
            start_hour: number("COURSEGRID_START_HOUR", DEFAULT_START_HOUR),
            end_hour: number("COURSEGRID_END_HOUR", DEFAULT_END_HOUR),
            grid_years: number("COURSEGRID_GRID_YEARS", DEFAULT_GRID_YEARS),
        };

        if cfg.start_hour >= cfg.end_hour || cfg.end_hour > 23 {
            warn!(
                start = cfg.start_hour,
                end = cfg.end_hour,
                "ventana horaria inválida, usando {}-{}",
                DEFAULT_START_HOUR,
                DEFAULT_END_HOUR
            );
            cfg.start_hour = DEFAULT_START_HOUR;
            cfg.end_hour = DEFAULT_END_HOUR;
        }
        cfg
    }

    /// Resuelve un archivo de datos contra `site_root` (las rutas absolutas se respetan).
    pub fn resolve(&self, file: &str) -> PathBuf {
        let p = Path::new(file);
        if p.is_absolute() { p.to_path_buf() } else { self.site_root.join(p) }
    }

    pub fn electives_path(&self) -> PathBuf {
        self.resolve(&self.electives_file)
    }

    pub fn semesters_index_path(&self) -> PathBuf {
        self.resolve(&self.semesters_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let cfg = Config::from_lookup(|_| None);
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.semesters_index_path(), PathBuf::from("./data/semesters.json"));
    }

    #[test]
    fn test_overrides_and_invalid_numbers() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("COURSEGRID_SITE_ROOT", "/srv/site"),
            ("COURSEGRID_START_HOUR", "8"),
            ("COURSEGRID_GRID_YEARS", "cinco"),
        ]));
        assert_eq!(cfg.site_root, PathBuf::from("/srv/site"));
        assert_eq!(cfg.start_hour, 8);
        assert_eq!(cfg.grid_years, DEFAULT_GRID_YEARS);
        assert_eq!(cfg.electives_path(), PathBuf::from("/srv/site/electives.json"));
        assert_eq!(cfg.resolve("/tmp/fa25.json"), PathBuf::from("/tmp/fa25.json"));
    }

    #[test]
    fn test_inverted_window_falls_back() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("COURSEGRID_START_HOUR", "18"),
            ("COURSEGRID_END_HOUR", "9"),
        ]));
        assert_eq!((cfg.start_hour, cfg.end_hour), (DEFAULT_START_HOUR, DEFAULT_END_HOUR));
    }
}
