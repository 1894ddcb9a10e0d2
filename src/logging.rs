// Inicialización de logs (tracing + tracing-subscriber).

use tracing_subscriber::{fmt, EnvFilter};

/// Inicializa el subscriber global.
///
/// Honra `RUST_LOG` (por defecto `info`), p. ej. `RUST_LOG=coursegrid=debug`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Variante para tests: nivel debug y salida capturada por el harness.
/// Se puede llamar varias veces.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
