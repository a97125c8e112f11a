//! This module provides observability and diagnostics for smoothpack.
//!
//! Kernels log through the `log` facade; nothing is printed unless the host
//! application (or [`enable_verbose_logging`]) installs a logger. The
//! `log_metric!` macro emits structured key/value lines and is compiled out of
//! release builds.

use log::LevelFilter;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Once;

use crate::error::SmoothpackError;

/// Logs a structured key-value metric string at debug level, only in debug builds.
///
/// # Example
/// ```
/// use smoothpack::log_metric;
/// let rows = 128;
/// log_metric!("event"="pack_series", "rows"=&rows);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            // Collect each pair as a JSON string fragment
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+

            $crate::__log::debug!("SMOOTHPACK_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}

static INIT_LOGGER: Once = Once::new();

/// Installs an `env_logger` at `Debug` level, writing `[LEVEL] message` lines to
/// stderr or, when `log_file` is given, appending to that file.
///
/// Only the first call installs a logger; later calls are no-ops. If another
/// logger was already installed by the host application it is left in place.
pub fn enable_verbose_logging(log_file: Option<&Path>) -> Result<(), SmoothpackError> {
    // Open the file up front so failures surface as an error, not a panic.
    let file = match log_file {
        Some(path) => Some(OpenOptions::new().append(true).create(true).open(path)?),
        None => None,
    };

    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Debug);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_verbose_logging_is_idempotent() {
        assert!(enable_verbose_logging(None).is_ok());
        assert!(enable_verbose_logging(None).is_ok());
        log_metric!("event" = "observability_test", "value" = 42);
    }

    #[test]
    fn test_unopenable_log_file_is_an_io_error() {
        let path = Path::new("/nonexistent-smoothpack-dir/log.txt");
        assert!(matches!(
            enable_verbose_logging(Some(path)),
            Err(SmoothpackError::Io(_))
        ));
    }
}
