/// Logging backend.
///
/// The renderer owns stdout, so records go to a file through env_logger's
/// pipe target. `RUST_LOG` (when set) overrides the configured level.
/// With no log file configured nothing is installed and every `log` macro
/// is a no-op.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

use crate::error::AppError;

pub fn init(log_file: Option<&Path>, level: LevelFilter) -> Result<(), AppError> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .map_err(|source| AppError::LogFile { path: path.to_path_buf(), source })?;

    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .parse_env(Env::default())
        .format(|buf, record| {
            writeln!(buf, "[{} {:<5} {}] {}", buf.timestamp_millis(), record.level(), record.target(), record.args())
        })
        .target(Target::Pipe(Box::new(file)));

    // A second init (tests, embedding) keeps the first logger.
    if builder.try_init().is_err() {
        log::debug!("logger already installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_file_means_no_logger_and_no_error() {
        assert!(init(None, LevelFilter::Info).is_ok());
    }

    #[test]
    fn unwritable_path_is_reported() {
        let err = init(Some(Path::new("/nonexistent-dir/for/sure/vq.log")), LevelFilter::Info);
        assert!(matches!(err, Err(AppError::LogFile { .. })));
    }
}
