/// Error types.
///
/// Losing a mini-game is never an error: wrong guesses, misses and timeouts
/// are ordinary game state. These enums cover the host around the game:
/// reading config, opening the log file, and talking to the terminal.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config.toml parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),

    #[error("could not open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
