use crate::cli::{actions::Action, commands, dispatch, telemetry};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Map verbosity count to tracing level
const fn get_verbosity_level(verbosity: u8) -> Option<tracing::Level> {
    match verbosity {
        0 => None,
        1 => Some(tracing::Level::WARN),
        2 => Some(tracing::Level::INFO),
        3 => Some(tracing::Level::DEBUG),
        _ => Some(tracing::Level::TRACE),
    }
}

/// Accept a loaded or absent `.env`; any other failure (unreadable file, bad line) is an error.
fn dotenv_loaded(result: Result<PathBuf, dotenvy::Error>) -> Result<Option<PathBuf>> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(err).context("Failed to load .env"),
    }
}

/// Main entry point for the CLI - builds and returns the Action
///
/// # Errors
///
/// Returns an error if argument parsing, telemetry initialization, or action dispatch fails
pub fn start() -> Result<Action> {
    // 1. Load `.env` if present, real environment variables win
    let dotenv_path = dotenv_loaded(dotenvy::dotenv())?;

    // 2. Parse command-line arguments
    let matches = commands::new().get_matches();

    // 3. Initialize telemetry
    telemetry::init(get_verbosity_level(
        matches
            .get_one::<u8>(commands::ARG_VERBOSITY)
            .copied()
            .unwrap_or(0),
    ))?;

    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    // 4. Dispatch to appropriate action
    dispatch::handler(&matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_verbosity_level() {
        assert_eq!(get_verbosity_level(0), None);
        assert_eq!(get_verbosity_level(1), Some(tracing::Level::WARN));
        assert_eq!(get_verbosity_level(2), Some(tracing::Level::INFO));
        assert_eq!(get_verbosity_level(3), Some(tracing::Level::DEBUG));
        assert_eq!(get_verbosity_level(4), Some(tracing::Level::TRACE));
        assert_eq!(get_verbosity_level(5), Some(tracing::Level::TRACE));
    }

    #[test]
    fn test_dotenv_missing_file_is_ignored() {
        let missing = dotenvy::Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no .env",
        ));
        assert!(matches!(dotenv_loaded(Err(missing)), Ok(None)));
    }

    #[test]
    fn test_dotenv_loaded_path() {
        let loaded = dotenv_loaded(Ok(PathBuf::from("/srv/tglogin/.env")));
        assert!(matches!(loaded, Ok(Some(path)) if path == PathBuf::from("/srv/tglogin/.env")));
    }

    #[test]
    fn test_dotenv_malformed_file_is_reported() {
        let malformed = dotenvy::Error::LineParse("TGLOGIN_BOT_TOKEN='abc".to_string(), 18);
        let err = dotenv_loaded(Err(malformed)).err().map(|e| format!("{e:#}"));
        assert!(err.is_some_and(|e| e.starts_with("Failed to load .env")));

        let denied = dotenvy::Error::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(dotenv_loaded(Err(denied)).is_err());
    }
}
