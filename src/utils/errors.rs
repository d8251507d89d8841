#![forbid(unsafe_code)]

use poem_openapi::Object;
use thiserror::Error;

/// Error enumerates the errors returned by this application.
#[derive(Error, Debug)]
pub enum Errors {
    /// Input parameter logging.
    #[error("album_server input parameters:\n{}", .0)]
    InputParms(String),

    /// Unusable logger configuration file.
    #[error("Unable to initialize logging from the Log4rs configuration file: {}", .0)]
    Log4rsInitialization(String),

    #[error("Reading application configuration file: {}", .0)]
    ReadingConfigFile(String),

    #[error("Unable to parse TOML file: {}", .0)]
    TOMLParseError(String),

    #[error("Unable to listen on {}: {}", .0, .1)]
    ListenerBind(String, String),

    #[error("album not found")]
    AlbumNotFound,

    #[error("Invalid album request: {}", .0)]
    MalformedInput(String),
}

// ---------------------------------------------------------------------------
// HttpResult:
// ---------------------------------------------------------------------------
/// Body of every non-2xx album response.
#[derive(Object, Debug, Clone, PartialEq)]
pub struct HttpResult {
    pub message: String,
}

impl HttpResult {
    pub fn new(message: String) -> Self {
        Self {message}
    }
}

impl From<&Errors> for HttpResult {
    fn from(err: &Errors) -> Self {
        Self::new(err.to_string())
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message() {
        let result = HttpResult::from(&Errors::AlbumNotFound);
        assert_eq!(result.message, "album not found");
    }

    #[test]
    fn malformed_input_message() {
        let err = Errors::MalformedInput("missing field `price`".to_string());
        assert_eq!(err.to_string(), "Invalid album request: missing field `price`");
    }
}
