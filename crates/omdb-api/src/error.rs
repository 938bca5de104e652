//! Error types for OMDb API calls.

use reqwest::StatusCode;
use thiserror::Error;

/// Upstream message returned when the `apikey` parameter is missing.
const NO_API_KEY: &str = "No API key provided.";

/// Upstream message returned for an unknown API key.
const INVALID_API_KEY: &str = "Invalid API key!";

/// Upstream message returned when a title or search term matches nothing.
const MOVIE_NOT_FOUND: &str = "Movie not found!";

/// Upstream message returned for a malformed IMDb ID.
const INCORRECT_IMDB_ID: &str = "Incorrect IMDb ID.";

/// Errors reported by the OMDb service in the `Error` field of its response.
///
/// `Display` reproduces the upstream message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum ApiError {
    /// The request carried no `apikey` parameter.
    #[error("No API key provided.")]
    NoApiKey,
    /// The API key is unknown or revoked.
    #[error("Invalid API key!")]
    InvalidApiKey,
    /// No movie matched the title or search term.
    #[error("Movie not found!")]
    MovieNotFound,
    /// The identifier is not a valid IMDb ID.
    #[error("Incorrect IMDb ID.")]
    IncorrectImdbId,
    /// Any other message, passed through unchanged.
    #[error("{0}")]
    Other(String),
}

impl ApiError {
    /// Classifies an upstream error message.
    ///
    /// Known messages map to their dedicated variant; anything else is kept
    /// as [`ApiError::Other`].
    #[must_use]
    pub fn from_message(message: &str) -> Self {
        match message {
            NO_API_KEY => Self::NoApiKey,
            INVALID_API_KEY => Self::InvalidApiKey,
            MOVIE_NOT_FOUND => Self::MovieNotFound,
            INCORRECT_IMDB_ID => Self::IncorrectImdbId,
            other => Self::Other(String::from(other)),
        }
    }

    /// Returns the upstream message for this error.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::NoApiKey => NO_API_KEY,
            Self::InvalidApiKey => INVALID_API_KEY,
            Self::MovieNotFound => MOVIE_NOT_FOUND,
            Self::IncorrectImdbId => INCORRECT_IMDB_ID,
            Self::Other(message) => message.as_str(),
        }
    }
}

/// Errors returned by [`OmdbClient`](crate::OmdbClient) operations.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum OmdbError {
    /// The request could not be sent or the body could not be read.
    ///
    /// The request URL is stripped before wrapping, since it carries the
    /// API key.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The poster endpoint answered with a non-success status.
    #[error("{status}")]
    HttpStatus {
        /// Status returned by the server.
        status: StatusCode,
    },

    /// The response body was not the expected JSON.
    #[error("failed to decode JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The service reported an error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A base URL could not be parsed.
    ///
    /// Caller-supplied URLs arrive already parsed, so only the built-in
    /// default endpoints go through `Url::parse`; this variant carries `?`
    /// on that call.
    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// A required builder field was not set.
    #[error("{0} is required")]
    MissingField(&'static str),
}

impl OmdbError {
    /// Wraps a transport failure with the request URL removed.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }

    /// Returns the service-reported error, if this is one.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// Result alias for OMDb client operations.
pub type Result<T> = std::result::Result<T, OmdbError>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_from_message_known_literals() {
        // Arrange & Act & Assert
        assert_eq!(
            ApiError::from_message("No API key provided."),
            ApiError::NoApiKey
        );
        assert_eq!(
            ApiError::from_message("Invalid API key!"),
            ApiError::InvalidApiKey
        );
        assert_eq!(
            ApiError::from_message("Movie not found!"),
            ApiError::MovieNotFound
        );
        assert_eq!(
            ApiError::from_message("Incorrect IMDb ID."),
            ApiError::IncorrectImdbId
        );
    }

    #[test]
    fn test_from_message_unknown_passes_through() {
        // Arrange
        let message = "Request limit reached!";

        // Act
        let err = ApiError::from_message(message);

        // Assert
        assert_eq!(err, ApiError::Other(String::from(message)));
        assert_eq!(err.to_string(), message);
    }

    #[test]
    fn test_from_message_is_case_sensitive() {
        // Arrange & Act
        let err = ApiError::from_message("movie not found!");

        // Assert
        assert_eq!(err, ApiError::Other(String::from("movie not found!")));
    }

    #[test]
    fn test_display_matches_upstream_message() {
        for err in [
            ApiError::NoApiKey,
            ApiError::InvalidApiKey,
            ApiError::MovieNotFound,
            ApiError::IncorrectImdbId,
        ] {
            assert_eq!(err.to_string(), err.message());
            assert_eq!(ApiError::from_message(err.message()), err);
        }
    }

    #[test]
    fn test_omdb_error_api_display_is_transparent() {
        // Arrange
        let err = OmdbError::from(ApiError::InvalidApiKey);

        // Act & Assert
        assert_eq!(err.to_string(), "Invalid API key!");
        assert_eq!(err.api_error(), Some(&ApiError::InvalidApiKey));
    }

    #[test]
    fn test_http_status_display_is_status_text() {
        // Arrange
        let err = OmdbError::HttpStatus {
            status: StatusCode::SERVICE_UNAVAILABLE,
        };

        // Act & Assert
        assert_eq!(err.to_string(), "503 Service Unavailable");
        assert!(err.api_error().is_none());
    }

    #[test]
    fn test_invalid_url_display() {
        // Arrange
        let parse_err = url::Url::parse("not a url").unwrap_err();

        // Act
        let err = OmdbError::from(parse_err);

        // Assert
        assert!(err.to_string().starts_with("invalid base URL: "));
    }

    #[test]
    fn test_missing_field_display() {
        // Arrange & Act
        let err = OmdbError::MissingField("api_key");

        // Assert
        assert_eq!(err.to_string(), "api_key is required");
    }
}
