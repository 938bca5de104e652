//! OMDb API request parameter types.

use std::collections::BTreeMap;
use std::fmt;

use url::Url;

/// Query parameter carrying the API key.
pub(crate) const API_KEY_PARAM: &str = "apikey";

/// Query parameter for a title lookup.
pub(crate) const TITLE_PARAM: &str = "t";

/// Query parameter for an IMDb ID lookup.
pub(crate) const ID_PARAM: &str = "i";

/// Query parameter for a search term.
pub(crate) const SEARCH_PARAM: &str = "s";

/// A single query parameter passed to the OMDb API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiParam {
    /// Parameter name (e.g. `y`, `plot`).
    pub name: String,
    /// Parameter value.
    pub value: String,
}

impl ApiParam {
    /// Creates a parameter from an arbitrary name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Restricts results to a release year (`y`).
    #[must_use]
    pub fn year(year: u16) -> Self {
        Self::new("y", year.to_string())
    }

    /// Restricts results to a media type (`type`).
    #[must_use]
    pub fn media_type(media_type: MediaType) -> Self {
        Self::new("type", media_type.as_str())
    }

    /// Selects the plot length returned by lookups (`plot`).
    #[must_use]
    pub fn plot(plot: PlotLength) -> Self {
        Self::new("plot", plot.as_str())
    }
}

/// Media type filter accepted by the `type` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    /// Feature films.
    Movie,
    /// TV series.
    Series,
    /// Single episodes of a series.
    Episode,
}

impl MediaType {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
            Self::Episode => "episode",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plot length accepted by the `plot` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotLength {
    /// One or two sentences (service default).
    #[default]
    Short,
    /// The full plot summary.
    Full,
}

impl PlotLength {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for PlotLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the request URL for `base` with the API key and `params` applied.
///
/// Parameters are set by name on top of any query already present on
/// `base`: `apikey` first, then `params` in order, so a later parameter
/// overwrites an earlier one with the same name. The resulting query is
/// sorted by name.
#[must_use]
pub(crate) fn build_request_url(base: &Url, api_key: &str, params: &[ApiParam]) -> Url {
    let mut query: BTreeMap<String, String> = base.query_pairs().into_owned().collect();
    query.insert(String::from(API_KEY_PARAM), String::from(api_key));
    for param in params {
        query.insert(param.name.clone(), param.value.clone());
    }

    let mut url = base.clone();
    url.query_pairs_mut().clear().extend_pairs(&query);
    url
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn query_of(url: &Url) -> Vec<(String, String)> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn test_build_request_url_sets_api_key() {
        // Arrange
        let base = Url::parse("https://www.omdbapi.com").unwrap();

        // Act
        let url = build_request_url(&base, "secret", &[]);

        // Assert
        assert_eq!(url.as_str(), "https://www.omdbapi.com/?apikey=secret");
    }

    #[test]
    fn test_build_request_url_later_params_win() {
        // Arrange
        let base = Url::parse("https://www.omdbapi.com").unwrap();
        let params = [
            ApiParam::new("t", "Alien"),
            ApiParam::year(1979),
            ApiParam::new("t", "The Godfather"),
        ];

        // Act
        let url = build_request_url(&base, "secret", &params);

        // Assert
        assert_eq!(
            query_of(&url),
            vec![
                (String::from("apikey"), String::from("secret")),
                (String::from("t"), String::from("The Godfather")),
                (String::from("y"), String::from("1979")),
            ]
        );
    }

    #[test]
    fn test_build_request_url_params_override_api_key() {
        // Arrange
        let base = Url::parse("https://www.omdbapi.com").unwrap();
        let params = [ApiParam::new("apikey", "override")];

        // Act
        let url = build_request_url(&base, "secret", &params);

        // Assert
        assert_eq!(
            query_of(&url),
            vec![(String::from("apikey"), String::from("override"))]
        );
    }

    #[test]
    fn test_build_request_url_keeps_base_query() {
        // Arrange
        let base = Url::parse("http://127.0.0.1:8080/api?r=json&apikey=stale").unwrap();

        // Act
        let url = build_request_url(&base, "fresh", &[ApiParam::new("i", "tt0111161")]);

        // Assert
        assert_eq!(url.path(), "/api");
        assert_eq!(
            query_of(&url),
            vec![
                (String::from("apikey"), String::from("fresh")),
                (String::from("i"), String::from("tt0111161")),
                (String::from("r"), String::from("json")),
            ]
        );
    }

    #[test]
    fn test_build_request_url_encodes_values() {
        // Arrange
        let base = Url::parse("https://www.omdbapi.com").unwrap();

        // Act
        let url = build_request_url(
            &base,
            "k",
            &[ApiParam::new("t", "The Good, the Bad and the Ugly")],
        );

        // Assert
        assert_eq!(
            url.query(),
            Some("apikey=k&t=The+Good%2C+the+Bad+and+the+Ugly")
        );
    }

    #[test]
    fn test_typed_params() {
        // Arrange & Act & Assert
        assert_eq!(ApiParam::year(2023), ApiParam::new("y", "2023"));
        assert_eq!(
            ApiParam::media_type(MediaType::Series),
            ApiParam::new("type", "series")
        );
        assert_eq!(
            ApiParam::plot(PlotLength::Full),
            ApiParam::new("plot", "full")
        );
        assert_eq!(PlotLength::default(), PlotLength::Short);
        assert_eq!(MediaType::Episode.to_string(), "episode");
    }
}
