//! OMDb API response types.
//!
//! Field names follow the upstream JSON exactly; every record serializes
//! back to the same names it was decoded from. Absent fields decode to
//! empty strings.

use serde::{Deserialize, Serialize};

// --- Lookup ---

/// Response from a title (`t`) or IMDb ID (`i`) lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MovieInfo {
    /// Title.
    pub title: String,
    /// Release year, or a year range for series (e.g. `2008–2013`).
    pub year: String,
    /// MPAA rating (e.g. `R`, `PG-13`).
    pub rated: String,
    /// Release date (e.g. `14 Oct 1994`).
    pub released: String,
    /// Runtime (e.g. `142 min`).
    pub runtime: String,
    /// Comma-separated genres.
    pub genre: String,
    /// Comma-separated directors.
    pub director: String,
    /// Comma-separated writers.
    pub writer: String,
    /// Comma-separated lead actors.
    pub actors: String,
    /// Plot summary (short or full depending on the `plot` parameter).
    pub plot: String,
    /// Comma-separated languages.
    pub language: String,
    /// Comma-separated countries.
    pub country: String,
    /// Awards summary.
    pub awards: String,
    /// Poster image URL.
    pub poster: String,
    /// Ratings from individual sources.
    pub ratings: Vec<Rating>,
    /// Metacritic score.
    pub metascore: String,
    /// IMDb rating (e.g. `9.3`).
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
    /// IMDb vote count (e.g. `2,914,414`).
    #[serde(rename = "imdbVotes")]
    pub imdb_votes: String,
    /// IMDb ID.
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    /// Media type (`movie`, `series`, `episode`).
    #[serde(rename = "Type")]
    pub media_type: String,
    /// DVD release date.
    #[serde(rename = "DVD")]
    pub dvd: String,
    /// Box office gross.
    pub box_office: String,
    /// Production company.
    pub production: String,
    /// Official website.
    pub website: String,
    /// `"True"` on success.
    pub response: String,
}

/// A rating from a single source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Rating {
    /// Rating source (e.g. `Internet Movie Database`).
    pub source: String,
    /// Rating value as displayed by the source (e.g. `9.3/10`, `91%`).
    pub value: String,
}

// --- Search ---

/// Response from a search (`s`) query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchInfo {
    /// Matching titles.
    #[serde(rename = "Search")]
    pub search: Vec<SearchResult>,
    /// Total number of matches across all pages.
    #[serde(rename = "totalResults")]
    pub total_results: String,
    /// `"True"` on success.
    #[serde(rename = "Response")]
    pub response: String,
}

/// A single search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SearchResult {
    /// Title.
    pub title: String,
    /// Release year.
    pub year: String,
    /// IMDb ID.
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    /// Media type (`movie`, `series`, `episode`).
    #[serde(rename = "Type")]
    pub media_type: String,
    /// Poster image URL.
    pub poster: String,
}

// --- Poster ---

/// Raw poster image bytes from the poster endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Poster(Vec<u8>);

impl Poster {
    /// Returns the image bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the poster and returns the image bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Returns the image size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Poster {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Poster {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// --- Error envelope ---

/// Minimal shape used to detect a service-reported failure.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorEnvelope {
    /// `"False"` on failure.
    #[serde(rename = "Response")]
    pub response: String,
    /// Error message; non-empty on failure.
    #[serde(rename = "Error")]
    pub error: String,
}
