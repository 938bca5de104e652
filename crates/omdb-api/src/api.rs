//! `OmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use crate::error::Result;
use crate::params::ApiParam;
use crate::types::{MovieInfo, Poster, SearchInfo};

/// OMDb API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
///
/// Every operation issues exactly one HTTP request.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(OmdbApi: Send)]
pub trait LocalOmdbApi {
    /// Looks up a movie by title (`t`).
    ///
    /// `params` are applied before the title, so a `t` entry in `params`
    /// is overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the body is not valid JSON,
    /// or the service reports an error (e.g. `Movie not found!`).
    async fn title(&self, title: &str, params: &[ApiParam]) -> Result<MovieInfo>;

    /// Looks up a movie by IMDb ID (`i`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the body is not valid JSON,
    /// or the service reports an error (e.g. `Incorrect IMDb ID.`).
    async fn id(&self, id: &str, params: &[ApiParam]) -> Result<MovieInfo>;

    /// Searches for movies matching a term (`s`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the body is not valid JSON,
    /// or the service reports an error (e.g. `Movie not found!`).
    async fn search(&self, term: &str, params: &[ApiParam]) -> Result<SearchInfo>;

    /// Downloads the poster image for an IMDb ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::IncorrectImdbId`](crate::ApiError::IncorrectImdbId)
    /// on HTTP 404, or the transport error for any other failure.
    async fn poster_by_id(&self, id: &str) -> Result<Poster>;

    /// Downloads the poster image for a title.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MovieNotFound`](crate::ApiError::MovieNotFound)
    /// on HTTP 404, or the transport error for any other failure.
    async fn poster_by_title(&self, title: &str) -> Result<Poster>;
}
