//! OMDb API client library.
//!
//! Looks up movies by title or IMDb ID, searches by term and downloads
//! poster images from the OMDb service. Each operation performs a single
//! HTTP request; service-reported failures surface as [`ApiError`].

mod api;
mod client;
mod error;
mod params;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalOmdbApi, OmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{OmdbClient, OmdbClientBuilder};
pub use error::{ApiError, OmdbError, Result};
pub use params::{ApiParam, MediaType, PlotLength};
pub use types::{MovieInfo, Poster, Rating, SearchInfo, SearchResult};
