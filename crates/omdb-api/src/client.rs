//! `OmdbClient` - OMDb API client implementation.

use std::fmt;

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::instrument;
use url::Url;

use crate::api::LocalOmdbApi;
use crate::error::{ApiError, OmdbError, Result};
use crate::params::{ApiParam, ID_PARAM, SEARCH_PARAM, TITLE_PARAM, build_request_url};
use crate::types::{ErrorEnvelope, MovieInfo, Poster, SearchInfo};

/// Default base URL for the metadata endpoint.
const DEFAULT_MOVIE_URL: &str = "https://www.omdbapi.com";

/// Default base URL for the poster endpoint.
const DEFAULT_POSTER_URL: &str = "https://img.omdbapi.com";

/// Default User-Agent sent when no HTTP client is supplied.
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// OMDb API client.
///
/// Holds no mutable state; share it freely between callers.
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL of the metadata endpoint.
    movie_url: Url,
    /// Base URL of the poster endpoint.
    poster_url: Url,
    /// API key sent as `apikey`.
    api_key: String,
}

impl fmt::Debug for OmdbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OmdbClient")
            .field("movie_url", &self.movie_url.as_str())
            .field("poster_url", &self.poster_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Builder for `OmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClientBuilder {
    api_key: Option<String>,
    movie_url: Option<Url>,
    poster_url: Option<Url>,
    user_agent: Option<String>,
    http_client: Option<Client>,
}

impl OmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            api_key: None,
            movie_url: None,
            poster_url: None,
            user_agent: None,
            http_client: None,
        }
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the metadata endpoint URL (for wiremock in tests).
    #[must_use]
    pub fn movie_url(mut self, url: Url) -> Self {
        self.movie_url = Some(url);
        self
    }

    /// Overrides the poster endpoint URL (for wiremock in tests).
    #[must_use]
    pub fn poster_url(mut self, url: Url) -> Self {
        self.poster_url = Some(url);
        self
    }

    /// Sets the User-Agent (default: `omdb-api/<version>`).
    ///
    /// Ignored when an HTTP client is supplied via [`Self::http_client`].
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Uses a preconfigured HTTP client, e.g. one with a request timeout.
    #[must_use]
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set.
    /// - A default base URL fails to parse.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<OmdbClient> {
        let api_key = self.api_key.ok_or(OmdbError::MissingField("api_key"))?;

        let movie_url = match self.movie_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_MOVIE_URL)?,
        };
        let poster_url = match self.poster_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_POSTER_URL)?,
        };

        let http_client = if let Some(client) = self.http_client {
            client
        } else {
            let user_agent = self
                .user_agent
                .unwrap_or_else(|| String::from(DEFAULT_USER_AGENT));
            Client::builder()
                .user_agent(user_agent)
                .gzip(true)
                .build()
                .map_err(OmdbError::ClientBuild)?
        };

        Ok(OmdbClient {
            http_client,
            movie_url,
            poster_url,
            api_key,
        })
    }
}

impl OmdbClient {
    /// Creates a client for the public OMDb endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> OmdbClientBuilder {
        OmdbClientBuilder::new()
    }

    /// Returns the API key this client was built with.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sends a GET request to `base` with the API key and `params` applied.
    async fn send(&self, base: &Url, params: &[ApiParam]) -> Result<Response> {
        let url = build_request_url(base, &self.api_key, params);
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        tracing::debug!(endpoint = %base, params = ?names, "OMDb API request");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(OmdbError::transport)?;
        tracing::debug!(status = %response.status(), "OMDb API response");
        Ok(response)
    }

    /// Queries the metadata endpoint and decodes the body into `T`.
    ///
    /// The error envelope is checked before decoding, whatever the HTTP
    /// status.
    async fn get_json<T: DeserializeOwned>(&self, params: &[ApiParam]) -> Result<T> {
        let response = self.send(&self.movie_url, params).await?;
        let body = response.bytes().await.map_err(OmdbError::transport)?;
        let document = parse_object(&body)?;
        check_error_envelope(&document)?;
        Ok(serde_json::from_value(document)?)
    }

    /// Queries the poster endpoint. HTTP 404 becomes `not_found`.
    async fn get_poster(&self, param: ApiParam, not_found: ApiError) -> Result<Poster> {
        let response = self
            .send(&self.poster_url, std::slice::from_ref(&param))
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(not_found.into());
        }
        if !status.is_success() {
            return Err(OmdbError::HttpStatus { status });
        }

        let body = response.bytes().await.map_err(OmdbError::transport)?;
        Ok(Poster::from(body.to_vec()))
    }
}

/// Appends the primary lookup parameter after the caller's parameters.
fn with_primary(params: &[ApiParam], name: &str, value: &str) -> Vec<ApiParam> {
    let mut all = Vec::with_capacity(params.len().saturating_add(1));
    all.extend_from_slice(params);
    all.push(ApiParam::new(name, value));
    all
}

/// Parses a metadata body, which must be a JSON object.
fn parse_object(body: &[u8]) -> Result<Value> {
    let object: Map<String, Value> = serde_json::from_slice(body)?;
    Ok(Value::Object(object))
}

/// Fails with the service-reported error if the document carries one.
fn check_error_envelope(document: &Value) -> Result<()> {
    let envelope = ErrorEnvelope::deserialize(document)?;
    if envelope.error.is_empty() {
        return Ok(());
    }
    tracing::debug!(
        response = %envelope.response,
        error = %envelope.error,
        "OMDb API reported an error"
    );
    Err(ApiError::from_message(&envelope.error).into())
}

impl LocalOmdbApi for OmdbClient {
    #[instrument(skip_all)]
    async fn title(&self, title: &str, params: &[ApiParam]) -> Result<MovieInfo> {
        self.get_json(&with_primary(params, TITLE_PARAM, title))
            .await
    }

    #[instrument(skip_all)]
    async fn id(&self, id: &str, params: &[ApiParam]) -> Result<MovieInfo> {
        self.get_json(&with_primary(params, ID_PARAM, id)).await
    }

    #[instrument(skip_all)]
    async fn search(&self, term: &str, params: &[ApiParam]) -> Result<SearchInfo> {
        self.get_json(&with_primary(params, SEARCH_PARAM, term))
            .await
    }

    #[instrument(skip_all)]
    async fn poster_by_id(&self, id: &str) -> Result<Poster> {
        self.get_poster(ApiParam::new(ID_PARAM, id), ApiError::IncorrectImdbId)
            .await
    }

    #[instrument(skip_all)]
    async fn poster_by_title(&self, title: &str) -> Result<Poster> {
        self.get_poster(ApiParam::new(TITLE_PARAM, title), ApiError::MovieNotFound)
            .await
    }
}
