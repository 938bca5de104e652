//! omdb - OMDb movie metadata CLI.

/// Application configuration (TOML).
mod config;
/// Result rendering.
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};
use crate::output::{log_movie, log_search};
use omdb_api::{ApiParam, LocalOmdbApi, MediaType, OmdbClient, PlotLength};

/// Environment variable consulted before the config file for the API key.
const API_KEY_ENV: &str = "OMDB_API_KEY";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Look up a movie by title.
    Title(TitleArgs),
    /// Look up a movie by IMDb ID.
    Id(IdArgs),
    /// Search for movies by title.
    Search(SearchArgs),
    /// Download a poster image.
    Poster(PosterArgs),
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Media type filter.
#[derive(Clone, Copy, ValueEnum)]
enum TypeArg {
    /// Feature films.
    Movie,
    /// TV series.
    Series,
    /// Single episodes.
    Episode,
}

impl From<TypeArg> for MediaType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Movie => Self::Movie,
            TypeArg::Series => Self::Series,
            TypeArg::Episode => Self::Episode,
        }
    }
}

/// Plot length.
#[derive(Clone, Copy, ValueEnum)]
enum PlotArg {
    /// Short plot.
    Short,
    /// Full plot.
    Full,
}

impl From<PlotArg> for PlotLength {
    fn from(arg: PlotArg) -> Self {
        match arg {
            PlotArg::Short => Self::Short,
            PlotArg::Full => Self::Full,
        }
    }
}

/// Filters shared by lookups and searches.
#[derive(clap::Args)]
struct FilterArgs {
    /// Release year.
    #[arg(long)]
    year: Option<u16>,

    /// Media type.
    #[arg(long = "type", value_enum)]
    media_type: Option<TypeArg>,

    /// Extra query parameter as `name=value` (repeatable).
    #[arg(long = "param", value_parser = parse_param)]
    params: Vec<ApiParam>,
}

/// Arguments for the `title` subcommand.
#[derive(clap::Args)]
struct TitleArgs {
    /// Movie title (e.g. "The Godfather").
    #[arg(long, required = true)]
    title: String,

    /// Plot length.
    #[arg(long, value_enum)]
    plot: Option<PlotArg>,

    #[command(flatten)]
    filters: FilterArgs,
}

/// Arguments for the `id` subcommand.
#[derive(clap::Args)]
struct IdArgs {
    /// IMDb ID (e.g. "tt0068646").
    #[arg(long, required = true)]
    id: String,

    /// Plot length.
    #[arg(long, value_enum)]
    plot: Option<PlotArg>,

    #[command(flatten)]
    filters: FilterArgs,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search term (e.g. "Shawshank").
    #[arg(long, required = true)]
    query: String,

    #[command(flatten)]
    filters: FilterArgs,
}

/// Arguments for the `poster` subcommand.
#[derive(clap::Args)]
struct PosterArgs {
    /// IMDb ID of the movie.
    #[arg(long, conflicts_with = "title", required_unless_present = "title")]
    id: Option<String>,

    /// Title of the movie.
    #[arg(long)]
    title: Option<String>,

    /// Output file for the image.
    #[arg(long, short, required = true)]
    output: PathBuf,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Store the API key in the config file.
    SetKey(SetKeyArgs),
    /// Show the config file location and whether a key is stored.
    Show,
}

/// Arguments for the `config set-key` subcommand.
#[derive(clap::Args)]
struct SetKeyArgs {
    /// OMDb API key.
    #[arg(long, required = true)]
    key: String,
}

/// Parses a `name=value` query parameter.
fn parse_param(raw: &str) -> std::result::Result<ApiParam, String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok(ApiParam::new(name, value)),
        _ => Err(format!("expected name=value, got '{raw}'")),
    }
}

/// Collects query parameters in precedence order: typed filters, then
/// `--param` entries, so an explicit `--param` overrides a typed flag.
fn collect_params(filters: &FilterArgs, plot: Option<PlotArg>) -> Vec<ApiParam> {
    let mut params = Vec::new();
    if let Some(year) = filters.year {
        params.push(ApiParam::year(year));
    }
    if let Some(media_type) = filters.media_type {
        params.push(ApiParam::media_type(media_type.into()));
    }
    if let Some(plot) = plot {
        params.push(ApiParam::plot(plot.into()));
    }
    params.extend(filters.params.iter().cloned());
    params
}

/// Resolves the API key from `OMDB_API_KEY` or the config file.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or no key is found.
fn resolve_api_key(dir: Option<&PathBuf>) -> Result<String> {
    if let Ok(key) = std::env::var(API_KEY_ENV)
        && !key.is_empty()
    {
        return Ok(key);
    }

    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    config.api_key().map(String::from).with_context(|| {
        format!(
            "OMDb API key is required: set {API_KEY_ENV} or run `omdb config set-key` ({})",
            config_path.display()
        )
    })
}

/// Builds an `OmdbClient` with the resolved API key.
///
/// # Errors
///
/// Returns an error if no API key is available or the client fails to build.
#[instrument(skip_all)]
fn build_omdb_client(dir: Option<&PathBuf>) -> Result<OmdbClient> {
    let api_key = resolve_api_key(dir)?;

    OmdbClient::builder()
        .api_key(api_key)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build OMDb client")
}

/// Runs the `title` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_title(args: &TitleArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_omdb_client(dir)?;
    let params = collect_params(&args.filters, args.plot);

    let movie = client
        .title(&args.title, &params)
        .await
        .context("OMDb title lookup failed")?;

    log_movie(&movie);
    Ok(())
}

/// Runs the `id` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_id(args: &IdArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_omdb_client(dir)?;
    let params = collect_params(&args.filters, args.plot);

    let movie = client
        .id(&args.id, &params)
        .await
        .context("OMDb ID lookup failed")?;

    log_movie(&movie);
    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_omdb_client(dir)?;
    let params = collect_params(&args.filters, None);

    let info = client
        .search(&args.query, &params)
        .await
        .context("OMDb search failed")?;

    log_search(&info);
    Ok(())
}

/// Runs the `poster` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build, the download fails,
/// or the image cannot be written.
#[instrument(skip_all)]
async fn run_poster(args: &PosterArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_omdb_client(dir)?;

    let poster = match (&args.id, &args.title) {
        (Some(id), _) => client.poster_by_id(id).await,
        (None, Some(title)) => client.poster_by_title(title).await,
        (None, None) => anyhow::bail!("either --id or --title must be specified"),
    }
    .context("OMDb poster download failed")?;

    std::fs::write(&args.output, poster.as_bytes())
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    tracing::info!(
        "Saved poster ({} bytes) to {}",
        poster.len(),
        args.output.display()
    );
    Ok(())
}

/// Runs the `config set-key` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or saved.
#[instrument(skip_all)]
fn run_config_set_key(args: &SetKeyArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let mut config = AppConfig::load(&config_path).context("failed to load config")?;
    config.omdb.api_key = Some(args.key.clone());
    config.save(&config_path).context("failed to save config")?;
    tracing::info!("Saved API key to {}", config_path.display());
    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded.
#[instrument(skip_all)]
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    tracing::info!("Config file: {}", config_path.display());
    if config.api_key().is_some() {
        tracing::info!("API key: configured");
    } else {
        tracing::info!("API key: not configured");
    }
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Title(args) => run_title(&args, dir).await,
        Commands::Id(args) => run_id(&args, dir).await,
        Commands::Search(args) => run_search(&args, dir).await,
        Commands::Poster(args) => run_poster(&args, dir).await,
        Commands::Config(cfg) => match cfg.command {
            ConfigSubcommands::SetKey(args) => run_config_set_key(&args, dir),
            ConfigSubcommands::Show => run_config_show(dir),
        },
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_parse_param_splits_on_first_equals() {
        // Arrange & Act
        let param = parse_param("r=json=x").unwrap();

        // Assert
        assert_eq!(param, ApiParam::new("r", "json=x"));
    }

    #[test]
    fn test_parse_param_allows_empty_value() {
        // Arrange & Act
        let param = parse_param("season=").unwrap();

        // Assert
        assert_eq!(param, ApiParam::new("season", ""));
    }

    #[test]
    fn test_parse_param_rejects_missing_name_or_separator() {
        // Arrange & Act & Assert
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=value").is_err());
    }

    #[test]
    fn test_collect_params_explicit_param_comes_last() {
        // Arrange
        let filters = FilterArgs {
            year: Some(1972),
            media_type: Some(TypeArg::Movie),
            params: vec![ApiParam::new("y", "1974")],
        };

        // Act
        let params = collect_params(&filters, Some(PlotArg::Full));

        // Assert
        assert_eq!(
            params,
            vec![
                ApiParam::year(1972),
                ApiParam::media_type(MediaType::Movie),
                ApiParam::plot(PlotLength::Full),
                ApiParam::new("y", "1974"),
            ]
        );
    }

    #[test]
    fn test_collect_params_empty() {
        // Arrange
        let filters = FilterArgs {
            year: None,
            media_type: None,
            params: Vec::new(),
        };

        // Act & Assert
        assert!(collect_params(&filters, None).is_empty());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
