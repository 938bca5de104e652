//! Log-based rendering of OMDb results.

use omdb_api::{MovieInfo, SearchInfo};

/// Logs a movie record.
pub fn log_movie(movie: &MovieInfo) {
    tracing::info!("{} ({})", movie.title, movie.year);
    tracing::info!("IMDb ID: {}", movie.imdb_id);
    tracing::info!(
        "Rated: {} | Runtime: {} | Genre: {}",
        movie.rated,
        movie.runtime,
        movie.genre
    );
    tracing::info!("Director: {}", movie.director);
    tracing::info!("Actors: {}", movie.actors);
    tracing::info!(
        "IMDb rating: {} ({} votes)",
        movie.imdb_rating,
        movie.imdb_votes
    );
    for rating in &movie.ratings {
        tracing::info!("  {}: {}", rating.source, rating.value);
    }
    tracing::info!("Plot: {}", movie.plot);
}

/// Logs search results, one line per title.
pub fn log_search(info: &SearchInfo) {
    tracing::info!("IMDb ID\t\tYear\tType\tTitle");
    for result in &info.search {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            result.imdb_id,
            result.year,
            result.media_type,
            result.title,
        );
    }
    tracing::info!("Total results: {}", info.total_results);
}
