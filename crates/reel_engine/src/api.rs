use reel_core::{
    non_placeholder, parse_rating, parse_runtime_minutes, MovieDetail, MovieId, MovieSummary,
};
use reel_logging::reel_debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::{ApiConfig, FetchError};

/// Remote movie database as seen by the controllers.
#[async_trait::async_trait]
pub trait MovieApi: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, FetchError>;

    async fn detail(&self, id: &MovieId) -> Result<MovieDetail, FetchError>;
}

/// `MovieApi` over the OMDb HTTP+JSON interface.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    config: ApiConfig,
    client: reqwest::Client,
}

impl OmdbClient {
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| FetchError::Network(err.to_string()))?;
        Ok(Self { config, client })
    }

    fn endpoint(&self, param: (&str, &str)) -> Result<Url, FetchError> {
        Url::parse_with_params(
            &self.config.base_url,
            [("apikey", self.config.api_key.as_str()), param],
        )
        .map_err(|err| FetchError::Network(format!("invalid base url: {err}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&body).map_err(|err| FetchError::Decode(err.to_string()))
    }
}

#[async_trait::async_trait]
impl MovieApi for OmdbClient {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, FetchError> {
        reel_debug!("search request query={:?}", query);
        let envelope: SearchEnvelope = self.get_json(self.endpoint(("s", query))?).await?;
        if !envelope.is_success() {
            reel_debug!(
                "search for {:?} returned nothing: {}",
                query,
                envelope.error.as_deref().unwrap_or("no reason given")
            );
            return Err(FetchError::NoResults);
        }
        Ok(envelope.search.into_iter().map(MovieSummary::from).collect())
    }

    async fn detail(&self, id: &MovieId) -> Result<MovieDetail, FetchError> {
        reel_debug!("detail request id={}", id);
        let record: DetailRecord = self.get_json(self.endpoint(("i", id.as_str()))?).await?;
        if !is_true(&record.response) {
            return Err(FetchError::NotFound(
                record.error.unwrap_or_else(|| id.to_string()),
            ));
        }
        Ok(record.into_detail(id))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::Timeout;
    }
    FetchError::Network(err.to_string())
}

fn is_true(flag: &str) -> bool {
    flag.eq_ignore_ascii_case("true")
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<SearchRecord>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl SearchEnvelope {
    fn is_success(&self) -> bool {
        is_true(&self.response)
    }
}

#[derive(Debug, Deserialize)]
struct SearchRecord {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
}

impl From<SearchRecord> for MovieSummary {
    fn from(record: SearchRecord) -> Self {
        MovieSummary {
            id: MovieId::new(record.imdb_id),
            title: record.title,
            year: record.year,
            poster: non_placeholder(&record.poster),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DetailRecord {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "imdbRating", default)]
    rating: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Released", default)]
    released: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Genre", default)]
    genre: String,
}

impl DetailRecord {
    fn into_detail(self, requested: &MovieId) -> MovieDetail {
        MovieDetail {
            id: self
                .imdb_id
                .map(MovieId::new)
                .unwrap_or_else(|| requested.clone()),
            runtime_minutes: parse_runtime_minutes(&self.runtime),
            rating: parse_rating(&self.rating),
            poster: non_placeholder(&self.poster),
            title: self.title,
            year: self.year,
            plot: self.plot,
            released: self.released,
            actors: self.actors,
            director: self.director,
            genre: self.genre,
        }
    }
}
