use crate::catalog::{self, Movie};
use std::sync::mpsc::{self, Receiver};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://ghibliapi.vercel.app/films";

pub const LOAD_FAILURE_MESSAGE: &str = "Erro ao carregar os filmes do Studio Ghibli";
pub const CONNECTIVITY_HINT: &str = "Verifique sua conexão com internet";

/// Why a catalog load failed.
///
/// The variants only reach the log. Users always see
/// [`LOAD_FAILURE_MESSAGE`] and [`CONNECTIVITY_HINT`].
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP error: {status}")]
    Status { status: u16 },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed catalog payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CatalogError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> &'static str {
        LOAD_FAILURE_MESSAGE
    }

    /// Get the hint shown under the error message
    pub fn recovery_hint(&self) -> &'static str {
        CONNECTIVITY_HINT
    }
}

/// Outcome of a catalog load, sent from the fetch task to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogMessage {
    Loaded(Vec<Movie>),
    /// Carries no detail on purpose; the cause was already logged.
    Failed,
}

/// HTTP client for the film catalog endpoint.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    endpoint: String,
}

impl CatalogClient {
    /// Build a client with reqwest defaults: no timeout, no extra headers.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, CatalogError> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch, decode and normalize the catalog.
    ///
    /// Any non-2xx status fails without reading the body.
    pub async fn fetch_catalog(&self) -> Result<Vec<Movie>, CatalogError> {
        tracing::info!(endpoint = %self.endpoint, "fetching catalog");

        let response = self.http.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let films = catalog::decode_films(&body)?;
        let received = films.len();
        let movies = catalog::normalize_catalog(films);

        tracing::info!(received, kept = movies.len(), "catalog loaded");
        Ok(movies)
    }

    /// Run one load and collapse the result into a [`CatalogMessage`].
    pub async fn load(&self) -> CatalogMessage {
        match self.fetch_catalog().await {
            Ok(movies) => CatalogMessage::Loaded(movies),
            Err(e) => {
                tracing::error!(error = %e, endpoint = %self.endpoint, "catalog load failed");
                CatalogMessage::Failed
            }
        }
    }

    /// Spawn the single load on the tokio runtime.
    ///
    /// The returned receiver yields exactly one message. If it has been
    /// dropped by the time the request finishes, the result is discarded.
    pub fn spawn_load(self) -> Receiver<CatalogMessage> {
        let (tx, rx) = mpsc::channel();
        tokio::spawn(async move {
            let message = self.load().await;
            if tx.send(message).is_err() {
                tracing::debug!("catalog screen closed before the load finished");
            }
        });
        rx
    }
}
