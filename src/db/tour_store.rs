use std::{
    collections::HashSet,
    fmt,
    path::PathBuf,
    sync::Arc,
    time::Duration,
};

use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use url::Url;

use crate::models::{destination::Destination, tour::Tour};

/// Where a JSON document comes from: a local file or an HTTP endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Remote(Url),
}

impl DataSource {
    /// `http://` and `https://` values are fetched remotely, anything else
    /// is read as a file path.
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => DataSource::Remote(url),
            _ => DataSource::File(PathBuf::from(raw.trim())),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "file {}", path.display()),
            DataSource::Remote(url) => write!(f, "{}", url),
        }
    }
}

#[derive(Debug)]
pub enum DataSourceError {
    Io(std::io::Error),
    Http(reqwest::Error),
    Status(reqwest::StatusCode),
    Parse(serde_json::Error),
}

impl fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceError::Io(err) => write!(f, "Read error: {}", err),
            DataSourceError::Http(err) => write!(f, "HTTP error: {}", err),
            DataSourceError::Status(status) => write!(f, "HTTP error! status: {}", status),
            DataSourceError::Parse(err) => write!(f, "Invalid JSON: {}", err),
        }
    }
}

impl std::error::Error for DataSourceError {}

impl From<std::io::Error> for DataSourceError {
    fn from(err: std::io::Error) -> Self {
        DataSourceError::Io(err)
    }
}

impl From<reqwest::Error> for DataSourceError {
    fn from(err: reqwest::Error) -> Self {
        DataSourceError::Http(err)
    }
}

impl From<serde_json::Error> for DataSourceError {
    fn from(err: serde_json::Error) -> Self {
        DataSourceError::Parse(err)
    }
}

/// Session cache over one JSON array document.
///
/// The lock is held for the whole load, so concurrent callers wait on a
/// single in-flight fetch. Failed loads are not cached.
struct JsonCache<T> {
    source: DataSource,
    client: Client,
    prepare: fn(Vec<T>) -> Vec<T>,
    cached: Mutex<Option<Arc<Vec<T>>>>,
}

impl<T: DeserializeOwned> JsonCache<T> {
    fn new(source: DataSource, timeout: Duration, prepare: fn(Vec<T>) -> Vec<T>) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            source,
            client,
            prepare,
            cached: Mutex::new(None),
        }
    }

    async fn load(&self) -> Result<Arc<Vec<T>>, DataSourceError> {
        let mut cached = self.cached.lock().await;
        if let Some(records) = cached.as_ref() {
            return Ok(records.clone());
        }

        let records = Arc::new((self.prepare)(self.fetch().await?));
        *cached = Some(records.clone());
        Ok(records)
    }

    async fn fetch(&self) -> Result<Vec<T>, DataSourceError> {
        log::debug!("Loading {}", self.source);
        match &self.source {
            DataSource::File(path) => {
                let raw = tokio::fs::read(path).await?;
                Ok(serde_json::from_slice(&raw)?)
            }
            DataSource::Remote(url) => {
                let response = self.client.get(url.clone()).send().await?;
                if !response.status().is_success() {
                    return Err(DataSourceError::Status(response.status()));
                }
                let raw = response.bytes().await?;
                Ok(serde_json::from_slice(&raw)?)
            }
        }
    }

    async fn clear(&self) {
        *self.cached.lock().await = None;
    }

    async fn is_cached(&self) -> bool {
        self.cached.lock().await.is_some()
    }
}

/// Drop records that would break id uniqueness or carry an invalid price
fn sanitize_tours(tours: Vec<Tour>) -> Vec<Tour> {
    let mut seen = HashSet::new();
    tours
        .into_iter()
        .filter(|tour| {
            if !(tour.price.is_finite() && tour.price >= 0.0) {
                log::warn!("Skipping tour {} with invalid price {}", tour.id, tour.price);
                return false;
            }
            if !seen.insert(tour.id) {
                log::warn!("Skipping duplicate tour id {}", tour.id);
                return false;
            }
            true
        })
        .collect()
}

fn keep_all<T>(records: Vec<T>) -> Vec<T> {
    records
}

pub struct TourRepository {
    cache: JsonCache<Tour>,
}

impl TourRepository {
    pub fn new(source: DataSource, timeout: Duration) -> Self {
        Self {
            cache: JsonCache::new(source, timeout, sanitize_tours),
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.cache.source
    }

    pub async fn try_all(&self) -> Result<Arc<Vec<Tour>>, DataSourceError> {
        self.cache.load().await
    }

    /// The whole catalog, or an empty one when the source can't be loaded
    pub async fn all(&self) -> Arc<Vec<Tour>> {
        match self.try_all().await {
            Ok(tours) => tours,
            Err(e) => {
                log::error!("Error loading tours from {}: {}", self.cache.source, e);
                Arc::new(Vec::new())
            }
        }
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    pub async fn is_cached(&self) -> bool {
        self.cache.is_cached().await
    }
}

pub struct DestinationRepository {
    cache: JsonCache<Destination>,
}

impl DestinationRepository {
    pub fn new(source: DataSource, timeout: Duration) -> Self {
        Self {
            cache: JsonCache::new(source, timeout, keep_all),
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.cache.source
    }

    pub async fn try_active(&self) -> Result<Vec<Destination>, DataSourceError> {
        let destinations = self.cache.load().await?;
        Ok(destinations
            .iter()
            .filter(|destination| destination.is_active())
            .cloned()
            .collect())
    }

    pub async fn active(&self) -> Vec<Destination> {
        match self.try_active().await {
            Ok(destinations) => destinations,
            Err(e) => {
                log::error!("Error loading destinations from {}: {}", self.cache.source, e);
                Vec::new()
            }
        }
    }

    /// Active destination by id; inactive ones are treated as missing
    pub async fn find(&self, id: u32) -> Option<Destination> {
        self.active()
            .await
            .into_iter()
            .find(|destination| destination.id == id)
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }
}
