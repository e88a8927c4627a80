use async_trait::async_trait;

use crate::domain::entities::envelope::{OffsetListing, PagedListing};
use crate::domain::entities::planet::{
    DiscoveryChart, HealthStatus, MethodCount, Planet, PlanetCount, PlanetId, PlanetStats,
    TimelinePoint,
};
use crate::domain::entities::query::QueryParams;

pub const PLANETS_PATH: &str = "/planets";
pub const STATS_PATH: &str = "/planets/stats";
pub const TIMELINE_PATH: &str = "/planets/timeline";
pub const METHOD_COUNTS_PATH: &str = "/planets/method-counts";
pub const COUNT_PATH: &str = "/planets/count";
pub const DISCOVERY_CHART_PATH: &str = "/vis/discovery";
pub const HEALTH_PATH: &str = "/system/health";

pub const UNAVAILABLE_MESSAGE: &str = "This data is unavailable right now. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed with HTTP {status}")]
    Status { status: u16 },
    #[error("network error: {0}")]
    Transport(String),
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    /// Status and transport failures look the same to the user.
    pub fn user_message(&self) -> &'static str {
        UNAVAILABLE_MESSAGE
    }
}

/// Read-only view of the remote planet service.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Base URL requests are resolved against.
    fn origin(&self) -> &str;

    async fn list_paged(&self, params: &QueryParams) -> Result<PagedListing<Planet>, ApiError>;
    async fn list_offset(&self, params: &QueryParams) -> Result<OffsetListing<Planet>, ApiError>;
    async fn stats(&self, params: &QueryParams) -> Result<PlanetStats, ApiError>;
    async fn timeline(&self) -> Result<Vec<TimelinePoint>, ApiError>;
    async fn method_counts(&self) -> Result<Vec<MethodCount>, ApiError>;
    async fn count(&self) -> Result<PlanetCount, ApiError>;
    async fn planet(&self, id: PlanetId) -> Result<Planet, ApiError>;
    async fn planet_by_name(&self, name: &str) -> Result<Planet, ApiError>;
    async fn discovery_chart(&self, params: &QueryParams) -> Result<DiscoveryChart, ApiError>;
    async fn health(&self) -> Result<HealthStatus, ApiError>;
}
