use async_trait::async_trait;

use crate::domain::entities::envelope::{OffsetListing, PagedListing};
use crate::domain::entities::planet::{
    DiscoveryChart, HealthStatus, MethodCount, Planet, PlanetCount, PlanetId, PlanetStats,
    TimelinePoint,
};
use crate::domain::entities::query::QueryParams;
use crate::infra::http::client::HttpClient;
use crate::usecase::ports::catalog::{
    ApiError, CatalogApi, COUNT_PATH, DISCOVERY_CHART_PATH, HEALTH_PATH, METHOD_COUNTS_PATH,
    PLANETS_PATH, STATS_PATH, TIMELINE_PATH,
};

pub struct HttpCatalog {
    client: HttpClient,
    origin: String,
}

impl HttpCatalog {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self::from_client(HttpClient::new(base_url)?))
    }

    pub fn from_client(client: HttpClient) -> Self {
        let origin = client.base_url().as_str().trim_end_matches('/').to_string();
        Self { client, origin }
    }
}

#[async_trait]
impl CatalogApi for HttpCatalog {
    fn origin(&self) -> &str {
        &self.origin
    }

    async fn list_paged(&self, params: &QueryParams) -> Result<PagedListing<Planet>, ApiError> {
        self.client.get(PLANETS_PATH, params).await
    }

    async fn list_offset(&self, params: &QueryParams) -> Result<OffsetListing<Planet>, ApiError> {
        self.client.get(PLANETS_PATH, params).await
    }

    async fn stats(&self, params: &QueryParams) -> Result<PlanetStats, ApiError> {
        self.client.get(STATS_PATH, params).await
    }

    async fn timeline(&self) -> Result<Vec<TimelinePoint>, ApiError> {
        self.client.get(TIMELINE_PATH, &QueryParams::new()).await
    }

    async fn method_counts(&self) -> Result<Vec<MethodCount>, ApiError> {
        self.client
            .get(METHOD_COUNTS_PATH, &QueryParams::new())
            .await
    }

    async fn count(&self) -> Result<PlanetCount, ApiError> {
        self.client.get(COUNT_PATH, &QueryParams::new()).await
    }

    async fn planet(&self, id: PlanetId) -> Result<Planet, ApiError> {
        let id = id.0.to_string();
        self.client
            .get_segments(&["planets", id.as_str()], &QueryParams::new())
            .await
    }

    async fn planet_by_name(&self, name: &str) -> Result<Planet, ApiError> {
        self.client
            .get_segments(&["planets", "by-name", name.trim()], &QueryParams::new())
            .await
    }

    async fn discovery_chart(&self, params: &QueryParams) -> Result<DiscoveryChart, ApiError> {
        self.client.get(DISCOVERY_CHART_PATH, params).await
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.client.get(HEALTH_PATH, &QueryParams::new()).await
    }
}
