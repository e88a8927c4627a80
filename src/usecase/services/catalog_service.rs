use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::envelope::{normalize, ResponseEnvelope, WireListing};
use crate::domain::entities::planet::{
    ChartRequest, DiscoveryChart, HealthStatus, MethodCount, Planet, PlanetCount, PlanetId,
    PlanetStats, TimelinePoint,
};
use crate::domain::entities::query::{CatalogQuery, ExplorerQuery, QueryKey, QueryParams};
use crate::usecase::ports::catalog::{
    ApiError, CatalogApi, COUNT_PATH, DISCOVERY_CHART_PATH, HEALTH_PATH, METHOD_COUNTS_PATH,
    STATS_PATH, TIMELINE_PATH,
};
use crate::usecase::services::query_builder::{
    build_chart_params, build_explorer_filter_params, OffsetContract, PagedContract, QueryBuilder,
};

/// Listing, aggregate statistics and method counts fetched as one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerSnapshot {
    pub listing: ResponseEnvelope<Planet>,
    pub stats: PlanetStats,
    pub method_counts: Vec<MethodCount>,
}

#[derive(Clone)]
pub struct CatalogService {
    api: Arc<dyn CatalogApi>,
}

impl PartialEq for CatalogService {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.api, &other.api)
    }
}

impl CatalogService {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }

    pub fn origin(&self) -> &str {
        self.api.origin()
    }

    fn key(&self, path: &str, params: &QueryParams) -> QueryKey {
        QueryKey::new(self.origin(), path, params)
    }

    pub fn listing_key(&self, query: &CatalogQuery) -> QueryKey {
        self.key(PagedContract::PATH, &PagedContract::build(query))
    }

    pub async fn browse(&self, query: &CatalogQuery) -> Result<ResponseEnvelope<Planet>, ApiError> {
        let params = PagedContract::build(query);
        let listing = self.api.list_paged(&params).await?;
        Ok(normalize(WireListing::Paged(listing)))
    }

    pub fn explorer_key(&self, query: &ExplorerQuery) -> QueryKey {
        self.key(OffsetContract::PATH, &OffsetContract::build(query))
    }

    /// Issues the three requests concurrently. Any failure fails the whole
    /// snapshot and the partial results are dropped.
    pub async fn explore(&self, query: &ExplorerQuery) -> Result<ExplorerSnapshot, ApiError> {
        let listing_params = OffsetContract::build(query);
        let stats_params = build_explorer_filter_params(&query.filters);

        let joined = tokio::try_join!(
            self.api.list_offset(&listing_params),
            self.api.stats(&stats_params),
            self.api.method_counts(),
        );

        match joined {
            Ok((listing, stats, method_counts)) => Ok(ExplorerSnapshot {
                listing: normalize(WireListing::Offset(listing)),
                stats,
                method_counts,
            }),
            Err(err) => {
                if !err.is_cancelled() {
                    warn!(error = %err, "explorer batch failed");
                }
                Err(err)
            }
        }
    }

    pub fn stats_key(&self) -> QueryKey {
        self.key(STATS_PATH, &QueryParams::new())
    }

    pub async fn stats(&self) -> Result<PlanetStats, ApiError> {
        self.api.stats(&QueryParams::new()).await
    }

    pub fn timeline_key(&self) -> QueryKey {
        self.key(TIMELINE_PATH, &QueryParams::new())
    }

    /// Discovery counts per year, oldest first.
    pub async fn timeline(&self) -> Result<Vec<TimelinePoint>, ApiError> {
        let mut points = self.api.timeline().await?;
        points.sort_by_key(|point| point.disc_year);
        Ok(points)
    }

    pub fn method_counts_key(&self) -> QueryKey {
        self.key(METHOD_COUNTS_PATH, &QueryParams::new())
    }

    /// Discovery counts per method, largest first.
    pub async fn method_counts(&self) -> Result<Vec<MethodCount>, ApiError> {
        let mut counts = self.api.method_counts().await?;
        counts.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.disc_method.cmp(&b.disc_method))
        });
        Ok(counts)
    }

    pub fn count_key(&self) -> QueryKey {
        self.key(COUNT_PATH, &QueryParams::new())
    }

    pub async fn count(&self) -> Result<PlanetCount, ApiError> {
        self.api.count().await
    }

    pub fn planet_key(&self, id: PlanetId) -> QueryKey {
        self.key(&format!("/planets/{}", id.0), &QueryParams::new())
    }

    pub async fn planet(&self, id: PlanetId) -> Result<Planet, ApiError> {
        self.api.planet(id).await
    }

    pub fn planet_by_name_key(&self, name: &str) -> QueryKey {
        self.key(
            &format!("/planets/by-name/{}", name.trim()),
            &QueryParams::new(),
        )
    }

    pub async fn planet_by_name(&self, name: &str) -> Result<Planet, ApiError> {
        self.api.planet_by_name(name).await
    }

    pub fn discovery_chart_key(&self, request: &ChartRequest) -> QueryKey {
        self.key(DISCOVERY_CHART_PATH, &build_chart_params(request))
    }

    pub async fn discovery_chart(&self, request: &ChartRequest) -> Result<DiscoveryChart, ApiError> {
        self.api.discovery_chart(&build_chart_params(request)).await
    }

    pub fn health_key(&self) -> QueryKey {
        self.key(HEALTH_PATH, &QueryParams::new())
    }

    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let status = self.api.health().await?;
        info!(origin = self.origin(), status = %status.status, "health check");
        Ok(status)
    }
}
