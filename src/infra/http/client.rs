use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::entities::query::QueryParams;
use crate::usecase::ports::catalog::ApiError;

/// GET + JSON against one base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|err| ApiError::InvalidUrl(format!("{base_url}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!(
                "{base_url}: cannot be used as a base"
            )));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves `path` below the base URL. Segments are percent-encoded and
    /// empty-text parameters are dropped.
    pub fn build_url(&self, path: &str, params: &QueryParams) -> Result<Url, ApiError> {
        let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();
        self.build_url_from_segments(&segments, params)
    }

    pub fn build_url_from_segments(
        &self,
        segments: &[&str],
        params: &QueryParams,
    ) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ApiError::InvalidUrl(format!("{}: cannot be used as a base", self.base_url))
            })?;
            path.pop_if_empty();
            path.extend(segments);
        }
        url.set_query(None);
        let mut pairs = params.pairs().peekable();
        if pairs.peek().is_some() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<T, ApiError> {
        let url = self.build_url(path, params)?;
        self.get_url(url).await
    }

    pub async fn get_segments<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &QueryParams,
    ) -> Result<T, ApiError> {
        let url = self.build_url_from_segments(segments, params)?;
        self.get_url(url).await
    }

    async fn get_url<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await.map_err(|err| {
            warn!(%url, error = %err, "request failed");
            ApiError::Transport(err.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "request returned an error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|err| {
            warn!(%url, error = %err, "response body did not match the expected shape");
            ApiError::Decode(err.to_string())
        })
    }
}
