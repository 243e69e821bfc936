use super::types::*;
use crate::{Error, Result, config::ServiceConfig};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// The only network seam: one call per submission, no retries.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse>;
}

pub struct HttpAnalysisClient {
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl HttpAnalysisClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let endpoint = reqwest::Url::parse(&config.endpoint).map_err(|e| {
            Error::config(format!("Invalid service endpoint '{}': {}", config.endpoint, e))
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        debug!("Creating analysis client for: {}", endpoint);

        Ok(Self {
            endpoint,
            client: builder.build()?,
        })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        debug!(
            "Posting {} ({} bytes, {}) with a {} char query to {}",
            request.document.file_name,
            request.document.len(),
            request.document.content_type,
            request.query.chars().count(),
            self.endpoint
        );

        let form = request.into_form()?;
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        // Status alone is not a failure: an error body without `answer` reads as no answer.
        let status = response.status();
        if !status.is_success() {
            warn!("Analysis service responded with status {}", status);
        }

        let body = response.bytes().await?;
        debug!("Received {} byte response body", body.len());

        AnalysisResponse::from_json(&body)
    }
}
