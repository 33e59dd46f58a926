use std::future::Future;

use tracing::{debug, warn};
use url::Url;

use super::domain::{EvaluationPayload, EvaluationResult};
use super::retry::{send_with_retry, RetryPolicy};
use crate::config::EvaluationClientConfig;

/// The submission could not complete: the service was unreachable or its answer was not
/// an evaluation result. Distinct from a service-reported `success: false`.
#[derive(Debug, thiserror::Error)]
pub enum NetworkFailure {
    #[error("could not reach {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unreadable response from {endpoint} (HTTP {status}): {detail}")]
    MalformedResponse {
        endpoint: String,
        status: u16,
        detail: String,
    },
    #[error("failed to build HTTP client: {0}")]
    ClientInit(#[source] reqwest::Error),
}

/// Anything that can turn a payload into an evaluation result.
pub trait EvaluationClient: Send + Sync {
    fn evaluate(
        &self,
        payload: &EvaluationPayload,
    ) -> impl Future<Output = Result<EvaluationResult, NetworkFailure>> + Send;
}

/// Posts payloads as JSON to the configured evaluation endpoint.
#[derive(Debug, Clone)]
pub struct HttpEvaluationClient {
    http: reqwest::Client,
    endpoint: Url,
    retry: RetryPolicy,
}

impl HttpEvaluationClient {
    pub fn new(config: &EvaluationClientConfig) -> Result<Self, NetworkFailure> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(NetworkFailure::ClientInit)?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            retry: config.retry,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl EvaluationClient for HttpEvaluationClient {
    async fn evaluate(
        &self,
        payload: &EvaluationPayload,
    ) -> Result<EvaluationResult, NetworkFailure> {
        let endpoint = self.endpoint.as_str();
        debug!(%endpoint, customer_id = payload.customer_id(), "submitting case for evaluation");

        let response = send_with_retry(&self.retry, || {
            self.http.post(self.endpoint.clone()).json(payload).send()
        })
        .await
        .map_err(|source| NetworkFailure::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| NetworkFailure::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        // Error statuses still carry a `success: false` body worth rendering.
        let result: EvaluationResult =
            serde_json::from_slice(&body).map_err(|err| NetworkFailure::MalformedResponse {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                detail: err.to_string(),
            })?;

        if !status.is_success() {
            warn!(status = status.as_u16(), %endpoint, "evaluation service answered with an error status");
        }

        Ok(result)
    }
}
