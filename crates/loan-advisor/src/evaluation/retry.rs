//! Optional retry with exponential backoff for evaluation calls.
//!
//! Only transport failures (connection refused, timeouts) are retried. Whatever the
//! service answers, including error statuses, is returned to the caller untouched.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(200);

/// How many extra attempts a submission may make after a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::single_attempt()
    }
}

impl RetryPolicy {
    pub const fn single_attempt() -> Self {
        Self {
            max_retries: 0,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }

    /// Delay before retry number `attempt` (zero based): base, 2x base, 4x base, ...
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

pub(crate) async fn send_with_retry<F, Fut>(
    policy: &RetryPolicy,
    send: F,
) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    for attempt in 0..policy.max_retries {
        match send().await {
            Ok(response) => return Ok(response),
            Err(err) => {
                let delay = policy.delay_for(attempt);
                warn!(
                    attempt = attempt + 1,
                    max_retries = policy.max_retries,
                    "evaluation request failed, retrying in {delay:?}: {err}"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
    send().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    async fn closed_port_request(calls: Arc<AtomicU32>) -> Result<reqwest::Response, reqwest::Error> {
        calls.fetch_add(1, Ordering::SeqCst);
        reqwest::Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .expect("client builds")
            .post("http://127.0.0.1:1/api/evaluate_case")
            .send()
            .await
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let policy = RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
        };
        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(400));
    }

    #[tokio::test]
    async fn default_policy_makes_one_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::default();

        let result = send_with_retry(&policy, || closed_port_request(calls.clone())).await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausts_configured_retries_on_transport_failure() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy {
            max_retries: 2,
            base_delay: Duration::from_millis(5),
        };

        let result = send_with_retry(&policy, || closed_port_request(calls.clone())).await;

        assert!(result.is_err(), "closed port must fail");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
