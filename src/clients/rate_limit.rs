use crate::error::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

/// Minimum spacing between outbound calls, shared across every endpoint.
/// Keeps us around 17 calls/min, under the documented ~20/min ceiling.
pub(crate) const MIN_INTERVAL: Duration = Duration::from_millis(3500);

/// Attempts per logical request, rate-limit responses included.
const MAX_RETRIES: u32 = 3;

/// Base wait after a 403/429, doubled on every further attempt.
const RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(10);

/// Fixed wait after a transient transport failure.
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// A raw upstream response. Bodies stay as bytes because the two endpoints
/// use different encodings (JSON and binary property list).
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
        headers: &[(&str, &str)],
    ) -> Result<RawResponse>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
        headers: &[(&str, &str)],
    ) -> Result<RawResponse> {
        let mut request = self.client.get(url).query(params);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse { status, body })
    }
}

/// Serializes all upstream calls through one last-call timestamp and retries
/// transient failures. Exhausted retries degrade to `None`; callers treat
/// missing data as an empty result, not a failure.
pub struct RateLimitedClient {
    transport: Box<dyn Transport>,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimitedClient {
    pub fn new(client: Client) -> Self {
        Self::with_transport(Box::new(HttpTransport::new(client)))
    }

    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            last_request: Mutex::new(None),
        }
    }

    /// Waits until at least `MIN_INTERVAL` has passed since the previous
    /// call, then stamps the current instant. The lock is held across the
    /// sleep so callers stay serialized.
    async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < MIN_INTERVAL {
                sleep(MIN_INTERVAL - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Issues a GET with rate limiting and up to `MAX_RETRIES` attempts.
    /// 403/429 responses back off exponentially (10s, 20s, 40s), other
    /// failures wait a fixed delay; a 2xx returns immediately.
    pub async fn request(
        &self,
        url: &str,
        params: &[(&str, String)],
        headers: &[(&str, &str)],
    ) -> Option<RawResponse> {
        for attempt in 0..MAX_RETRIES {
            self.pace().await;

            match self.transport.get(url, params, headers).await {
                Ok(response)
                    if response.status == StatusCode::FORBIDDEN
                        || response.status == StatusCode::TOO_MANY_REQUESTS =>
                {
                    let wait = RATE_LIMIT_BACKOFF * 2u32.pow(attempt);
                    warn!("Rate limited by {url}, waiting {}s", wait.as_secs());
                    sleep(wait).await;
                }
                Ok(response) if response.status.is_success() => return Some(response),
                Ok(response) => {
                    debug!("Request to {url} returned status {}", response.status);
                    if attempt == MAX_RETRIES - 1 {
                        return None;
                    }
                    sleep(RETRY_DELAY).await;
                }
                Err(e) => {
                    debug!("Request to {url} failed: {e}");
                    if attempt == MAX_RETRIES - 1 {
                        return None;
                    }
                    sleep(RETRY_DELAY).await;
                }
            }
        }

        None
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{response, ScriptedTransport, StaticTransport};
    use super::*;
    use crate::error::AsoError;
    use std::sync::atomic::Ordering;

    fn no_params() -> (&'static str, Vec<(&'static str, String)>) {
        ("http://storefront.test/search", Vec::new())
    }

    #[tokio::test(start_paused = true)]
    async fn first_call_proceeds_immediately() {
        let client = RateLimitedClient::with_transport(Box::new(StaticTransport::new(200, b"{}")));
        let (url, params) = no_params();

        let start = Instant::now();
        let result = client.request(url, &params, &[]).await;

        assert!(result.is_some());
        assert!(start.elapsed() < MIN_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn consecutive_calls_are_spaced_by_the_minimum_interval() {
        let client = RateLimitedClient::with_transport(Box::new(StaticTransport::new(200, b"{}")));
        let (url, params) = no_params();

        client.request(url, &params, &[]).await;
        let start = Instant::now();
        client.request(url, &params, &[]).await;

        assert!(start.elapsed() >= MIN_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn success_returns_the_raw_response_without_retrying() {
        let transport = StaticTransport::new(200, b"payload");
        let calls = transport.counter();
        let client = RateLimitedClient::with_transport(Box::new(transport));
        let (url, params) = no_params();

        let result = client.request(url, &params, &[]).await.unwrap();

        assert_eq!(result.body, b"payload");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_responses_back_off_then_give_up() {
        let transport = StaticTransport::new(429, b"");
        let calls = transport.counter();
        let client = RateLimitedClient::with_transport(Box::new(transport));
        let (url, params) = no_params();

        let start = Instant::now();
        let result = client.request(url, &params, &[]).await;

        assert!(result.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 10s + 20s + 40s of exponential backoff, not reset between attempts
        assert!(start.elapsed() >= Duration::from_secs(70));
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_a_rate_limit_response() {
        let client = RateLimitedClient::with_transport(Box::new(ScriptedTransport::new(vec![
            Ok(response(429, b"")),
            Ok(response(200, b"ok")),
        ])));
        let (url, params) = no_params();

        let start = Instant::now();
        let result = client.request(url, &params, &[]).await.unwrap();

        assert_eq!(result.body, b"ok");
        assert!(start.elapsed() >= RATE_LIMIT_BACKOFF);
    }

    #[tokio::test(start_paused = true)]
    async fn transport_errors_retry_with_a_fixed_delay_then_give_up() {
        let client = RateLimitedClient::with_transport(Box::new(ScriptedTransport::new(vec![
            Err(AsoError::Other("connection reset".to_string())),
            Err(AsoError::Other("connection reset".to_string())),
            Err(AsoError::Other("connection reset".to_string())),
        ])));
        let (url, params) = no_params();

        let start = Instant::now();
        let result = client.request(url, &params, &[]).await;

        assert!(result.is_none());
        // two fixed 5s delays; the final attempt fails without waiting
        assert!(start.elapsed() >= RETRY_DELAY * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn non_success_statuses_are_treated_as_transient() {
        let transport = StaticTransport::new(500, b"");
        let calls = transport.counter();
        let client = RateLimitedClient::with_transport(Box::new(transport));
        let (url, params) = no_params();

        let result = client.request(url, &params, &[]).await;

        assert!(result.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn independent_clients_do_not_share_pacing_state() {
        let first = RateLimitedClient::with_transport(Box::new(StaticTransport::new(200, b"{}")));
        let second = RateLimitedClient::with_transport(Box::new(StaticTransport::new(200, b"{}")));
        let (url, params) = no_params();

        first.request(url, &params, &[]).await;
        let start = Instant::now();
        second.request(url, &params, &[]).await;

        assert!(start.elapsed() < MIN_INTERVAL);
    }
}
