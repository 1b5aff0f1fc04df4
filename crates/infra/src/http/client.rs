//! Retrying HTTP client shared by the API gateway and the refresh client.

use std::time::Duration;

use dayon_domain::constants::DEFAULT_TIMEOUT_SECS;
use dayon_domain::DayOnError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::{debug, warn};

use crate::errors::InfraError;

/// When a failed attempt may be sent again.
///
/// Idempotent methods retry on server errors, timeouts and connection
/// failures. Everything else (login code exchange, token refresh, logout)
/// only retries when the connection was never established, since the backend
/// cannot have seen the request.
#[derive(Debug, Clone, Copy)]
struct RetryPolicy {
    max_attempts: usize,
    base_backoff: Duration,
}

enum Failure<'a> {
    ServerError,
    Transport(&'a reqwest::Error),
}

impl RetryPolicy {
    fn allows(&self, method: &Method, attempt: usize, failure: &Failure<'_>) -> bool {
        if attempt >= self.max_attempts {
            return false;
        }
        match failure {
            Failure::Transport(err) if err.is_connect() => true,
            _ if !is_idempotent(method) => false,
            Failure::ServerError => true,
            Failure::Transport(err) => err.is_timeout() || err.is_request(),
        }
    }

    fn delay(&self, attempt: usize) -> Duration {
        let shift = u32::try_from(attempt.saturating_sub(1).min(8)).unwrap_or(8);
        self.base_backoff.saturating_mul(1u32 << shift)
    }
}

fn is_idempotent(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::PUT | Method::DELETE
    )
}

/// HTTP client with per-method retry and a request timeout.
///
/// Non-retryable responses (including 4xx) are handed back untouched; status
/// mapping is the caller's concern.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Request builder on the shared connection pool.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send `builder`, retrying according to the method's policy.
    ///
    /// # Errors
    ///
    /// `Network` for transport failures after the last attempt, `Internal`
    /// if the request cannot be rebuilt for a retry.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, DayOnError> {
        let mut attempt = 1;

        loop {
            let request = builder
                .try_clone()
                .ok_or_else(|| DayOnError::Internal("streaming request body cannot be resent".into()))?
                .build()
                .map_err(|err| DayOnError::from(InfraError::from(err)))?;
            let method = request.method().clone();
            let url = request.url().clone();
            debug!(attempt, %method, %url, "Sending HTTP request");

            let failure = match self.client.execute(request).await {
                Ok(response) if !response.status().is_server_error() => return Ok(response),
                Ok(response) => {
                    if !self.retry.allows(&method, attempt, &Failure::ServerError) {
                        return Ok(response);
                    }
                    format!("status {}", response.status())
                }
                Err(err) => {
                    if !self.retry.allows(&method, attempt, &Failure::Transport(&err)) {
                        return Err(InfraError::from(err).into());
                    }
                    err.to_string()
                }
            };

            let delay = self.retry.delay(attempt);
            warn!(attempt, %method, %url, reason = %failure, ?delay, "Retrying HTTP request");
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            attempt += 1;
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_attempts: 2,
            base_backoff: Duration::from_millis(200),
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total attempts including the first; at least one.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    /// # Errors
    ///
    /// Returns `Config` if the TLS backend cannot be initialised.
    pub fn build(self) -> Result<HttpClient, DayOnError> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .no_proxy()
            .build()
            .map_err(|err| DayOnError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(HttpClient {
            client,
            retry: RetryPolicy { max_attempts: self.max_attempts, base_backoff: self.base_backoff },
        })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use reqwest::StatusCode;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(max_attempts: usize) -> HttpClient {
        HttpClient::builder()
            .base_backoff(Duration::from_millis(5))
            .max_attempts(max_attempts)
            .build()
            .expect("http client")
    }

    async fn failing_then_ok(verb: &str, failures: usize) -> MockServer {
        let server = MockServer::start().await;
        let seen = Arc::new(AtomicUsize::new(0));
        Mock::given(method(verb))
            .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
                if seen.fetch_add(1, Ordering::SeqCst) < failures {
                    ResponseTemplate::new(502)
                } else {
                    ResponseTemplate::new(200)
                }
            })
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn get_retries_server_errors_until_success() {
        let server = failing_then_ok("GET", 2).await;
        let http = client(3);

        let response = http.send(http.request(Method::GET, server.uri())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn get_returns_last_server_error_when_attempts_run_out() {
        let server = failing_then_ok("GET", 5).await;
        let http = client(2);

        let response = http.send(http.request(Method::GET, server.uri())).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn post_is_sent_once_on_server_error() {
        let server = failing_then_ok("POST", 1).await;
        let http = client(3);

        let response = http
            .send(http.request(Method::POST, server.uri()).json(&serde_json::json!({ "code": "c" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        let http = client(3);

        let response = http.send(http.request(Method::GET, server.uri())).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn refused_connection_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let http = client(2);

        let result = http.send(http.request(Method::POST, format!("http://{addr}"))).await;

        match result {
            Err(DayOnError::Network(msg)) => assert!(msg.contains("connection")),
            other => panic!("expected network error, got {other:?}"),
        }
    }

    #[test]
    fn only_idempotent_methods_retry_server_errors() {
        let policy = RetryPolicy { max_attempts: 3, base_backoff: Duration::ZERO };

        assert!(policy.allows(&Method::GET, 1, &Failure::ServerError));
        assert!(policy.allows(&Method::DELETE, 2, &Failure::ServerError));
        assert!(!policy.allows(&Method::GET, 3, &Failure::ServerError));
        assert!(!policy.allows(&Method::POST, 1, &Failure::ServerError));
        assert!(!policy.allows(&Method::PATCH, 1, &Failure::ServerError));
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let policy = RetryPolicy { max_attempts: 4, base_backoff: Duration::from_millis(100) };

        assert_eq!(policy.delay(1), Duration::from_millis(100));
        assert_eq!(policy.delay(2), Duration::from_millis(200));
        assert_eq!(policy.delay(3), Duration::from_millis(400));
    }
}
