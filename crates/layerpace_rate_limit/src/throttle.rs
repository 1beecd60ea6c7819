//! The throttling transport decorator.
//!
//! Every classifiable request runs its whole wait, send, register and retry
//! cycle while holding one transport-wide lock. Registration is the only
//! source of truth for later delay computations, so the next request must
//! not compute its delay before the previous response has been recorded.
//! This also serializes requests for unrelated resource types: the average
//! tracker is shared by all of them.

use crate::{
    BurstTable, RateLimitHeaders, RateLimitTier, RoutingKey, ThrottleConfig, WindowSnapshot,
    WindowTracker,
};
use async_trait::async_trait;
use layerpace_core::{HttpRequest, HttpResponse, Transport};
use layerpace_error::LayerpaceResult;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Mutable state guarded by the transport-wide lock.
#[derive(Debug)]
struct ThrottleState {
    average: WindowTracker,
    bursts: BurstTable,
}

/// Transport that keeps requests within the server's average and burst limits.
///
/// It learns both limits from response headers, sleeps until the
/// reconstructed window boundary when a limit is exhausted, and resends
/// requests answered with `429 Too Many Requests` once the lockout has been
/// registered. A `429` whose headers cannot be registered is returned as-is.
///
/// Requests whose path lacks the API marker are passed straight through.
///
/// # Example
///
/// ```rust,no_run
/// use layerpace_core::{HttpRequest, ReqwestTransport, Transport};
/// use layerpace_rate_limit::ThrottledTransport;
/// use reqwest::{Method, Url};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = ThrottledTransport::new(ReqwestTransport::new());
/// let url = Url::parse("https://yourdomain.commercelayer.io/api/skus")?;
/// let response = transport.execute(&HttpRequest::new(Method::GET, url)).await?;
/// println!("{}", response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ThrottledTransport<T> {
    inner: T,
    config: ThrottleConfig,
    state: Mutex<ThrottleState>,
}

impl<T: Transport> ThrottledTransport<T> {
    /// Wrap `inner` with the default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, ThrottleConfig::default())
    }

    /// Wrap `inner` with an explicit configuration.
    ///
    /// The average tracker is anchored now. Burst trackers are anchored when
    /// their key is first seen.
    #[instrument(skip(inner))]
    pub fn with_config(inner: T, config: ThrottleConfig) -> Self {
        debug!("Creating throttled transport");
        Self {
            inner,
            config,
            state: Mutex::new(ThrottleState {
                average: WindowTracker::starting_now(),
                bursts: BurstTable::new(),
            }),
        }
    }

    /// The wrapped transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Active configuration.
    pub fn config(&self) -> &ThrottleConfig {
        &self.config
    }

    /// State of the average tracker.
    ///
    /// Waits for any in-flight throttled request to finish.
    pub async fn average_snapshot(&self) -> WindowSnapshot {
        self.state.lock().await.average.snapshot()
    }

    /// State of the burst tracker for `key`, if the key has been seen.
    ///
    /// Waits for any in-flight throttled request to finish.
    pub async fn burst_snapshot(&self, key: &RoutingKey) -> Option<WindowSnapshot> {
        self.state.lock().await.bursts.get(key).map(WindowTracker::snapshot)
    }

    /// Every routing key with a burst tracker.
    pub async fn routes(&self) -> Vec<RoutingKey> {
        self.state.lock().await.bursts.routes()
    }

    async fn execute_throttled(
        &self,
        request: &HttpRequest,
        key: &RoutingKey,
    ) -> LayerpaceResult<HttpResponse> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            wait_out(&mut state.average, RateLimitTier::Average).await;
            wait_out(state.bursts.tracker_mut(key), RateLimitTier::Burst).await;

            let response = self.inner.execute(request).await?;
            let registered = self.register(state, key, &response);

            if !response.is_too_many_requests() {
                debug!(attempt, status = %response.status(), "Request completed");
                return Ok(response);
            }

            // Without a registration the next delay would be zero again.
            if !registered {
                warn!(
                    attempt,
                    route = %key,
                    "Lockout without usable rate limit headers, returning response"
                );
                return Ok(response);
            }

            if let Some(max_attempts) = self.config.max_attempts() {
                if attempt >= *max_attempts {
                    warn!(
                        attempt,
                        "Still locked out after maximum attempts, returning last response"
                    );
                    return Ok(response);
                }
            }

            warn!(attempt, route = %key, "Server signalled lockout, retrying");
        }
    }

    /// Record `response` against the tier its window identifies.
    ///
    /// Returns whether a tracker was updated.
    fn register(
        &self,
        state: &mut ThrottleState,
        key: &RoutingKey,
        response: &HttpResponse,
    ) -> bool {
        let Some(observed) = RateLimitHeaders::parse(response, &self.config) else {
            debug!(status = %response.status(), "No usable rate limit headers, skipping registration");
            return false;
        };

        let tracker = match RateLimitTier::classify(observed.window(), &self.config) {
            Some(RateLimitTier::Average) => &mut state.average,
            Some(RateLimitTier::Burst) => state.bursts.tracker_mut(key),
            None => {
                debug!(
                    window_secs = observed.window().as_secs(),
                    "Window matches no known tier, skipping registration"
                );
                return false;
            }
        };

        tracker.register(observed.locked(), observed.window());
        debug!(
            remaining = observed.remaining(),
            locked = observed.locked(),
            window_secs = observed.window().as_secs(),
            "Registered rate limit observation"
        );
        true
    }
}

/// Sleep until `tracker`'s window resets, then assume it has.
async fn wait_out(tracker: &mut WindowTracker, tier: RateLimitTier) {
    let delay = tracker.delay();
    debug!(%tier, delay_ms = delay.as_millis() as u64, "Computed delay");
    if delay.is_zero() {
        return;
    }

    info!(%tier, delay_ms = delay.as_millis() as u64, "Waiting for rate limit window to reset");
    sleep(delay).await;
    tracker.unlock();
}

#[async_trait]
impl<T: Transport> Transport for ThrottledTransport<T> {
    #[instrument(
        skip(self, request),
        fields(request_id = %Uuid::new_v4(), method = %request.method(), path = %request.path())
    )]
    async fn execute(&self, request: &HttpRequest) -> LayerpaceResult<HttpResponse> {
        let Some(key) = RoutingKey::extract(
            request.path(),
            request.method(),
            self.config.api_marker(),
        ) else {
            debug!("Resource type not found in URL, skipping rate limiting");
            return self.inner.execute(request).await;
        };

        debug!(route = %key, "Throttling request");
        self.execute_throttled(request, &key).await
    }
}
