use crate::endpoint::{request_url, DEFAULT_BASE_URL};
use crate::transport::Transport;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use verse_animate::{card_entrance, Interpolator};
use verse_model::{decode_body, ApiVerdict, ErrorState, Outcome, VerseQuery};
use verse_render::Render;

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Drop responses that settle after a newer fetch has started.
    pub stale_guard: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("verse/", env!("CARGO_PKG_VERSION")).to_string(),
            stale_guard: true,
        }
    }
}

/// How a fetch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    /// The outcome was handed to the renderer.
    Rendered(Outcome),
    /// A newer fetch started first; the outcome was dropped unrendered.
    Stale { token: u64, outcome: Outcome },
}

impl Settled {
    pub fn outcome(&self) -> &Outcome {
        match self {
            Settled::Rendered(outcome) | Settled::Stale { outcome, .. } => outcome,
        }
    }
}

/// Looks verses up and hands each result to the renderer.
///
/// Cheap to clone; clones share the transport, renderer and request counter.
pub struct VerseFetcher<T, R> {
    inner: Arc<Inner<T, R>>,
}

impl<T, R> Clone for VerseFetcher<T, R> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

struct Inner<T, R> {
    transport: T,
    renderer: R,
    interp: Interpolator,
    config: FetchConfig,
    latest: AtomicU64,
}

impl<T: Transport, R: Render + 'static> VerseFetcher<T, R> {
    pub fn new(transport: T, renderer: R, interp: Interpolator, config: FetchConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                transport,
                renderer,
                interp,
                config,
                latest: AtomicU64::new(0),
            }),
        }
    }

    pub fn renderer(&self) -> &R {
        &self.inner.renderer
    }

    /// Start a fetch and return without waiting for the network.
    ///
    /// A blank reference renders `EmptyInput` before returning and yields
    /// `None`; no request is made. Otherwise the loading status is shown,
    /// the GET is spawned on the current runtime, and the returned task
    /// resolves once the outcome has been rendered (or dropped as stale).
    pub fn fetch(&self, query: VerseQuery) -> Option<JoinHandle<Settled>> {
        let token = self.inner.latest.fetch_add(1, Ordering::AcqRel) + 1;

        if query.is_blank() {
            tracing::info!("Empty reference; nothing to fetch");
            self.inner.renderer.render(&Outcome::Failed(ErrorState::EmptyInput));
            return None;
        }

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::error!(error = %e, query = %query, "No async runtime for verse request");
                self.inner.renderer.render(&Outcome::Failed(ErrorState::NetworkFailure));
                return None;
            }
        };

        self.inner.renderer.loading(&query);
        let url = request_url(&self.inner.config.base_url, &query);
        let inner = Arc::clone(&self.inner);
        Some(runtime.spawn(inner.settle(query, url, token)))
    }

    /// Fetch and wait for the result.
    ///
    /// Same rendering as [`VerseFetcher::fetch`]; a blank reference settles
    /// immediately as `EmptyInput`.
    pub async fn fetch_and_wait(&self, query: VerseQuery) -> Settled {
        match self.fetch(query) {
            None => Settled::Rendered(Outcome::Failed(ErrorState::EmptyInput)),
            Some(task) => match task.await {
                Ok(settled) => settled,
                Err(e) => {
                    tracing::error!(error = %e, "Verse request task failed");
                    self.inner.renderer.render(&Outcome::Failed(ErrorState::NetworkFailure));
                    Settled::Rendered(Outcome::Failed(ErrorState::NetworkFailure))
                }
            },
        }
    }
}

impl<T: Transport, R: Render + 'static> Inner<T, R> {
    async fn settle(self: Arc<Self>, query: VerseQuery, url: String, token: u64) -> Settled {
        tracing::info!(query = %query, url = %url, token, "Fetching verse");

        let outcome = match self.transport.get(&url).await {
            Ok(body) => match decode_body(&body) {
                Ok(ApiVerdict::Found(verse)) => {
                    tracing::info!(
                        reference = %verse.reference,
                        version = %verse.version_label,
                        "Verse found"
                    );
                    Outcome::Verse(verse)
                }
                Ok(ApiVerdict::NotFound) => {
                    tracing::info!(query = %query, "Reference not found");
                    Outcome::Failed(ErrorState::NotFound)
                }
                Err(e) => {
                    tracing::error!(url = %url, error = %e, "Malformed verse response");
                    Outcome::Failed(ErrorState::NetworkFailure)
                }
            },
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Verse request failed");
                Outcome::Failed(ErrorState::NetworkFailure)
            }
        };

        if self.config.stale_guard {
            let latest = self.latest.load(Ordering::Acquire);
            if latest != token {
                tracing::debug!(token, latest, query = %query, "Discarding stale response");
                return Settled::Stale { token, outcome };
            }
        }

        self.renderer.render(&outcome);
        if outcome.is_success() {
            let inner = Arc::clone(&self);
            card_entrance(&self.interp, move |card| inner.renderer.card_frame(card));
        }
        Settled::Rendered(outcome)
    }
}
