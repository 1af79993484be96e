//! Fetch-on-observe state machine.
//!
//! A [`ResourceWatch`] owns one state slot for one endpoint. It fetches as
//! soon as it is created, again on [`ResourceWatch::refetch`] and whenever
//! [`ResourceWatch::set_endpoint`] receives a different endpoint value.
//! Failures keep the error and attach the fallback payload so callers can
//! render something either way.
//!
//! Re-triggers cancel the call in flight and restart. Each start bumps a
//! generation counter, and a result is only published when its generation is
//! still current, so a stale response can never overwrite a newer state.
//! Dropping the watch cancels everything it started.

use crate::core::client::ApiClient;
use crate::domain::ports::{Endpoint, FallbackProvider, ResourceFetcher};
use crate::utils::error::ApiError;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Loaded(T),
    /// `fallback` is `None` only when the provider has no entry for the
    /// request.
    Failed {
        error: ApiError,
        fallback: Option<T>,
    },
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// Live data if loaded, otherwise the fallback if there is one.
    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Loading => None,
            FetchState::Loaded(data) => Some(data),
            FetchState::Failed { fallback, .. } => fallback.as_ref(),
        }
    }

    pub fn fallback(&self) -> Option<&T> {
        match self {
            FetchState::Failed { fallback, .. } => fallback.as_ref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            FetchState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error().map(ApiError::display_message)
    }
}

/// What the rendering layer reads: `{data, loading, error}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceView<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T: Clone> From<&FetchState<T>> for ResourceView<T> {
    fn from(state: &FetchState<T>) -> Self {
        Self {
            data: state.data().cloned(),
            loading: state.is_loading(),
            error: state.error_message(),
        }
    }
}

struct Inflight<E> {
    endpoint: E,
    generation: u64,
    token: CancellationToken,
}

struct Shared<E: Endpoint, F> {
    fetcher: Arc<F>,
    fallback: Arc<dyn FallbackProvider>,
    state: watch::Sender<FetchState<E::Output>>,
    inflight: Mutex<Inflight<E>>,
    root: CancellationToken,
}

impl<E: Endpoint, F> Shared<E, F> {
    fn inflight(&self) -> MutexGuard<'_, Inflight<E>> {
        self.inflight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub struct ResourceWatch<E: Endpoint, F: ResourceFetcher = ApiClient> {
    shared: Arc<Shared<E, F>>,
}

impl<E: Endpoint, F: ResourceFetcher> ResourceWatch<E, F> {
    /// Starts observing `endpoint` and kicks off the first fetch. Must be
    /// called from within a tokio runtime.
    pub fn observe(fetcher: Arc<F>, fallback: Arc<dyn FallbackProvider>, endpoint: E) -> Self {
        let root = CancellationToken::new();
        let (state, _) = watch::channel(FetchState::Loading);
        let shared = Arc::new(Shared {
            fetcher,
            fallback,
            state,
            inflight: Mutex::new(Inflight {
                endpoint,
                generation: 0,
                token: root.child_token(),
            }),
            root,
        });

        let watch = Self { shared };
        watch.restart(None);
        watch
    }

    pub fn endpoint(&self) -> E {
        self.shared.inflight().endpoint.clone()
    }

    pub fn state(&self) -> FetchState<E::Output> {
        self.shared.state.borrow().clone()
    }

    pub fn view(&self) -> ResourceView<E::Output> {
        ResourceView::from(&*self.shared.state.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<E::Output>> {
        self.shared.state.subscribe()
    }

    /// Waits until the current attempt resolves. Once the watch is closed it
    /// returns the current state instead, which may still be `Loading`.
    pub async fn settled(&self) -> FetchState<E::Output> {
        let mut rx = self.subscribe();
        let settled = tokio::select! {
            biased;
            _ = self.shared.root.cancelled() => None,
            state = rx.wait_for(|state| !state.is_loading()) => state.ok().map(|s| s.clone()),
        };
        settled.unwrap_or_else(|| self.state())
    }

    /// Manual re-trigger: cancels whatever is in flight and fetches again.
    pub fn refetch(&self) {
        self.restart(None);
    }

    /// Dependency change. Returns `false` and does nothing when `endpoint`
    /// equals the one already observed.
    pub fn set_endpoint(&self, endpoint: E) -> bool {
        if self.shared.inflight().endpoint == endpoint {
            return false;
        }
        self.restart(Some(endpoint));
        true
    }

    /// Stops observing. The result of any call in flight is discarded and
    /// later re-triggers are ignored.
    pub fn close(&self) {
        self.shared.root.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.shared.root.is_cancelled()
    }

    fn restart(&self, endpoint: Option<E>) {
        if self.shared.root.is_cancelled() {
            tracing::debug!("watch closed, ignoring re-trigger");
            return;
        }

        let (endpoint, generation, token) = {
            let mut inflight = self.shared.inflight();
            inflight.token.cancel();
            if let Some(endpoint) = endpoint {
                inflight.endpoint = endpoint;
            }
            inflight.generation += 1;
            inflight.token = self.shared.root.child_token();
            self.shared.state.send_replace(FetchState::Loading);
            (
                inflight.endpoint.clone(),
                inflight.generation,
                inflight.token.clone(),
            )
        };

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            tracing::debug!("🌐 Fetching {} (attempt {})", endpoint.kind(), generation);
            let next = match shared.fetcher.fetch(&endpoint, &token).await {
                Ok(data) => FetchState::Loaded(data),
                Err(ApiError::Cancelled) if token.is_cancelled() => return,
                Err(error) => {
                    let fallback = endpoint.fallback(shared.fallback.as_ref());
                    if fallback.is_some() {
                        tracing::info!("📋 Using fallback data for {}", endpoint.kind());
                    } else {
                        tracing::warn!("No fallback data for {}", endpoint.kind());
                    }
                    FetchState::Failed { error, fallback }
                }
            };

            let inflight = shared.inflight();
            if inflight.generation == generation && !token.is_cancelled() {
                shared.state.send_replace(next);
            } else {
                tracing::debug!("Discarding stale result for {}", endpoint.kind());
            }
        });
    }
}

impl<E: Endpoint, F: ResourceFetcher> Drop for ResourceWatch<E, F> {
    fn drop(&mut self) {
        self.shared.root.cancel();
    }
}
