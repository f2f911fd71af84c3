//! Client-side access hook for a mounted page.
//!
//! Every mount or path change starts a fresh check: ask the server who is
//! signed in, then evaluate the route policy locally. A check that is
//! superseded by a newer path or by unmount is cancelled, and a late result
//! from it is dropped without touching state or navigation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use storefront_auth::{AccessError, RoutePolicy};
use storefront_core::config::AccessConfig;
use storefront_entity::user::ResolvedSession;

use crate::introspect::SessionIntrospector;
use crate::navigator::Navigator;

/// Where the hook is for the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookState {
    /// A check is in flight; nothing protected is rendered.
    Loading,
    /// The page may render.
    Allowed {
        /// The signed-in user, if any.
        user: Option<ResolvedSession>,
    },
    /// The page is off limits; the hook has navigated to `redirect`.
    Denied {
        /// Navigation target.
        redirect: String,
        /// Why the check failed.
        reason: AccessError,
    },
}

impl HookState {
    /// Whether a check is still in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// What a page component reads from the hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessSnapshot {
    /// The signed-in user, once a check has allowed the page.
    pub user: Option<ResolvedSession>,
    /// A check is in flight.
    pub loading: bool,
    /// The current check allowed the page.
    pub allowed: bool,
}

/// Hook tuning.
#[derive(Debug, Clone)]
pub struct HookConfig {
    /// Navigation target on denial.
    pub home_path: String,
    /// Extra introspection attempts after a network failure.
    pub max_retries: u32,
    /// Pause before each retry.
    pub retry_delay: Duration,
}

impl HookConfig {
    /// Hook settings for the given access configuration.
    pub fn from_access(access: &AccessConfig) -> Self {
        Self {
            home_path: access.home_path.clone(),
            ..Self::default()
        }
    }
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            home_path: "/".to_string(),
            max_retries: 1,
            retry_delay: Duration::from_millis(250),
        }
    }
}

struct Shared {
    policy: Arc<RoutePolicy>,
    introspector: Arc<dyn SessionIntrospector>,
    navigator: Arc<dyn Navigator>,
    config: HookConfig,
    generation: AtomicU64,
    state: watch::Sender<HookState>,
    /// Held while the generation changes and while a result is published
    /// and acted on, so no navigation slips in between.
    transition: Mutex<()>,
}

impl Shared {
    fn transition(&self) -> MutexGuard<'_, ()> {
        self.transition.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Access state for one mounted page.
pub struct AccessHook {
    shared: Arc<Shared>,
    receiver: watch::Receiver<HookState>,
    inflight: Option<CancellationToken>,
}

impl std::fmt::Debug for AccessHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessHook")
            .field("state", &*self.receiver.borrow())
            .field("generation", &self.shared.generation.load(Ordering::SeqCst))
            .finish()
    }
}

impl AccessHook {
    /// Creates an unmounted hook, in [`HookState::Loading`].
    pub fn new(
        policy: Arc<RoutePolicy>,
        introspector: Arc<dyn SessionIntrospector>,
        navigator: Arc<dyn Navigator>,
        config: HookConfig,
    ) -> Self {
        let (state, receiver) = watch::channel(HookState::Loading);
        Self {
            shared: Arc::new(Shared {
                policy,
                introspector,
                navigator,
                config,
                generation: AtomicU64::new(0),
                state,
                transition: Mutex::new(()),
            }),
            receiver,
            inflight: None,
        }
    }

    /// Starts the first check for `path`.
    pub fn mount(&mut self, path: impl Into<String>) -> JoinHandle<()> {
        self.navigate(path)
    }

    /// Re-runs the check for a new `path`, superseding any check in flight.
    ///
    /// Must be called from within a tokio runtime.
    pub fn navigate(&mut self, path: impl Into<String>) -> JoinHandle<()> {
        let shared = Arc::clone(&self.shared);
        let generation = {
            let _transition = shared.transition();
            self.cancel_inflight();
            let generation = shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
            shared.state.send_replace(HookState::Loading);
            generation
        };

        let token = CancellationToken::new();
        self.inflight = Some(token.clone());

        let check = Check {
            shared: Arc::clone(&self.shared),
            path: path.into(),
            generation,
            token,
        };
        tokio::spawn(check.run())
    }

    /// Stops the hook; any check in flight is abandoned.
    pub fn unmount(&mut self) {
        let shared = Arc::clone(&self.shared);
        let _transition = shared.transition();
        self.cancel_inflight();
        shared.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Current state.
    pub fn state(&self) -> HookState {
        self.receiver.borrow().clone()
    }

    /// Whether the page's protected content may render.
    pub fn should_render(&self) -> bool {
        matches!(*self.receiver.borrow(), HookState::Allowed { .. })
    }

    /// `{user, loading, allowed}` view of the current state.
    pub fn snapshot(&self) -> AccessSnapshot {
        match &*self.receiver.borrow() {
            HookState::Loading => AccessSnapshot {
                user: None,
                loading: true,
                allowed: false,
            },
            HookState::Allowed { user } => AccessSnapshot {
                user: user.clone(),
                loading: false,
                allowed: true,
            },
            HookState::Denied { .. } => AccessSnapshot {
                user: None,
                loading: false,
                allowed: false,
            },
        }
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<HookState> {
        self.shared.state.subscribe()
    }

    /// Waits until the current check settles and returns the outcome.
    pub async fn settled(&mut self) -> HookState {
        match self.receiver.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            // The sender lives in `shared`, which this hook keeps alive.
            Err(_) => HookState::Loading,
        }
    }

    fn cancel_inflight(&mut self) {
        if let Some(token) = self.inflight.take() {
            token.cancel();
        }
    }
}

impl Drop for AccessHook {
    fn drop(&mut self) {
        self.cancel_inflight();
    }
}

/// One access check, bound to the generation that started it.
struct Check {
    shared: Arc<Shared>,
    path: String,
    generation: u64,
    token: CancellationToken,
}

impl Check {
    async fn run(self) {
        let user = tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                debug!(path = %self.path, "Access check superseded");
                return;
            }
            result = self.introspect() => result,
        };

        let next = match user {
            Ok(user) => {
                let role = user.as_ref().map(|u| u.role);
                let required = self.shared.policy.required_role(&self.path);
                if self.shared.policy.can_access(role, &self.path) {
                    HookState::Allowed { user }
                } else {
                    let reason = match role {
                        Some(role) => AccessError::RoleMismatch { role, required },
                        None => AccessError::CredentialMissing,
                    };
                    self.denied(reason)
                }
            }
            Err(reason) => self.denied(reason),
        };

        self.apply(next);
    }

    /// Publishes `next` and performs its redirect, unless a newer check or
    /// an unmount has superseded this one.
    ///
    /// Returns whether the result was applied.
    fn apply(&self, next: HookState) -> bool {
        let _transition = self.shared.transition();
        if !self.is_current() {
            debug!(path = %self.path, "Dropping stale access check result");
            return false;
        }

        if let HookState::Denied { redirect, reason } = &next {
            debug!(path = %self.path, reason = reason.code(), redirect = %redirect, "Access denied");
            self.shared.navigator.replace(redirect);
        }
        self.shared.state.send_replace(next);
        true
    }

    fn is_current(&self) -> bool {
        !self.token.is_cancelled()
            && self.shared.generation.load(Ordering::SeqCst) == self.generation
    }

    async fn introspect(&self) -> Result<Option<ResolvedSession>, AccessError> {
        let mut retries_left = self.shared.config.max_retries;
        loop {
            match self.shared.introspector.introspect().await {
                Err(AccessError::NetworkFailure(msg)) if retries_left > 0 => {
                    retries_left -= 1;
                    warn!(path = %self.path, error = %msg, "Session introspection failed, retrying");
                    tokio::time::sleep(self.shared.config.retry_delay).await;
                }
                Err(AccessError::NetworkFailure(msg)) => {
                    warn!(path = %self.path, error = %msg, "Session introspection failed");
                    return Err(AccessError::NetworkFailure(msg));
                }
                other => return other,
            }
        }
    }

    fn denied(&self, reason: AccessError) -> HookState {
        HookState::Denied {
            redirect: self.shared.config.home_path.clone(),
            reason,
        }
    }
}
