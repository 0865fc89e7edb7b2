//! Shared outbound HTTP session.
//!
//! A single `reqwest::Client` (and therefore a single connection pool) is
//! shared by every tool that talks to the network. The client is built on
//! first use, rebuilt if it was closed, and closed once at shutdown by
//! [`SessionGuard`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use reqwest::Client;
use tracing::{debug, info};

use super::config::HttpClientConfig;

/// Lazily created, reusable outbound HTTP client.
pub struct OutboundSession {
    config: HttpClientConfig,

    /// `None` until first use and again after [`OutboundSession::close`].
    client: Mutex<Option<Client>>,

    /// Number of clients built over the lifetime of this session.
    created: AtomicU64,
}

impl OutboundSession {
    /// Create a session with the given policy. No client is built yet.
    pub fn new(config: HttpClientConfig) -> Self {
        Self {
            config,
            client: Mutex::new(None),
            created: AtomicU64::new(0),
        }
    }

    /// Get the live client, building it if absent or previously closed.
    ///
    /// Creation happens under the lock, so concurrent first use builds a
    /// single client. The returned handle shares the session's pool.
    pub fn acquire(&self) -> Result<Client, reqwest::Error> {
        let mut slot = self.lock();

        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        let client = Client::builder()
            .timeout(self.config.timeout())
            .danger_accept_invalid_certs(self.config.accept_invalid_certs)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        let generation = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            generation,
            timeout_secs = self.config.timeout_secs,
            "Created outbound HTTP session"
        );

        *slot = Some(client.clone());
        Ok(client)
    }

    /// Drop the live client and its connection pool.
    ///
    /// Returns `true` if a live client was closed, `false` if the session
    /// was already closed or never opened.
    pub fn close(&self) -> bool {
        self.lock().take().is_some()
    }

    /// Whether a live client currently exists.
    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    /// Number of clients built so far.
    pub fn clients_created(&self) -> u64 {
        self.created.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Client>> {
        // The slot holds no invariant a panicking holder could break.
        self.client.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Closes the shared session when dropped.
///
/// Hold one in `main` for the lifetime of the server so the session is
/// released on normal exit, early `?` returns and panic unwinding alike.
pub struct SessionGuard {
    session: Arc<OutboundSession>,
}

impl SessionGuard {
    /// Guard `session` until this value is dropped.
    pub fn new(session: Arc<OutboundSession>) -> Self {
        Self { session }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if self.session.close() {
            info!("HTTP session closed");
        }
    }
}
