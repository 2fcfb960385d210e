// ABOUTME: Transport context owning base URL, credential and the per-handle identity override
// ABOUTME: Resolves request URLs, applies masquerading, and hands out weak follow-up handles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Transport Context
//!
//! A [`CanvasContext`] is created once per credential / base-URL pair and
//! reused for many operations. Clones are cheap and share one connection pool.
//!
//! ## Identity override (masquerading)
//!
//! The override lives on the handle, not in shared state. Every request sent
//! through a handle with an override carries `as_user_id`; other handles,
//! including clones taken earlier, are unaffected. Three ways to use it:
//!
//! - [`CanvasContext::as_user`] derives a masqueraded handle, leaving the original untouched.
//! - [`CanvasContext::with_override`] runs an async operation on such a derived handle.
//! - [`CanvasContext::override_scope`] mutates this handle and restores the previous
//!   identity when the guard drops, on success, error or cancellation alike.
//!
//! `set_override` / `clear_override` take `&mut self`, so a handle with an
//! override can never be shared by two concurrent operations. Concurrent
//! masquerading of different users uses one derived handle per user.

use std::fmt::{self, Debug, Display, Formatter};
use std::future::Future;
use std::ops::Deref;
use std::sync::{Arc, Weak};

use canvas_core::constants::MASQUERADE_PARAM;
use canvas_core::{CanvasError, CanvasResult};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{AccessToken, ClientConfig, ConfigError};
use crate::models::wire_registry;
use crate::transport::{ApiRequest, HttpTransport, PreparedRequest, RawResponse, RequestTarget, Transport};

/// Identity to act as: a numeric user id or a Canvas id reference such as `sis_user_id:123`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityOverride(String);

impl IdentityOverride {
    /// Wire value of the override
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for IdentityOverride {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for IdentityOverride {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for IdentityOverride {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for IdentityOverride {
    fn from(id: String) -> Self {
        Self(id)
    }
}

struct ContextShared {
    base_url: Url,
    token: AccessToken,
    per_page: u32,
    transport: Arc<dyn Transport>,
}

/// Handle on one credential / base-URL pair
#[derive(Clone)]
pub struct CanvasContext {
    shared: Arc<ContextShared>,
    identity: Option<IdentityOverride>,
}

impl Debug for CanvasContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasContext")
            .field("base_url", &self.shared.base_url.as_str())
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl CanvasContext {
    /// Create a context backed by the HTTP transport
    ///
    /// # Errors
    ///
    /// Returns an error if the wire registry is inconsistent or the HTTP client cannot be built
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a context from a raw credential and base URL with default settings
    ///
    /// # Errors
    ///
    /// Returns an error if the URL or token is invalid
    pub fn from_parts(access_token: &str, base_url: &str) -> Result<Self, ConfigError> {
        Self::new(&ClientConfig::new(base_url, access_token)?)
    }

    /// Create a context over a custom transport
    ///
    /// # Errors
    ///
    /// Returns an error if the wire registry is inconsistent
    pub fn with_transport(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ConfigError> {
        let registry = wire_registry()?;
        info!(
            base_url = %config.base_url,
            enumerations = registry.len(),
            "created Canvas transport context"
        );
        Ok(Self {
            shared: Arc::new(ContextShared {
                base_url: config.base_url.clone(),
                token: config.access_token.clone(),
                per_page: config.per_page,
                transport,
            }),
            identity: None,
        })
    }

    /// Configured base URL
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.shared.base_url
    }

    /// Default page size for listings
    #[must_use]
    pub fn per_page(&self) -> u32 {
        self.shared.per_page
    }

    /// Active identity override, `None` when acting as the authenticated principal
    #[must_use]
    pub const fn identity(&self) -> Option<&IdentityOverride> {
        self.identity.as_ref()
    }

    /// Act as another user for every request sent through this handle
    pub fn set_override(&mut self, user: impl Into<IdentityOverride>) {
        let user = user.into();
        debug!(as_user = %user, "identity override set");
        self.identity = Some(user);
    }

    /// Return to the authenticated principal
    pub fn clear_override(&mut self) {
        if let Some(previous) = self.identity.take() {
            debug!(as_user = %previous, "identity override cleared");
        }
    }

    /// Derived handle acting as another user; this handle is unchanged
    #[must_use]
    pub fn as_user(&self, user: impl Into<IdentityOverride>) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            identity: Some(user.into()),
        }
    }

    /// Derived handle acting as the authenticated principal
    #[must_use]
    pub fn unmasked(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            identity: None,
        }
    }

    /// Set an override on this handle until the returned guard drops
    pub fn override_scope(&mut self, user: impl Into<IdentityOverride>) -> OverrideGuard<'_> {
        let previous = self.identity.clone();
        self.set_override(user);
        OverrideGuard {
            context: self,
            previous,
        }
    }

    /// Run an operation as another user
    ///
    /// The operation receives a derived masqueraded handle. This handle is never
    /// mutated, so nothing needs releasing when the operation fails or is dropped.
    ///
    /// # Errors
    ///
    /// Propagates the operation's error
    pub async fn with_override<T, F, Fut>(
        &self,
        user: impl Into<IdentityOverride>,
        operation: F,
    ) -> CanvasResult<T>
    where
        F: FnOnce(Self) -> Fut,
        Fut: Future<Output = CanvasResult<T>>,
    {
        operation(self.as_user(user)).await
    }

    /// Non-owning handle for follow-up calls from domain objects
    #[must_use]
    pub fn downgrade(&self) -> WeakContext {
        WeakContext {
            shared: Arc::downgrade(&self.shared),
            identity: self.identity.clone(),
        }
    }

    /// Perform one network exchange
    ///
    /// # Errors
    ///
    /// Returns a classified [`CanvasError`] for URL, transport, status or payload failures
    pub async fn send(&self, request: ApiRequest) -> CanvasResult<RawResponse> {
        let method = request.method;
        let prepared = self.prepare(request)?;
        debug!(
            %method,
            path = prepared.url.path(),
            as_user = self.identity.as_ref().map(IdentityOverride::as_str),
            "sending Canvas API request"
        );

        let url = prepared.url.to_string();
        match self.shared.transport.execute(prepared).await {
            Ok(response) => Ok(response),
            Err(error) => {
                warn!(%method, %url, kind = %error.kind(), "Canvas API request failed: {error}");
                Err(error)
            }
        }
    }

    /// Resolve a request into its wire form without sending it
    ///
    /// # Errors
    ///
    /// Returns an error for unparsable URLs or absolute URLs on a foreign origin
    pub fn prepare(&self, request: ApiRequest) -> CanvasResult<PreparedRequest> {
        let mut url = self.resolve(&request.target)?;

        let mut pairs: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != MASQUERADE_PARAM)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        pairs.extend(
            request
                .query
                .into_iter()
                .filter(|(key, _)| key != MASQUERADE_PARAM),
        );
        if let Some(identity) = &self.identity {
            pairs.push((MASQUERADE_PARAM.to_owned(), identity.as_str().to_owned()));
        }

        if pairs.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(pairs);
        }

        Ok(PreparedRequest {
            method: request.method,
            url,
            body: request.body,
            bearer: self.shared.token.clone(),
        })
    }

    fn resolve(&self, target: &RequestTarget) -> CanvasResult<Url> {
        let base = &self.shared.base_url;
        match target {
            RequestTarget::Path(path) => {
                let joined = format!(
                    "{}/{}",
                    base.as_str().trim_end_matches('/'),
                    path.trim_start_matches('/')
                );
                Url::parse(&joined).map_err(|e| CanvasError::InvalidUrl {
                    url: joined,
                    message: e.to_string(),
                })
            }
            RequestTarget::Absolute(raw) => {
                let url = Url::parse(raw).map_err(|e| CanvasError::InvalidUrl {
                    url: raw.clone(),
                    message: e.to_string(),
                })?;
                if url.origin() != base.origin() {
                    return Err(CanvasError::ForeignUrl {
                        url: raw.clone(),
                        origin: base.origin().ascii_serialization(),
                    });
                }
                Ok(url)
            }
        }
    }
}

/// Guard restoring the previous identity when dropped
pub struct OverrideGuard<'a> {
    context: &'a mut CanvasContext,
    previous: Option<IdentityOverride>,
}

impl Deref for OverrideGuard<'_> {
    type Target = CanvasContext;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl Drop for OverrideGuard<'_> {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(previous) => self.context.set_override(previous),
            None => self.context.clear_override(),
        }
    }
}

/// Non-owning handle to a context, kept by domain objects for follow-up calls
///
/// Holding one does not keep the context alive. It remembers the identity of
/// the handle it was taken from, so follow-ups act as the same user.
#[derive(Clone, Default)]
pub struct WeakContext {
    shared: Weak<ContextShared>,
    identity: Option<IdentityOverride>,
}

impl WeakContext {
    /// Handle that never upgrades, for objects built without a context
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    /// Recover a usable context
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ContextDropped`] once every owning handle is gone
    pub fn upgrade(&self, operation: &'static str) -> CanvasResult<CanvasContext> {
        let shared = self
            .shared
            .upgrade()
            .ok_or(CanvasError::ContextDropped { operation })?;
        Ok(CanvasContext {
            shared,
            identity: self.identity.clone(),
        })
    }

    /// Whether the owning context is still alive
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.shared.strong_count() > 0
    }
}

impl Debug for WeakContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakContext")
            .field("alive", &self.is_alive())
            .field("identity", &self.identity)
            .finish()
    }
}
