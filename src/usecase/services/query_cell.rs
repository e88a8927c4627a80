//! Fetch lifecycle for one view section.
//!
//! A [`QueryCell`] owns what a section displays (`data`, `loading`, `error`)
//! and decides whether a finished request may touch it. Each request gets a
//! [`RequestTicket`] carrying a generation number and a cancellation token;
//! beginning a new request cancels the previous token and bumps the
//! generation, so a late answer for a superseded key is dropped on arrival.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::entities::query::QueryKey;
use crate::usecase::ports::catalog::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetainPolicy {
    /// Keep showing the last committed data while the next key loads.
    KeepPrevious,
    Clear,
}

#[derive(Debug, Clone)]
pub struct RequestTicket {
    key: QueryKey,
    generation: u64,
    token: CancellationToken,
}

impl RequestTicket {
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Committed,
    Failed,
    Cancelled,
    Superseded,
}

#[derive(Debug)]
struct Pending {
    key: QueryKey,
    generation: u64,
    token: CancellationToken,
}

#[derive(Debug)]
pub struct QueryCell<T> {
    data: Option<T>,
    error: Option<ApiError>,
    committed_key: Option<QueryKey>,
    pending: Option<Pending>,
    generation: u64,
    policy: RetainPolicy,
}

impl<T> QueryCell<T> {
    pub fn new(policy: RetainPolicy) -> Self {
        Self {
            data: None,
            error: None,
            committed_key: None,
            pending: None,
            generation: 0,
            policy,
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_key(&self) -> Option<&QueryKey> {
        self.pending.as_ref().map(|pending| &pending.key)
    }

    /// Starts a request for `key`, or returns `None` when that key is
    /// already in flight or already committed.
    pub fn begin(&mut self, key: QueryKey, parent: &CancellationToken) -> Option<RequestTicket> {
        if self.pending_key() == Some(&key) {
            return None;
        }
        if self.pending.is_none()
            && self.error.is_none()
            && self.data.is_some()
            && self.committed_key.as_ref() == Some(&key)
        {
            return None;
        }

        if let Some(previous) = self.pending.take() {
            debug!(key = %previous.key, "superseding in-flight request");
            previous.token.cancel();
        }

        self.generation += 1;
        let token = parent.child_token();
        self.pending = Some(Pending {
            key: key.clone(),
            generation: self.generation,
            token: token.clone(),
        });
        self.error = None;
        if self.policy == RetainPolicy::Clear {
            self.data = None;
            self.committed_key = None;
        }

        Some(RequestTicket {
            key,
            generation: self.generation,
            token,
        })
    }

    pub fn resolve(&mut self, ticket: RequestTicket, result: Result<T, ApiError>) -> Resolution {
        let is_current = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.generation == ticket.generation);
        if !is_current {
            debug!(key = %ticket.key, "dropping superseded response");
            return Resolution::Superseded;
        }
        self.pending = None;

        match result {
            Ok(data) => {
                self.data = Some(data);
                self.committed_key = Some(ticket.key);
                Resolution::Committed
            }
            Err(ApiError::Cancelled) => Resolution::Cancelled,
            Err(error) => {
                self.data = None;
                self.committed_key = None;
                self.error = Some(error);
                Resolution::Failed
            }
        }
    }

    /// Forgets the committed key so the next `begin` refetches it.
    pub fn invalidate(&mut self) {
        self.committed_key = None;
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.token.cancel();
        }
    }
}

/// Races `future` against `token`; cancellation wins as [`ApiError::Cancelled`].
pub async fn or_cancel<T, F>(future: F, token: &CancellationToken) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    tokio::select! {
        _ = token.cancelled() => Err(ApiError::Cancelled),
        result = future => result,
    }
}
