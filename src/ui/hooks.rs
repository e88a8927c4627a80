use std::future::Future;

use dioxus::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::domain::entities::query::QueryKey;
use crate::usecase::ports::catalog::ApiError;
use crate::usecase::services::query_cell::{or_cancel, QueryCell, RetainPolicy};

/// Handle returned by [`use_keyed_query`].
pub struct KeyedQuery<T: 'static> {
    pub cell: Signal<QueryCell<T>>,
    nonce: Signal<u64>,
}

impl<T: 'static> Clone for KeyedQuery<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for KeyedQuery<T> {}

impl<T: Clone + 'static> KeyedQuery<T> {
    pub fn data(&self) -> Option<T> {
        self.cell.read().data().cloned()
    }

    pub fn error(&self) -> Option<ApiError> {
        self.cell.read().error().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.cell.read().is_loading()
    }

    /// Fetches the current key again even if it is already committed.
    pub fn refetch(mut self) {
        self.cell.write().invalidate();
        *self.nonce.write() += 1;
    }
}

/// Binds a [`QueryCell`] to the signals read inside `request`.
///
/// `request` runs inside an effect, so every signal it reads becomes a
/// dependency. It returns the key for the current inputs together with the
/// (not yet polled) fetch, or `None` when there is nothing to fetch. Keys
/// already in flight or already committed are skipped; a new key cancels
/// the request it replaces. All requests are cancelled when the component
/// unmounts.
pub fn use_keyed_query<T, Fut>(
    policy: RetainPolicy,
    mut request: impl FnMut() -> Option<(QueryKey, Fut)> + 'static,
) -> KeyedQuery<T>
where
    T: 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let mut cell = use_signal(|| QueryCell::new(policy));
    let nonce = use_signal(|| 0_u64);
    let root = use_hook(CancellationToken::new);

    let root_for_drop = root.clone();
    use_drop(move || root_for_drop.cancel());

    use_effect(move || {
        let _ = nonce();
        let Some((key, fetch)) = request() else {
            cell.write().cancel();
            return;
        };
        let Some(ticket) = cell.write().begin(key, &root) else {
            return;
        };
        spawn(async move {
            let result = or_cancel(fetch, ticket.token()).await;
            let resolution = cell.write().resolve(ticket, result);
            trace!(?resolution, "query resolved");
        });
    });

    KeyedQuery { cell, nonce }
}
