//! Page-lifetime session state.
//!
//! One struct owns the captured credential, the session context, the
//! continue-watching collection reference and the attempt guards, instead of
//! scattering them as ambient singletons. Every guard is a check-and-set
//! inside the same lock, so two triggers racing between a check and a set
//! cannot both dispatch.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use unwatch_api::types::{SessionContext, WatchHistoryEntry};

/// Result of feeding a captured `Authorization` value into the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialCapture {
    /// Empty value; the prior credential (if any) is untouched.
    Ignored,
    /// Value stored, overwriting any prior credential.
    Stored,
}

/// Gate decision for the lazy collection resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionGate {
    /// Caller won the gate and must resolve, then report back through
    /// [`SessionState::finish_collection_resolution`].
    Begin,
    /// Another resolution is in flight; this caller backs off.
    Busy,
    /// Already resolved.
    Resolved(String),
    /// Resolution was attempted and failed, or found no matching container.
    /// Never retried within this page lifetime.
    Unavailable,
}

#[derive(Default)]
enum CollectionState {
    #[default]
    Unresolved,
    InFlight,
    Resolved(String),
    Unavailable,
}

#[derive(Default)]
struct Inner {
    credential: Option<String>,
    context: SessionContext,
    context_attempted: bool,
    collection: CollectionState,
    snooped: HashMap<String, WatchHistoryEntry>,
}

#[derive(Default)]
pub struct SessionState {
    inner: Mutex<Inner>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a captured `Authorization` value. Re-capture overwrites; an
    /// empty value is a no-op that leaves the prior credential unchanged.
    pub fn capture_credential(&self, value: &str) -> CredentialCapture {
        if value.is_empty() {
            return CredentialCapture::Ignored;
        }
        self.lock().credential = Some(value.to_string());
        CredentialCapture::Stored
    }

    pub fn credential(&self) -> Option<String> {
        self.lock().credential.clone()
    }

    /// Current session context: the resolved one, or the defaults while
    /// resolution has not (or never) succeeded.
    pub fn context(&self) -> SessionContext {
        self.lock().context.clone()
    }

    /// Claim the single context-resolution attempt. Returns `true` for
    /// exactly one caller per page lifetime.
    pub fn try_begin_context_resolution(&self) -> bool {
        let mut inner = self.lock();
        if inner.context_attempted {
            false
        } else {
            inner.context_attempted = true;
            true
        }
    }

    /// Replace the context wholesale. Partial updates are not representable.
    pub fn install_context(&self, context: SessionContext) {
        self.lock().context = context;
    }

    pub fn begin_collection_resolution(&self) -> CollectionGate {
        let mut inner = self.lock();
        match &inner.collection {
            CollectionState::Unresolved => {
                inner.collection = CollectionState::InFlight;
                CollectionGate::Begin
            }
            CollectionState::InFlight => CollectionGate::Busy,
            CollectionState::Resolved(id) => CollectionGate::Resolved(id.clone()),
            CollectionState::Unavailable => CollectionGate::Unavailable,
        }
    }

    /// Settle the collection resolution. `None` settles as `Unavailable`;
    /// either way the state never returns to `Unresolved`.
    pub fn finish_collection_resolution(&self, set_id: Option<String>) {
        self.lock().collection = match set_id {
            Some(id) => CollectionState::Resolved(id),
            None => CollectionState::Unavailable,
        };
    }

    /// Pre-populate entries from a watch-history response the host fetched
    /// itself, so a later removal can skip the set query.
    pub fn snoop_entries(&self, entries: Vec<WatchHistoryEntry>) {
        let mut inner = self.lock();
        for entry in entries {
            inner.snooped.insert(entry.entry_id.clone(), entry);
        }
    }

    pub fn snooped_entry(&self, entry_id: &str) -> Option<WatchHistoryEntry> {
        self.lock().snooped.get(entry_id).cloned()
    }
}
