use std::collections::HashMap;
use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use bridge_core::models::field::Flag;

use crate::error::TokenError;
use crate::token::{ConfirmationToken, PendingAssessment};

pub const DEFAULT_TTL: SignedDuration = SignedDuration::from_mins(10);

enum Slot {
    Pending(ConfirmationToken),
    Consumed { at: Timestamp },
    Expired { at: Timestamp },
}

/// Shared store of pending confirmations.
///
/// Every operation takes the one lock, so check-and-invalidate is atomic:
/// of two concurrent confirms for the same token exactly one succeeds.
/// Consumed and expired tokens leave a tombstone for `retention` so a late
/// caller learns why the token was refused.
#[derive(Clone)]
pub struct TokenStore {
    slots: Arc<Mutex<HashMap<Uuid, Slot>>>,
    ttl: SignedDuration,
    retention: SignedDuration,
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl TokenStore {
    pub fn new(ttl: SignedDuration) -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
            ttl,
            retention: ttl,
        }
    }

    pub fn with_retention(mut self, retention: SignedDuration) -> Self {
        self.retention = retention;
        self
    }

    pub fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    /// Park a pending batch and hand back its token.
    pub async fn issue(
        &self,
        pending: PendingAssessment,
        flags: Vec<Flag>,
        now: Timestamp,
    ) -> ConfirmationToken {
        let token = ConfirmationToken {
            id: Uuid::new_v4(),
            created_at: now,
            ttl: self.ttl,
            has_critical_flag: flags.iter().any(Flag::is_critical),
            pending,
            flags,
        };

        let mut slots = self.slots.lock().await;
        slots.insert(token.id, Slot::Pending(token.clone()));
        info!(
            token = %token.id,
            critical = token.has_critical_flag,
            pending = slots.len(),
            "confirmation token issued"
        );
        token
    }

    /// Atomically check a token, run `f` on it and invalidate it.
    ///
    /// The token is consumed only when `f` succeeds; if `f` rejects the
    /// operator's input the token stays pending so the values can be
    /// corrected and resubmitted. `f` runs under the store lock and must not
    /// block.
    pub async fn consume_with<T, E, F>(&self, id: Uuid, now: Timestamp, f: F) -> Result<T, E>
    where
        F: FnOnce(&ConfirmationToken) -> Result<T, E>,
        E: From<TokenError>,
    {
        let mut slots = self.slots.lock().await;
        let token = match slots.get(&id) {
            None => return Err(TokenError::Unknown(id).into()),
            Some(Slot::Consumed { .. }) => return Err(TokenError::Consumed(id).into()),
            Some(Slot::Expired { .. }) => return Err(TokenError::Expired(id).into()),
            Some(Slot::Pending(token)) => token,
        };

        if token.is_expired(now) {
            slots.insert(id, Slot::Expired { at: now });
            debug!(token = %id, "confirmation token expired on use");
            return Err(TokenError::Expired(id).into());
        }

        let out = f(token)?;
        slots.insert(id, Slot::Consumed { at: now });
        info!(token = %id, "confirmation token consumed");
        Ok(out)
    }

    /// Expire overdue tokens and forget old tombstones. Returns the number
    /// of tokens expired by this sweep.
    pub async fn sweep(&self, now: Timestamp) -> usize {
        let retention = self.retention;
        let forget = |at: &Timestamp| at.checked_add(retention).is_ok_and(|until| now >= until);

        let mut slots = self.slots.lock().await;
        let mut expired = 0;
        slots.retain(|_, slot| {
            if matches!(slot, Slot::Pending(token) if token.is_expired(now)) {
                *slot = Slot::Expired { at: now };
                expired += 1;
                return true;
            }
            match slot {
                Slot::Pending(_) => true,
                Slot::Consumed { at } | Slot::Expired { at } => !forget(at),
            }
        });

        if expired > 0 {
            debug!(expired, remaining = slots.len(), "token sweep");
        }
        expired
    }

    /// Number of tokens still awaiting confirmation.
    pub async fn pending_count(&self) -> usize {
        self.slots
            .lock()
            .await
            .values()
            .filter(|s| matches!(s, Slot::Pending(_)))
            .count()
    }
}
