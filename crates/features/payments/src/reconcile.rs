use crate::Payments;
use crate::error::PaymentError;
use crate::models::{MatchStrategy, Reconciliation};
use crate::normalize::{
    PHONE_KEYS, REFERENCE_KEYS, first_non_empty, payload_status, phone_variants,
};
use gc_domain::registration::{PaymentStatus, Registration};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Compare-and-set attempts per strategy before giving up on it.
pub const MAX_ATTEMPTS: usize = 3;

/// What the reference lookup decided.
enum ReferenceMatch {
    Updated(Registration),
    /// The row is protected; the cascade stops without a match.
    Kept,
    NotFound,
}

impl Payments {
    /// Applies one gateway callback to at most one registration.
    ///
    /// Strategies run in order and the first match wins: exact payment reference, then the
    /// newest pending registration with a matching phone, then the newest pending
    /// registration overall.
    ///
    /// # Errors
    /// Storage failures. A callback that matches nothing is not an error.
    #[instrument(skip_all)]
    pub async fn reconcile(&self, payload: &Value) -> Result<Reconciliation, PaymentError> {
        let status = payload_status(payload);
        let reference = first_non_empty(payload, &REFERENCE_KEYS);
        let phone = first_non_empty(payload, &PHONE_KEYS);
        info!(
            reference = ?reference,
            phone = ?phone,
            %status,
            "Callback hints extracted"
        );

        let outcome = |matched: Option<(Registration, MatchStrategy)>| Reconciliation {
            reference: reference.clone(),
            status,
            matched,
        };

        if let Some(reference) = reference.as_deref() {
            match self.by_reference(reference, status).await? {
                ReferenceMatch::Updated(registration) => {
                    info!(id = %registration.id, "Matched by payment reference");
                    return Ok(outcome(Some((registration, MatchStrategy::Reference))));
                },
                ReferenceMatch::Kept => return Ok(outcome(None)),
                ReferenceMatch::NotFound => debug!(reference, "No match by payment reference"),
            }
        }

        if let Some(phone) = phone.as_deref() {
            let variants = phone_variants(phone);
            if let Some(registration) = self.by_phone(&variants, status).await? {
                info!(id = %registration.id, "Matched by phone");
                return Ok(outcome(Some((registration, MatchStrategy::Phone))));
            }
            debug!(?variants, "No pending registration for phone");
        }

        if let Some(registration) = self.latest_pending(status).await? {
            warn!(
                id = %registration.id,
                "Matched the most recent pending registration; low confidence match"
            );
            return Ok(outcome(Some((registration, MatchStrategy::LatestPending))));
        }

        info!("Callback matched no registration");
        Ok(outcome(None))
    }

    async fn by_reference(
        &self,
        reference: &str,
        status: PaymentStatus,
    ) -> Result<ReferenceMatch, PaymentError> {
        let store = self.registrations.store();

        for _ in 0..MAX_ATTEMPTS {
            let mut rows = store.find_by_reference(reference).await?;
            let current = match rows.len() {
                0 => return Ok(ReferenceMatch::NotFound),
                1 => rows.remove(0),
                n => {
                    warn!(reference, matches = n, "Ambiguous payment reference; skipping");
                    return Ok(ReferenceMatch::NotFound);
                },
            };

            if current.payment_status == status {
                debug!(id = %current.id, %status, "Status already applied");
                return Ok(ReferenceMatch::Updated(current));
            }
            if current.payment_status == PaymentStatus::Free
                || (current.payment_status.is_terminal() && self.webhook.protect_terminal_status)
            {
                warn!(
                    id = %current.id,
                    stored = %current.payment_status,
                    received = %status,
                    "Conflicting callback for a settled registration; keeping stored status"
                );
                return Ok(ReferenceMatch::Kept);
            }

            if let Some(updated) =
                self.registrations.transition(&current.id, current.payment_status, status).await?
            {
                return Ok(ReferenceMatch::Updated(updated));
            }
            debug!(id = %current.id, "Lost status race; retrying");
        }

        warn!(reference, "Gave up on payment reference after repeated races");
        Ok(ReferenceMatch::NotFound)
    }

    async fn by_phone(
        &self,
        variants: &[String],
        status: PaymentStatus,
    ) -> Result<Option<Registration>, PaymentError> {
        let store = self.registrations.store();
        for _ in 0..MAX_ATTEMPTS {
            let Some(candidate) = store.latest_pending_by_phone(variants).await? else {
                return Ok(None);
            };
            if let Some(updated) = self.settle_pending(&candidate, status).await? {
                return Ok(Some(updated));
            }
        }
        Ok(None)
    }

    async fn latest_pending(
        &self,
        status: PaymentStatus,
    ) -> Result<Option<Registration>, PaymentError> {
        let store = self.registrations.store();
        for _ in 0..MAX_ATTEMPTS {
            let Some(candidate) = store.latest_pending().await? else {
                return Ok(None);
            };
            if let Some(updated) = self.settle_pending(&candidate, status).await? {
                return Ok(Some(updated));
            }
        }
        Ok(None)
    }

    /// `None` when another writer settled the candidate first.
    async fn settle_pending(
        &self,
        candidate: &Registration,
        status: PaymentStatus,
    ) -> Result<Option<Registration>, PaymentError> {
        let updated =
            self.registrations.transition(&candidate.id, PaymentStatus::Pending, status).await?;
        if updated.is_none() {
            debug!(id = %candidate.id, "Lost status race; re-selecting");
        }
        Ok(updated)
    }
}
