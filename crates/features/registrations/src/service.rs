use crate::Registrations;
use crate::error::RegistrationError;
use crate::events::RegistrationChanged;
use crate::store::RegistrationStore;
use gc_domain::registration::{NewRegistration, PaymentStatus, Registration};
use gc_event_bus::EventReceiverExt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Upper bound for status long-polls.
pub const MAX_WAIT: Duration = Duration::from_secs(60);

impl Registrations {
    #[must_use]
    pub fn store(&self) -> &Arc<dyn RegistrationStore> {
        &self.store
    }

    pub async fn create(&self, new: NewRegistration) -> Result<Registration, RegistrationError> {
        let registration = self.store.create(new).await?;
        info!(
            id = %registration.id,
            event_id = %registration.event_id,
            status = %registration.payment_status,
            "Registration created"
        );
        Ok(registration)
    }

    /// Like [`RegistrationStore::get`], but a missing row is an error.
    pub async fn get(&self, id: &str) -> Result<Registration, RegistrationError> {
        self.store.get(id).await?.ok_or_else(|| RegistrationError::NotFound {
            message: id.to_owned().into(),
            context: None,
        })
    }

    /// Attaches a minted payment reference to a `pending` registration.
    ///
    /// # Errors
    /// [`RegistrationError::NotFound`] for an unknown id, [`RegistrationError::Conflict`] when
    /// the registration is no longer `pending`.
    pub async fn record_reference(
        &self,
        id: &str,
        reference: &str,
    ) -> Result<Registration, RegistrationError> {
        if let Some(updated) = self.store.record_reference(id, reference).await? {
            info!(id, reference, "Payment reference recorded");
            self.notify(&updated);
            return Ok(updated);
        }

        let current = self.get(id).await?;
        Err(RegistrationError::Conflict {
            message: format!("registration is {}", current.payment_status).into(),
            context: Some("Recording payment reference".into()),
        })
    }

    /// Compare-and-set of the payment status. Publishes [`RegistrationChanged`] on success.
    pub async fn transition(
        &self,
        id: &str,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> Result<Option<Registration>, RegistrationError> {
        let updated = self.store.transition(id, from, to).await?;
        if let Some(registration) = &updated {
            self.notify(registration);
        }
        Ok(updated)
    }

    /// Waits up to `wait` (capped at [`MAX_WAIT`]) for a `pending` registration to settle.
    ///
    /// Returns immediately when the registration is not `pending` or `wait` is zero. On
    /// timeout the current row is returned, still `pending`.
    pub async fn wait_for_settlement(
        &self,
        id: &str,
        wait: Duration,
    ) -> Result<Registration, RegistrationError> {
        // Subscribe before reading so a change between the two is not missed.
        let mut changes = self.events.subscribe::<RegistrationChanged>()?;

        let current = self.get(id).await?;
        if current.payment_status != PaymentStatus::Pending || wait.is_zero() {
            return Ok(current);
        }

        let deadline = tokio::time::Instant::now() + wait.min(MAX_WAIT);
        loop {
            match tokio::time::timeout_at(deadline, changes.recv_event()).await {
                Ok(Some(event))
                    if event.registration.id == current.id
                        && event.registration.payment_status != PaymentStatus::Pending =>
                {
                    return Ok(event.registration.clone());
                },
                Ok(Some(_)) => {},
                Ok(None) | Err(_) => {
                    debug!(id, "Settlement wait ended without a status change");
                    return self.get(id).await;
                },
            }
        }
    }

    fn notify(&self, registration: &Registration) {
        let event = RegistrationChanged { registration: registration.clone() };
        if let Err(err) = self.events.publish(event) {
            warn!(id = %registration.id, error = %err, "Failed to publish registration change");
        }
    }
}
