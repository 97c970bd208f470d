use super::{RegistrationStore, initial_status, new_key, non_empty, timestamp};
use crate::error::RegistrationError;
use async_trait::async_trait;
use gc_domain::registration::{NewRegistration, PaymentStatus, Registration};
use parking_lot::RwLock;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug)]
struct Entry {
    /// Insertion order; breaks `created_at` ties.
    seq: u64,
    registration: Registration,
}

#[derive(Debug, Default)]
struct State {
    next_seq: u64,
    rows: HashMap<String, Entry>,
}

impl State {
    /// Rows matching `filter`, newest first.
    fn newest(&self, filter: impl Fn(&Registration) -> bool) -> Vec<Registration> {
        let mut rows: Vec<&Entry> = self.rows.values().filter(|e| filter(&e.registration)).collect();
        rows.sort_by_key(|e| Reverse((e.registration.created_at.clone(), e.seq)));
        rows.into_iter().map(|e| e.registration.clone()).collect()
    }
}

/// Thread-safe registration store kept in process memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRegistrationStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryRegistrationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row as-is, bypassing creation rules. Useful for seeding fixtures.
    pub fn insert(&self, registration: Registration) {
        let mut state = self.state.write();
        let seq = state.next_seq;
        state.next_seq += 1;
        state.rows.insert(registration.id.clone(), Entry { seq, registration });
    }
}

#[async_trait]
impl RegistrationStore for InMemoryRegistrationStore {
    async fn create(&self, new: NewRegistration) -> Result<Registration, RegistrationError> {
        let payment_status = initial_status(&new)?;
        let registration = Registration {
            id: new_key(),
            event_id: new.event_id,
            full_name: new.full_name,
            email: new.email,
            phone: non_empty(new.phone),
            team: new.team,
            payment_status,
            payment_reference: None,
            created_at: timestamp(),
        };
        self.insert(registration.clone());
        Ok(registration)
    }

    async fn get(&self, id: &str) -> Result<Option<Registration>, RegistrationError> {
        Ok(self.state.read().rows.get(id).map(|e| e.registration.clone()))
    }

    async fn find_by_reference(
        &self,
        reference: &str,
    ) -> Result<Vec<Registration>, RegistrationError> {
        Ok(self.state.read().newest(|r| r.payment_reference.as_deref() == Some(reference)))
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Registration>, RegistrationError> {
        Ok(self.state.read().newest(|r| r.event_id == event_id))
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Registration>, RegistrationError> {
        let mut rows = self.state.read().newest(|_| true);
        rows.truncate(limit);
        Ok(rows)
    }

    async fn count(&self) -> Result<u64, RegistrationError> {
        Ok(self.state.read().rows.len() as u64)
    }

    async fn delete(&self, id: &str) -> Result<bool, RegistrationError> {
        Ok(self.state.write().rows.remove(id).is_some())
    }

    async fn latest_pending_by_phone(
        &self,
        variants: &[String],
    ) -> Result<Option<Registration>, RegistrationError> {
        let rows = self.state.read().newest(|r| {
            r.payment_status == PaymentStatus::Pending
                && r.phone.as_ref().is_some_and(|phone| variants.contains(phone))
        });
        Ok(rows.into_iter().next())
    }

    async fn latest_pending(&self) -> Result<Option<Registration>, RegistrationError> {
        let rows = self.state.read().newest(|r| r.payment_status == PaymentStatus::Pending);
        Ok(rows.into_iter().next())
    }

    async fn transition(
        &self,
        id: &str,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> Result<Option<Registration>, RegistrationError> {
        let mut state = self.state.write();
        Ok(state.rows.get_mut(id).and_then(|entry| {
            (entry.registration.payment_status == from).then(|| {
                entry.registration.payment_status = to;
                entry.registration.clone()
            })
        }))
    }

    async fn record_reference(
        &self,
        id: &str,
        reference: &str,
    ) -> Result<Option<Registration>, RegistrationError> {
        let mut state = self.state.write();
        Ok(state.rows.get_mut(id).and_then(|entry| {
            (entry.registration.payment_status == PaymentStatus::Pending).then(|| {
                entry.registration.payment_reference = Some(reference.to_owned());
                entry.registration.clone()
            })
        }))
    }
}
