use super::{RegistrationStore, initial_status, new_key, non_empty, timestamp};
use crate::error::{RegistrationError, RegistrationErrorExt};
use async_trait::async_trait;
use gc_database::Database;
use gc_domain::registration::{NewRegistration, PaymentStatus, Registration, Team};
use surrealdb::types::SurrealValue;
use tracing::instrument;

/// Columns returned by every read, with the record key flattened to a string.
const PROJECTION: &str = "record::id(id) AS id, event_id, full_name, email, phone, team, \
                          payment_status, payment_reference, created_at";

#[derive(Debug, SurrealValue)]
struct RegistrationRow {
    id: String,
    event_id: String,
    full_name: String,
    email: String,
    phone: Option<String>,
    team: Option<String>,
    payment_status: String,
    payment_reference: Option<String>,
    created_at: String,
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = RegistrationError;

    fn try_from(row: RegistrationRow) -> Result<Self, Self::Error> {
        let corrupt = |field: &'static str, err: &dyn std::fmt::Display| {
            RegistrationError::Internal {
                message: format!("{field}: {err}").into(),
                context: Some(format!("Decoding registration {}", row.id).into()),
            }
        };

        let payment_status =
            row.payment_status.parse::<PaymentStatus>().map_err(|e| corrupt("payment_status", &e))?;
        let team = row
            .team
            .as_deref()
            .map(str::parse::<Team>)
            .transpose()
            .map_err(|e| corrupt("team", &e))?;

        Ok(Self {
            id: row.id,
            event_id: row.event_id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            team,
            payment_status,
            payment_reference: row.payment_reference,
            created_at: row.created_at,
        })
    }
}

/// `SurrealDB`-backed store over the `registration` table.
#[derive(Debug, Clone)]
pub struct SurrealRegistrationStore {
    db: Database,
}

impl SurrealRegistrationStore {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    async fn select(
        &self,
        clause: &str,
        binds: Vec<(&'static str, String)>,
    ) -> Result<Vec<Registration>, RegistrationError> {
        let sql = format!("SELECT {PROJECTION} FROM registration {clause}");
        let mut query = self.db.query(sql);
        for bind in binds {
            query = query.bind(bind);
        }

        let rows = query
            .await
            .context("Selecting registrations")?
            .take::<Vec<RegistrationRow>>(0)
            .context("Decoding registrations")?;

        rows.into_iter().map(Registration::try_from).collect()
    }

    async fn first(
        &self,
        clause: &str,
        binds: Vec<(&'static str, String)>,
    ) -> Result<Option<Registration>, RegistrationError> {
        Ok(self.select(clause, binds).await?.into_iter().next())
    }

    async fn update(
        &self,
        assignment: &str,
        id: &str,
        expected: PaymentStatus,
        binds: Vec<(&'static str, String)>,
    ) -> Result<Option<Registration>, RegistrationError> {
        let sql = format!(
            "UPDATE registration SET {assignment} \
             WHERE record::id(id) = $id AND payment_status = $expected \
             RETURN {PROJECTION}"
        );
        let mut query = self
            .db
            .query(sql)
            .bind(("id", id.to_owned()))
            .bind(("expected", expected.as_str().to_owned()));
        for bind in binds {
            query = query.bind(bind);
        }

        let rows = query
            .await
            .context("Updating registration")?
            .take::<Vec<RegistrationRow>>(0)
            .context("Decoding updated registration")?;

        rows.into_iter().next().map(Registration::try_from).transpose()
    }
}

#[async_trait]
impl RegistrationStore for SurrealRegistrationStore {
    #[instrument(skip(self, new), fields(event_id = %new.event_id))]
    async fn create(&self, new: NewRegistration) -> Result<Registration, RegistrationError> {
        let payment_status = initial_status(&new)?;
        let key = new_key();

        self.db
            .query(
                "CREATE registration CONTENT {
                    id: $key,
                    event_id: $event_id,
                    full_name: $full_name,
                    email: $email,
                    phone: $phone ?? NONE,
                    team: $team ?? NONE,
                    payment_status: $payment_status,
                    created_at: $created_at,
                }",
            )
            .bind(("key", key.clone()))
            .bind(("event_id", new.event_id))
            .bind(("full_name", new.full_name))
            .bind(("email", new.email))
            .bind(("phone", non_empty(new.phone)))
            .bind(("team", new.team.map(|t| t.as_str().to_owned())))
            .bind(("payment_status", payment_status.as_str().to_owned()))
            .bind(("created_at", timestamp()))
            .await
            .context("Creating registration")?
            .check()
            .map_err(surrealdb::Error::from)?;

        self.get(&key).await?.ok_or_else(|| RegistrationError::Internal {
            message: format!("registration {key} missing after create").into(),
            context: None,
        })
    }

    async fn get(&self, id: &str) -> Result<Option<Registration>, RegistrationError> {
        self.first("WHERE record::id(id) = $id LIMIT 1", vec![("id", id.to_owned())]).await
    }

    async fn find_by_reference(
        &self,
        reference: &str,
    ) -> Result<Vec<Registration>, RegistrationError> {
        self.select(
            "WHERE payment_reference = $reference ORDER BY created_at DESC",
            vec![("reference", reference.to_owned())],
        )
        .await
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Registration>, RegistrationError> {
        self.select(
            "WHERE event_id = $event_id ORDER BY created_at DESC",
            vec![("event_id", event_id.to_owned())],
        )
        .await
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Registration>, RegistrationError> {
        self.select(&format!("ORDER BY created_at DESC LIMIT {limit}"), Vec::new()).await
    }

    async fn count(&self) -> Result<u64, RegistrationError> {
        let total = self
            .db
            .query("RETURN count(SELECT id FROM registration)")
            .await
            .context("Counting registrations")?
            .take::<Option<i64>>(0)
            .context("Decoding count")?
            .unwrap_or_default();

        u64::try_from(total).map_err(|e| RegistrationError::Internal {
            message: e.to_string().into(),
            context: Some("Negative registration count".into()),
        })
    }

    async fn delete(&self, id: &str) -> Result<bool, RegistrationError> {
        if self.get(id).await?.is_none() {
            return Ok(false);
        }

        self.db
            .query("DELETE registration WHERE record::id(id) = $id")
            .bind(("id", id.to_owned()))
            .await
            .context("Deleting registration")?
            .check()
            .map_err(surrealdb::Error::from)?;
        Ok(true)
    }

    async fn latest_pending_by_phone(
        &self,
        variants: &[String],
    ) -> Result<Option<Registration>, RegistrationError> {
        if variants.is_empty() {
            return Ok(None);
        }

        let mut query = self.db.query(format!(
            "SELECT {PROJECTION} FROM registration \
             WHERE payment_status = 'pending' AND phone IN $variants \
             ORDER BY created_at DESC LIMIT 1"
        ));
        query = query.bind(("variants", variants.to_vec()));

        let rows = query
            .await
            .context("Selecting pending registration by phone")?
            .take::<Vec<RegistrationRow>>(0)
            .context("Decoding registrations")?;

        rows.into_iter().next().map(Registration::try_from).transpose()
    }

    async fn latest_pending(&self) -> Result<Option<Registration>, RegistrationError> {
        self.first("WHERE payment_status = 'pending' ORDER BY created_at DESC LIMIT 1", Vec::new())
            .await
    }

    #[instrument(skip(self))]
    async fn transition(
        &self,
        id: &str,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> Result<Option<Registration>, RegistrationError> {
        self.update("payment_status = $to", id, from, vec![("to", to.as_str().to_owned())]).await
    }

    #[instrument(skip(self))]
    async fn record_reference(
        &self,
        id: &str,
        reference: &str,
    ) -> Result<Option<Registration>, RegistrationError> {
        self.update(
            "payment_reference = $reference",
            id,
            PaymentStatus::Pending,
            vec![("reference", reference.to_owned())],
        )
        .await
    }
}
