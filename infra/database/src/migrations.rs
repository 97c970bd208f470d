use crate::error::{DatabaseError, DatabaseErrorExt};
use fxhash::FxHashMap;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::types::SurrealValue;

const BOOTSTRAP: &str = "
    DEFINE TABLE IF NOT EXISTS migration SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS slice ON migration TYPE string;
    DEFINE FIELD IF NOT EXISTS version ON migration TYPE string;
    DEFINE FIELD IF NOT EXISTS checksum ON migration TYPE string;
    DEFINE FIELD IF NOT EXISTS applied_at ON migration TYPE datetime DEFAULT time::now();
    DEFINE INDEX IF NOT EXISTS migration_slice_version ON migration FIELDS slice, version UNIQUE;
";

/// A versioned `SurrealQL` script owned by a feature slice.
///
/// Scripts are applied once, in the order they are registered, and identified by
/// `slice:version`. Editing an applied script is reported as checksum drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    slice: &'static str,
    version: &'static str,
    script: &'static str,
}

impl Migration {
    #[must_use]
    pub const fn new(slice: &'static str, version: &'static str, script: &'static str) -> Self {
        Self { slice, version, script }
    }

    #[must_use]
    pub const fn slice(&self) -> &'static str {
        self.slice
    }

    #[must_use]
    pub const fn version(&self) -> &'static str {
        self.version
    }

    /// Stable fingerprint of the script body.
    #[must_use]
    pub fn checksum(&self) -> String {
        format!("{:016x}", fxhash::hash64(self.script.trim()))
    }

    fn key(&self) -> String {
        format!("{}:{}", self.slice, self.version)
    }
}

#[derive(Debug, Default)]
pub(crate) struct MigrationReport {
    pub applied: Vec<String>,
    pub skipped: Vec<String>,
}

#[derive(Debug, SurrealValue)]
struct AppliedMigration {
    slice: String,
    version: String,
    checksum: String,
}

#[derive(Debug)]
pub(crate) struct MigrationRunner<'a> {
    db: &'a Surreal<Any>,
}

impl<'a> MigrationRunner<'a> {
    pub(crate) const fn new(db: &'a Surreal<Any>) -> Self {
        Self { db }
    }

    pub(crate) async fn run(&self, migrations: &[Migration]) -> Result<MigrationReport, DatabaseError> {
        self.db
            .query(BOOTSTRAP)
            .await
            .context("Bootstrapping migration table")?
            .check()
            .map_err(surrealdb::Error::from)?;

        let applied = self.applied_migrations().await?;
        let mut report = MigrationReport::default();

        for migration in migrations {
            let key = migration.key();
            if let Some(existing) = applied.get(&key) {
                ensure_checksum_match(migration, &existing.checksum)?;
                report.skipped.push(key);
                continue;
            }

            self.apply(migration).await?;
            report.applied.push(key);
        }

        Ok(report)
    }

    async fn apply(&self, migration: &Migration) -> Result<(), DatabaseError> {
        let query = format!(
            "BEGIN TRANSACTION;
            {}
            CREATE migration CONTENT {{ slice: $slice, version: $version, checksum: $checksum }};
            COMMIT TRANSACTION;",
            migration.script,
        );

        self.db
            .query(query)
            .bind(("slice", migration.slice))
            .bind(("version", migration.version))
            .bind(("checksum", migration.checksum()))
            .await
            .context(format!("SQL execution failed at {}", migration.key()))?
            .check()
            .map_err(surrealdb::Error::from)?;

        Ok(())
    }

    async fn applied_migrations(&self) -> Result<FxHashMap<String, AppliedMigration>, DatabaseError> {
        let entries = self
            .db
            .query("SELECT slice, version, checksum FROM migration")
            .await
            .context("Loading applied migrations")?
            .take::<Vec<AppliedMigration>>(0)
            .context("Parsing applied migrations")?;

        Ok(entries
            .into_iter()
            .map(|entry| (format!("{}:{}", entry.slice, entry.version), entry))
            .collect())
    }
}

fn ensure_checksum_match(migration: &Migration, existing: &str) -> Result<(), DatabaseError> {
    let expected = migration.checksum();
    if existing != expected {
        return Err(DatabaseError::Migration {
            message: format!(
                "Checksum mismatch for {} (recorded {existing}, current {expected})",
                migration.key()
            )
            .into(),
            context: Some("Migration already applied with different content".into()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_ignores_surrounding_whitespace() {
        let a = Migration::new("registrations", "0001", "DEFINE TABLE x;");
        let b = Migration::new("registrations", "0001", "\n  DEFINE TABLE x;\n");
        assert_eq!(a.checksum(), b.checksum());
        assert_eq!(a.checksum().len(), 16);
    }

    #[test]
    fn checksum_changes_with_content() {
        let a = Migration::new("registrations", "0001", "DEFINE TABLE x;");
        let b = Migration::new("registrations", "0001", "DEFINE TABLE y;");
        assert_ne!(a.checksum(), b.checksum());
    }

    #[test]
    fn drift_is_reported() {
        let m = Migration::new("registrations", "0001", "DEFINE TABLE x;");
        let err = ensure_checksum_match(&m, "0000000000000000").unwrap_err();
        assert!(matches!(err, DatabaseError::Migration { .. }));
        assert!(ensure_checksum_match(&m, &m.checksum()).is_ok());
    }
}
