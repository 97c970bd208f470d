use std::borrow::Cow;

#[gc_derive::gc_error]
pub enum ResourceGuardError {
    #[error("Resource validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Validation of record identifiers received from clients.
#[derive(Debug)]
pub struct ResourceGuard;

impl ResourceGuard {
    /// Returns the bare record key of `id` for `expected_table`.
    ///
    /// Accepts `key` or `table:key`. Rejects ids of another table (e.g. `migration:x` sent to a
    /// registration endpoint), empty keys and characters outside `[A-Za-z0-9_-]`.
    pub fn key<I, T>(id: I, expected_table: T) -> Result<String, ResourceGuardError>
    where
        I: AsRef<str>,
        T: AsRef<str>,
    {
        let id_ref = id.as_ref().trim();
        let table_ref = expected_table.as_ref();

        let key = match id_ref.split_once(':') {
            Some((table, key)) if table == table_ref => key,
            Some((table, _)) => {
                return Err(ResourceGuardError::Validation {
                    message: format!("Expected '{table_ref}', got '{table}'").into(),
                    context: Some("ID table mismatch".into()),
                });
            },
            None => id_ref,
        };

        if key.is_empty() || !key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        {
            return Err(ResourceGuardError::Validation {
                message: format!("Malformed key '{key}'").into(),
                context: Some(table_ref.to_owned().into()),
            });
        }

        Ok(key.to_owned())
    }

    /// Returns the fully qualified `table:key` form.
    pub fn verify<I, T>(id: I, expected_table: T) -> Result<String, ResourceGuardError>
    where
        I: AsRef<str>,
        T: AsRef<str>,
    {
        let key = Self::key(id, expected_table.as_ref())?;
        Ok(format!("{}:{key}", expected_table.as_ref()))
    }
}
