use gc_event_bus::EventBusError;
use gc_kernel::security::resource::ResourceGuardError;
use std::borrow::Cow;

/// A specialized [`RegistrationError`] enum of this crate.
#[gc_derive::gc_error]
pub enum RegistrationError {
    /// Invalid input from a client.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Registration not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The registration is not in a state that allows the operation.
    #[error("Registration conflict{}: {message}", format_context(.context))]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid identifier{}: {source}", format_context(.context))]
    Guard { source: ResourceGuardError, context: Option<Cow<'static, str>> },

    #[error("SurrealDB error{}: {source}", format_context(.context))]
    Database { source: surrealdb::Error, context: Option<Cow<'static, str>> },

    #[error("Event bus error{}: {source}", format_context(.context))]
    Events { source: EventBusError, context: Option<Cow<'static, str>> },

    #[error("Internal registration error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[cfg(feature = "server")]
mod response {
    use super::RegistrationError;
    use axum::Json;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use gc_derive::api_model;

    #[api_model]
    /// Error body returned by registration endpoints.
    pub struct ErrorResponse {
        pub error: String,
    }

    impl RegistrationError {
        #[must_use]
        pub const fn status_code(&self) -> StatusCode {
            match self {
                Self::Validation { .. } | Self::Guard { .. } => StatusCode::BAD_REQUEST,
                Self::NotFound { .. } => StatusCode::NOT_FOUND,
                Self::Conflict { .. } => StatusCode::CONFLICT,
                Self::Database { .. } | Self::Events { .. } | Self::Internal { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                },
            }
        }
    }

    impl IntoResponse for RegistrationError {
        fn into_response(self) -> Response {
            let status = self.status_code();
            let error = if status.is_server_error() {
                tracing::error!(error = %self, "Registration request failed");
                "Internal server error".to_owned()
            } else {
                self.to_string()
            };
            (status, Json(ErrorResponse { error })).into_response()
        }
    }
}

#[cfg(feature = "server")]
pub use response::ErrorResponse;
