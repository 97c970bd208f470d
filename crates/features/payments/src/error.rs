use gc_kernel::security::resource::ResourceGuardError;
use gc_registrations::RegistrationError;
use std::borrow::Cow;

/// A specialized [`PaymentError`] enum of this crate.
#[gc_derive::gc_error]
pub enum PaymentError {
    /// Invalid initiation request.
    #[error("{message}{}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid registration id{}: {source}", format_context(.context))]
    Guard { source: ResourceGuardError, context: Option<Cow<'static, str>> },

    #[error("{source}{}", format_context(.context))]
    Registration { source: RegistrationError, context: Option<Cow<'static, str>> },

    /// The outbound HTTP client could not be built.
    #[error("Gateway client error{}: {source}", format_context(.context))]
    Client { source: reqwest::Error, context: Option<Cow<'static, str>> },

    #[error("Internal payment error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[cfg(feature = "server")]
mod response {
    use super::PaymentError;
    use crate::models::InitiatePaymentResponse;
    use axum::Json;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};

    impl PaymentError {
        #[must_use]
        pub fn status_code(&self) -> StatusCode {
            match self {
                Self::Validation { .. } | Self::Guard { .. } => StatusCode::BAD_REQUEST,
                Self::Registration { source, .. } => source.status_code(),
                Self::Client { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    /// Errors are rendered in the initiation response shape, `{success: false, error}`.
    impl IntoResponse for PaymentError {
        fn into_response(self) -> Response {
            let status = self.status_code();
            let error = if status.is_server_error() {
                tracing::error!(error = %self, "Payment request failed");
                "Internal server error".to_owned()
            } else {
                self.to_string()
            };
            (status, Json(InitiatePaymentResponse::failure(error, None))).into_response()
        }
    }
}
