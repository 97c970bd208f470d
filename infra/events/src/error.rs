use std::borrow::Cow;

/// Errors that can occur during event bus operations.
#[gc_derive::gc_error]
pub enum EventBusError {
    /// A channel registered under this type id holds a different sender type.
    #[error("Type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Capacity must be greater than zero.
    #[error("Invalid capacity{}: {message}", format_context(.context))]
    InvalidCapacity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
