#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every crate of the checkout workspace.
//!
//! * [`gc_error`] turns a plain enum into a context-aware error type.
//! * [`api_model`] and [`api_handler`] keep DTOs and Axum handlers consistent with the
//!   `OpenAPI` documentation.
//! * [`gc_slice`] wraps feature state into a cheaply clonable, registrable slice.
//!
//! The examples below are `ignore`d because they only compile inside consuming crates.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro to define a standard API data model.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug`, `Serialize` and `Deserialize` when missing.
/// * **`OpenAPI`**: `utoipa::ToSchema` when the consuming crate enables its `server` feature.
/// * **Serde Policy**: `rename_all = "camelCase"` and `deny_unknown_fields` unless overridden.
///
/// # Example
///
/// ```rust,ignore
/// use gc_derive::api_model;
///
/// #[api_model(deny_unknown_fields = false)]
/// pub struct InitiatePaymentRequest {
///     pub account_number: String,
///     pub network: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro to bridge Axum handlers with `OpenAPI` documentation.
///
/// Accepts the regular `utoipa::path` arguments and only registers them when the consuming
/// crate enables its `server` feature.
///
/// # Example
///
/// ```rust,ignore
/// #[api_handler(
///     post,
///     path = "/payments/webhook",
///     responses((status = OK, body = WebhookAck)),
///     tag = PAYMENTS_TAG,
/// )]
/// pub async fn webhook_handler() -> impl IntoResponse { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Turns an enum into a domain error type.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` when missing.
/// * `<ErrorName>Ext` trait with `.context(...)` for `Result<T, ErrorName>` and for
///   `Result<T, SourceError>` of every variant that wraps a source error.
/// * `From<SourceError>` for variants with a `source` field.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper to render the optional context in messages.
///
/// # Requirements
///
/// Variants must use named fields. Variants with a source must carry
/// `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[gc_derive::gc_error]
/// pub enum StoreError {
///     #[error("Database error{}: {source}", format_context(.context))]
///     Database { source: surrealdb::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal store error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn gc_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Attribute macro to define a feature slice handle.
///
/// Generates `<Name>Inner` with the declared fields, an `Arc` wrapper named `<Name>` that
/// derefs to the inner state, and the `FeatureSlice` implementation used by the kernel
/// registry.
///
/// # Example
/// ```rust,ignore
/// #[gc_derive::gc_slice]
/// pub struct Payments {
///     pub gateway: GatewayClient,
/// }
///
/// let slice = Payments::new(PaymentsInner { gateway });
/// ```
#[proc_macro_attribute]
pub fn gc_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
