#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the studio workspace. Right now this is a single attribute,
//! [`macro@atria_error`], which every crate uses to declare its error enum.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! atria-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into a workspace error type.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug` and `thiserror::Error` unless they are already derived.
/// * **Context**: a companion `<Name>Ext` trait whose `.context(..)` fills the
///   `context: Option<Cow<'static, str>>` field of the error (or wraps a source error).
/// * **Conversions**: `From<Source>` for every variant carrying a `source` field
///   (or a field marked `#[source]` / `#[from]`), so `?` works on upstream errors.
/// * **Fallback**: `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * **Formatting**: a module-local `format_context` helper for `#[error(..)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant uses named fields; tuple and unit variants are rejected.
/// 3. A variant with a source must also have a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use atria_derive::atria_error;
/// use std::borrow::Cow;
///
/// #[atria_error]
/// pub enum LoadError {
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal failure{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<String, LoadError> {
///     std::fs::read_to_string(path).context("Reading schema dump")
/// }
/// ```
#[proc_macro_attribute]
pub fn atria_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
