//! Facade crate for the studio schema engine and the content catalog.
//! Re-exports domain/kernel primitives and builds the registry for a configuration.
//! Keep this crate thin: it should compose other crates, not implement schema logic.
//!
//! ## Usage
//! - Add `atria` (the `content` feature is on by default).
//! - Call `atria::init` with the loaded `StudioConfig` to get a ready `Registry`.

pub use atria_domain as domain;
pub use atria_kernel as kernel;
pub use atria_schema as schema;

#[cfg(feature = "content")]
pub use atria_content as content;

/// Build-time enabled features (by Cargo feature).
pub mod features {
    pub const ENABLED: &[&str] = &[
        "schema",
        #[cfg(feature = "content")]
        "content",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Builds the schema registry for the configured catalog.
///
/// # Errors
/// Returns an error if a document type fails the registration checks.
#[cfg(feature = "content")]
pub fn init(config: &domain::config::StudioConfig) -> Result<schema::Registry, schema::SchemaError> {
    content::register(config)
}
