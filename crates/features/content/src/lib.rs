//! The Atria Renewable content catalog.
//!
//! Document types are listed in the order the studio shows them:
//! ads landing page, blog, category, tag.
//!
//! ```rust
//! use atria_content::schema_types;
//! use atria_domain::config::AdsPageRevision;
//!
//! let names: Vec<_> = schema_types(AdsPageRevision::Rich).into_iter().map(|t| t.name).collect();
//! assert_eq!(names, ["adsPage", "blog", "category", "tag"]);
//! ```
mod blocks;

pub mod ads_page;
pub mod blog;
pub mod category;
pub mod tag;

use atria_domain::config::{AdsPageRevision, StudioConfig};
use atria_schema::{DocumentType, Registry, SchemaError};
use tracing::info;

/// Every document type of the studio, with the given ads page revision.
#[must_use]
pub fn schema_types(revision: AdsPageRevision) -> Vec<DocumentType> {
    vec![ads_page::ads_page(revision), blog::blog(), category::category(), tag::tag()]
}

/// Registers the catalog as configured.
///
/// # Errors
/// Returns [`SchemaError::Configuration`] if a definition fails the registration checks.
pub fn register(config: &StudioConfig) -> Result<Registry, SchemaError> {
    let revision = config.schema.ads_page;
    info!(ads_page = ?revision, "Registering content catalog");
    Registry::register(schema_types(revision))
}
