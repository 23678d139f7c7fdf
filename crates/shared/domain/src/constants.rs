// Document types
pub const ADS_PAGE: &str = "adsPage";
pub const BLOG: &str = "blog";
pub const CATEGORY: &str = "category";
pub const TAG: &str = "tag";

// Built-in value types
pub const BLOCK: &str = "block";
pub const SPAN: &str = "span";
pub const REFERENCE: &str = "reference";
pub const IMAGE: &str = "image";
pub const FILE: &str = "file";
pub const SLUG: &str = "slug";
pub const OBJECT: &str = "object";

// Reserved document keys
pub const ID_KEY: &str = "_id";
pub const TYPE_KEY: &str = "_type";
pub const ARRAY_KEY: &str = "_key";
pub const REF_KEY: &str = "_ref";

/// Draft copies of a document share its id behind this prefix.
pub const DRAFTS_PREFIX: &str = "drafts.";
