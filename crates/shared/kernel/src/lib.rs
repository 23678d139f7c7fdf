//! Kernel utilities shared by the studio crates.
//! Keep this crate lightweight: config loading, document id handling and array item keys.
//!
//! ## Array item keys
//! Objects inside arrays carry a `_key`; use `array_key!` for URL-safe, unambiguous keys:
//! ```rust
//! # use atria_kernel::array_key;
//! let key = array_key!();
//! assert_eq!(key.len(), 12);
//! ```
//!
//! ## Config loading
//! ```rust,no_run
//! use atria_kernel::config::load_config;
//! use atria_kernel::domain::config::StudioConfig;
//!
//! let cfg: StudioConfig = load_config(Some("studio.toml")).unwrap();
//! ```
pub mod config;
pub mod ids;

// Alphabet excludes visually ambiguous characters (I, O, l, 0, 1).
pub const SAFE_ALPHABET: &[char; 55] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f',
    'g', 'h', 'j', 'k', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

pub use atria_domain as domain;
pub use nanoid::nanoid;

/// Generates a `_key` for an array item (12 unambiguous characters by default).
#[macro_export]
macro_rules! array_key {
    () => {
        $crate::nanoid!(12, $crate::SAFE_ALPHABET)
    };
    ($size:expr) => {
        $crate::nanoid!($size, $crate::SAFE_ALPHABET)
    };
}
