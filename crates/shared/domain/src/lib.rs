//! # Domain Models
//!
//! Plain data shared by every studio crate, with `serde` and `bitflags` as the only
//! dependencies. No I/O and no validation logic lives here.

pub mod config;
pub mod constants;
pub mod marks;
