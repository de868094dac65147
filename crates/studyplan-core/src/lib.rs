//! A 364-day AI and machine-learning study plan as typed data.
//!
//! The curriculum ships embedded in the crate ([`catalog::plan`]) and is
//! validated when first loaded. The remaining modules read it: lookups,
//! effort statistics, a lint pass over task detail write-ups, and export.

pub mod catalog;
pub mod details;
pub mod export;
pub mod models;
pub mod plan;
pub mod query;
pub mod stats;
