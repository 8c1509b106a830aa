//! Batch processing over dataset collections.

pub mod executor;
pub mod partners;

pub use executor::{Runtime, RuntimeError};
pub use partners::load_partners;
