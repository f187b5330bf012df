#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod comparator;
mod delegating;
mod error;
mod numeric;

// -----------------------------------------------------------------------------
// Top-level exports

pub use comparator::{CompareResult, VersionComparator};
pub use delegating::DelegatingComparator;
pub use error::VersionError;
pub use numeric::{SIMPLE_NUMERIC, SimpleNumericComparator};
