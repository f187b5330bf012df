#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

#[cfg(test)]
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod case;
mod error;
mod strategy;
mod words;

pub mod resolve;

// -----------------------------------------------------------------------------
// Top-level exports

pub use case::{CaseStyle, transform};
pub use error::{ParseStrategyError, ResolveError};
pub use resolve::{
    NamingResolution, PropertyMap, PropertyNameStrategy, PropertyResolutionStrategy, Resolution,
    resolve_batch,
};
pub use strategy::{NamingStrategy, PropertyNamingStrategy};
pub use words::split_words;
