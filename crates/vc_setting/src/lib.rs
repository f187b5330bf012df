#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

// Reader chains rely on `std` locks and thread-local reentrancy tracking.
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod hash;
mod kind;
mod setting;

pub mod annotated;
pub mod property;
pub mod reader;
pub mod registry;
pub mod settings;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use error::{ChainOperation, SettingError};
pub use kind::SettingKind;
pub use setting::{Setting, SettingMap};
