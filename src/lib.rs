#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use vc_naming as naming;
pub use vc_setting as setting;
pub use vc_version as version;
