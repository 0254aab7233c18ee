//! Shared pieces of the `xmatch` binary.

pub mod logging;
pub mod settings;
