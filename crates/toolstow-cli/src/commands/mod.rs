//! Command implementations.

pub mod detect;
pub mod install;
pub mod resolve;
