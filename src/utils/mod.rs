//! Shared utilities and constants

pub mod constants;
