//! Utility functions shared across the crate

pub mod addr;
pub mod encoding;
