//! CLI library components for zipscore.

pub mod input;
pub mod logging;
pub mod summary;
