//! Feature implementations for aptivara.
//!
//! - Focus mode (countdown timer)
//! - Dashboard statistics rendering

pub mod focus;
pub mod stats;
