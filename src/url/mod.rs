//! URL handling module for Sumi-Sweep
//!
//! This module provides the crawl scope (external-link classification and
//! link resolution against the seed URL) and the blacklist matcher.

mod blacklist;
mod scope;

// Re-export main types
pub use blacklist::{Blacklist, BlacklistMode, DEFAULT_BLACKLIST};
pub use scope::{extract_host, Scope};
