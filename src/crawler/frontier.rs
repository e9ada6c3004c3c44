//! Discovered and visited link bookkeeping
//!
//! The frontier holds every link a crawl has indexed, in the order it was
//! found, together with the set of URLs that have already been fetched.

use indexmap::IndexSet;
use std::collections::HashSet;

/// Link sets owned by a single crawl
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    discovered: IndexSet<String>,
    visited: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `link` to the discovered set
    ///
    /// Returns false if the link was already present; the set never holds
    /// duplicates and never loses entries.
    pub fn discover(&mut self, link: String) -> bool {
        self.discovered.insert(link)
    }

    pub fn is_discovered(&self, link: &str) -> bool {
        self.discovered.contains(link)
    }

    /// Records that `url` has been fetched and its links extracted
    pub fn mark_visited(&mut self, url: &str) {
        self.visited.insert(url.to_string());
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Number of discovered links
    pub fn len(&self) -> usize {
        self.discovered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discovered.is_empty()
    }

    /// Number of fetched URLs
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Discovered links in insertion order
    pub fn links(&self) -> impl Iterator<Item = &str> + '_ {
        self.discovered.iter().map(String::as_str)
    }

    /// The link discovered at position `index`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.discovered.get_index(index).map(String::as_str)
    }

    /// Forgets everything; used when a session starts a new crawl
    pub fn clear(&mut self) {
        self.discovered.clear();
        self.visited.clear();
    }
}
