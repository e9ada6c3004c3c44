use regex::{Regex, RegexBuilder};

/// Substrings that keep a link out of the index unless the caller overrides them
pub const DEFAULT_BLACKLIST: &[&str] = &[
    "mailto:",
    "javascript:",
    ".pdf",
    "storage",
    "index.php",
    "tel:",
    "#",
];

/// How new entries are combined with an existing blacklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlacklistMode {
    /// Discard the current entries and use only the new ones
    Replace,
    /// Append the new entries to the current ones
    #[default]
    Extend,
}

/// Case-insensitive substring blacklist
///
/// Entries are matched literally: every entry is escaped before the
/// alternation is compiled, so `.pdf` matches only a dot followed by `pdf`.
/// Entry order never changes the outcome of [`Blacklist::matches`].
///
/// # Examples
///
/// ```
/// use sumi_sweep::url::{Blacklist, DEFAULT_BLACKLIST};
///
/// let blacklist = Blacklist::new(DEFAULT_BLACKLIST.iter().copied()).unwrap();
/// assert!(blacklist.matches("https://example.com/INDEX.PHP?page=2"));
/// assert!(!blacklist.matches("https://example.com/about"));
/// ```
#[derive(Debug, Clone)]
pub struct Blacklist {
    entries: Vec<String>,
    matcher: Option<Regex>,
}

impl Blacklist {
    /// Builds a blacklist from the given entries
    ///
    /// # Returns
    ///
    /// * `Ok(Blacklist)` - Compiled blacklist
    /// * `Err(regex::Error)` - The combined pattern exceeded the regex size limits
    pub fn new<I, S>(entries: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = entries.into_iter().map(Into::into).collect();
        let matcher = compile(&entries)?;
        Ok(Self { entries, matcher })
    }

    /// A blacklist that rejects nothing
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            matcher: None,
        }
    }

    /// The entries in the order they were added (duplicates included)
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns true if `url` contains any entry, ignoring case
    pub fn matches(&self, url: &str) -> bool {
        self.matcher
            .as_ref()
            .is_some_and(|matcher| matcher.is_match(url))
    }

    /// Replaces or extends the entry list
    ///
    /// On error the blacklist is left unchanged.
    pub fn set<I, S>(&mut self, entries: I, mode: BlacklistMode) -> Result<(), regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut updated = match mode {
            BlacklistMode::Replace => Vec::new(),
            BlacklistMode::Extend => self.entries.clone(),
        };
        updated.extend(entries.into_iter().map(Into::into));

        self.matcher = compile(&updated)?;
        self.entries = updated;
        Ok(())
    }

    /// Appends a single entry
    pub fn push(&mut self, entry: impl Into<String>) -> Result<(), regex::Error> {
        self.set(std::iter::once(entry.into()), BlacklistMode::Extend)
    }
}

/// Compiles the entries into one case-insensitive alternation
fn compile(entries: &[String]) -> Result<Option<Regex>, regex::Error> {
    // An empty entry would match every URL
    let alternatives: Vec<String> = entries
        .iter()
        .filter(|entry| !entry.is_empty())
        .map(|entry| regex::escape(entry))
        .collect();

    if alternatives.is_empty() {
        return Ok(None);
    }

    RegexBuilder::new(&alternatives.join("|"))
        .case_insensitive(true)
        .build()
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_blacklist() -> Blacklist {
        Blacklist::new(DEFAULT_BLACKLIST.iter().copied()).unwrap()
    }

    #[test]
    fn test_default_entries() {
        let blacklist = default_blacklist();
        assert_eq!(blacklist.entries().len(), 7);

        assert!(blacklist.matches("mailto:foo@bar.com"));
        assert!(blacklist.matches("javascript:void(0)"));
        assert!(blacklist.matches("https://example.com/report.pdf"));
        assert!(blacklist.matches("https://example.com/storage/img.png"));
        assert!(blacklist.matches("https://example.com/index.php"));
        assert!(blacklist.matches("tel:+1234567890"));
        assert!(blacklist.matches("https://example.com/page#top"));
    }

    #[test]
    fn test_allows_plain_pages() {
        let blacklist = default_blacklist();
        assert!(!blacklist.matches("https://example.com/about"));
        assert!(!blacklist.matches("https://example.com/blog/post-1"));
    }

    #[test]
    fn test_case_insensitive() {
        let blacklist = default_blacklist();
        assert!(blacklist.matches("MAILTO:someone@example.com"));
        assert!(blacklist.matches("https://example.com/Report.PDF"));
    }

    #[test]
    fn test_entries_are_literal() {
        let blacklist = default_blacklist();
        // ".pdf" must not behave like the pattern "any char followed by pdf"
        assert!(!blacklist.matches("https://example.com/xpdf-viewer"));

        let blacklist = Blacklist::new(["(draft)", "a+b"]).unwrap();
        assert!(blacklist.matches("https://example.com/(draft)/1"));
        assert!(blacklist.matches("https://example.com/a+b"));
        assert!(!blacklist.matches("https://example.com/draft"));
        assert!(!blacklist.matches("https://example.com/aab"));
    }

    #[test]
    fn test_extend_keeps_existing_entries() {
        let mut blacklist = default_blacklist();
        blacklist
            .set(["/tag/", "/feed"], BlacklistMode::Extend)
            .unwrap();

        assert_eq!(blacklist.entries().len(), 9);
        assert!(blacklist.matches("https://example.com/tag/rust"));
        assert!(blacklist.matches("https://example.com/index.php"));
    }

    #[test]
    fn test_replace_discards_existing_entries() {
        let mut blacklist = default_blacklist();
        blacklist.set(["/private"], BlacklistMode::Replace).unwrap();

        assert_eq!(blacklist.entries(), ["/private".to_string()]);
        assert!(blacklist.matches("https://example.com/private/area"));
        assert!(!blacklist.matches("https://example.com/index.php"));
    }

    #[test]
    fn test_push_single_entry() {
        let mut blacklist = default_blacklist();
        blacklist.push("/login").unwrap();
        assert!(blacklist.matches("https://example.com/login"));
        assert_eq!(blacklist.entries().last().unwrap(), "/login");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut blacklist = default_blacklist();
        blacklist.push("storage").unwrap();
        assert_eq!(blacklist.entries().len(), 8);
        assert!(blacklist.matches("https://example.com/storage"));
    }

    #[test]
    fn test_order_does_not_matter() {
        let forward = Blacklist::new(["/a", "/b"]).unwrap();
        let backward = Blacklist::new(["/b", "/a"]).unwrap();

        for url in ["https://x.com/a", "https://x.com/b", "https://x.com/c"] {
            assert_eq!(forward.matches(url), backward.matches(url));
        }
    }

    #[test]
    fn test_empty_blacklist_matches_nothing() {
        let blacklist = Blacklist::empty();
        assert!(!blacklist.matches("mailto:foo@bar.com"));

        let blacklist = Blacklist::new(Vec::<String>::new()).unwrap();
        assert!(!blacklist.matches("https://example.com/index.php"));
    }

    #[test]
    fn test_empty_entry_is_ignored() {
        let blacklist = Blacklist::new(["", "/secret"]).unwrap();
        assert!(!blacklist.matches("https://example.com/about"));
        assert!(blacklist.matches("https://example.com/secret"));
    }
}
