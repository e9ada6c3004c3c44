use crate::url::Blacklist;
use url::{ParseError, Url};

/// Base used to resolve relative references when only their path matters
const RELATIVE_BASE: &str = "http://relative.invalid/";

/// Extracts the host of `raw` exactly as it was written
///
/// The `url` crate lowercases hosts while parsing, but hosts are compared
/// byte for byte, so the authority is sliced out of the original text.
/// Userinfo and port are dropped. Returns `None` when `raw` has no host.
///
/// # Examples
///
/// ```
/// use sumi_sweep::url::extract_host;
///
/// assert_eq!(
///     extract_host("https://EXAMPLE.com:8080/path"),
///     Some("EXAMPLE.com".to_string())
/// );
/// assert_eq!(extract_host("//cdn.example.net/x"), Some("cdn.example.net".to_string()));
/// assert_eq!(extract_host("/about"), None);
/// ```
pub fn extract_host(raw: &str) -> Option<String> {
    let parsed = match Url::parse(raw) {
        Ok(url) => url,
        Err(ParseError::RelativeUrlWithoutBase) if raw.starts_with("//") => {
            Url::parse(RELATIVE_BASE).ok()?.join(raw).ok()?
        }
        Err(_) => return None,
    };
    let parsed_host = parsed.host_str()?;

    let written = raw
        .find("//")
        .map(|start| &raw[start + 2..])
        .and_then(|rest| rest.split(['/', '\\', '?', '#']).next())
        .map(|authority| authority.rsplit('@').next().unwrap_or(authority))
        .map(strip_port)
        .filter(|host| host.eq_ignore_ascii_case(parsed_host));

    // Hosts the parser rewrote beyond case (IDNA, percent-encoding) keep
    // their parsed form
    Some(written.unwrap_or(parsed_host).to_string())
}

/// Drops a trailing `:port`, leaving bracketed IPv6 literals intact
fn strip_port(authority: &str) -> &str {
    if authority.starts_with('[') {
        return match authority.find(']') {
            Some(end) => &authority[..=end],
            None => authority,
        };
    }
    authority.split(':').next().unwrap_or(authority)
}

/// Host and path of a link as it was written on the page
#[derive(Debug, Default, PartialEq)]
struct LinkParts {
    host: Option<String>,
    path: Option<String>,
}

/// Splits a raw link into host and path
///
/// Returns `None` for input the URL parser rejects outright. Relative
/// references have no host unless they are protocol-relative (`//host/path`).
fn split_link(raw: &str) -> Option<LinkParts> {
    match Url::parse(raw) {
        Ok(url) => {
            // Opaque URIs such as `mailto:` carry no hierarchical path
            let path = (!url.cannot_be_a_base()).then(|| url.path().to_string());
            Some(LinkParts {
                host: extract_host(raw),
                path,
            })
        }
        Err(ParseError::RelativeUrlWithoutBase) => {
            let joined = Url::parse(RELATIVE_BASE).ok()?.join(raw).ok()?;
            let host = extract_host(raw);

            let written_path = raw.split(|c| c == '?' || c == '#').next().unwrap_or("");
            let path = (!written_path.is_empty()).then(|| joined.path().to_string());

            Some(LinkParts { host, path })
        }
        Err(_) => None,
    }
}

/// The part of the web a crawl is allowed to index
///
/// A scope is anchored at the seed URL: its host decides which links are
/// external, and the seed itself (without a trailing slash) is the prefix
/// every resolved link is built from.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    base_url: String,
    host: Option<String>,
}

impl Scope {
    /// Creates a scope anchored at `seed`
    ///
    /// A seed that cannot be parsed yields a scope without a host: every
    /// absolute link is then external and only relative links stay in scope.
    pub fn new(seed: &str) -> Self {
        let host = extract_host(seed);
        if host.is_none() {
            tracing::warn!("Seed URL {} has no host; only relative links are in scope", seed);
        }

        Self {
            base_url: seed.trim_end_matches('/').to_string(),
            host,
        }
    }

    /// The seed URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The host of the seed URL, if it has one
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Returns true if `url` names a host other than the seed's
    ///
    /// Hosts are compared exactly as written, so `EXAMPLE.com` and
    /// `example.com` differ. Links without a host (relative references, `mailto:` and friends,
    /// unparsable input) are internal.
    pub fn is_external(&self, url: &str) -> bool {
        match split_link(url).and_then(|parts| parts.host) {
            Some(host) => self.host.as_deref() != Some(host.as_str()),
            None => false,
        }
    }

    /// Returns true if `link` contains the base URL as a substring
    ///
    /// This is cheaper than comparing hosts and also catches scheme
    /// mismatches such as an `http://` link on an `https://` site.
    pub fn contains(&self, link: &str) -> bool {
        link.contains(&self.base_url)
    }

    /// Resolves a raw href into the form it is indexed under
    ///
    /// # Resolution Rules
    ///
    /// | Link | Result |
    /// |------|--------|
    /// | External | Unchanged |
    /// | Blacklisted | Unchanged |
    /// | Unparsable or without a path | Unchanged |
    /// | Path of `/` | The base URL |
    /// | Anything else | Base URL + `/` + path, slashes trimmed |
    ///
    /// Query strings and fragments never survive resolution. Relative paths
    /// are taken from the site root, not from the page they appeared on.
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_sweep::url::{Blacklist, Scope};
    ///
    /// let scope = Scope::new("http://example.com");
    /// let blacklist = Blacklist::empty();
    /// assert_eq!(
    ///     scope.resolve("/about/?x=1", &blacklist),
    ///     "http://example.com/about"
    /// );
    /// ```
    pub fn resolve(&self, raw: &str, blacklist: &Blacklist) -> String {
        if self.is_external(raw) || blacklist.matches(raw) {
            return raw.to_string();
        }

        let Some(path) = split_link(raw).and_then(|parts| parts.path) else {
            return raw.to_string();
        };

        let path = path.trim_matches('/');
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}
