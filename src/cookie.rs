//! The [`Cookie`] value type.
//!
//! A cookie is created by the caller (or by the cookies.txt decoder) and then
//! handed to a [`CookieJar`](crate::CookieJar), which owns it from that point
//! on. The jar treats the two URL predicates on this type as black boxes:
//! [`Cookie::acceptable_from_url`] gates insertion and
//! [`Cookie::valid_for_url`] gates selection.
//!
//! The struct is (de)serializable via `serde`, which is what the structured
//! dump codec relies on to round-trip every attribute including timestamps.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use url::Url;

/// A single HTTP cookie with its scoping attributes and bookkeeping stamps.
///
/// Identity within a jar is the (domain, path, name) triple; the domain side
/// of that identity is case-insensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name (case-sensitive).
    pub name: String,

    /// Raw cookie value (not URL-decoded).
    pub value: String,

    /// Host (or host suffix) the cookie is scoped to. Matched
    /// case-insensitively; a leading dot is ignored.
    pub domain: String,

    /// If `true`, the cookie applies to the whole domain including
    /// subdomains; otherwise only to the exact host.
    pub for_domain: bool,

    /// URL path prefix the cookie is scoped to (e.g. `"/"`).
    pub path: String,

    /// If `true`, the cookie is only sent over HTTPS.
    pub secure: bool,

    /// Expiration timestamp. `None` marks a session cookie.
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires: Option<OffsetDateTime>,

    /// Cookie specification version. `0` is the legacy Netscape spec.
    pub version: u32,

    /// Set once at construction.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// Updated by the jar each time the cookie is selected for a request.
    #[serde(with = "time::serde::rfc3339")]
    pub accessed_at: OffsetDateTime,
}

impl Cookie {
    /// Creates a session cookie scoped to path `/` with no domain set.
    ///
    /// Callers are expected to fill in `domain` (and usually `path`) before
    /// handing the cookie to a jar.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Cookie {
            name: name.into(),
            value: value.into(),
            domain: String::new(),
            for_domain: false,
            path: "/".to_string(),
            secure: false,
            expires: None,
            version: 0,
            created_at: now,
            accessed_at: now,
        }
    }

    /// Whether this is a session cookie (no expiry).
    pub fn is_session(&self) -> bool {
        self.expires.is_none()
    }

    /// Whether the expiry lies in the past. Session cookies never expire.
    pub fn is_expired(&self) -> bool {
        self.expired_at(OffsetDateTime::now_utc())
    }

    pub(crate) fn expired_at(&self, now: OffsetDateTime) -> bool {
        matches!(self.expires, Some(t) if t < now)
    }

    /// Whether a response from `url` may set this cookie.
    ///
    /// The URL must have a host, and that host must match the cookie domain
    /// (exactly, or as a subdomain when `for_domain` is set).
    pub fn acceptable_from_url(&self, url: &Url) -> bool {
        match url.host_str() {
            Some(host) => self.domain_matches(host),
            None => false,
        }
    }

    /// Whether this cookie applies to a request for `url`.
    ///
    /// Checks domain match, path prefix match, and the `secure` flag
    /// (secure cookies only travel over HTTPS). Expiry is not checked here;
    /// the jar filters expired cookies separately.
    pub fn valid_for_url(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        self.domain_matches(host)
            && url.path().starts_with(&self.path)
            && (!self.secure || url.scheme() == "https")
    }

    fn domain_matches(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        let domain = self.domain.trim_start_matches('.').to_lowercase();
        if domain.is_empty() {
            return false;
        }
        host == domain || (self.for_domain && host.ends_with(&format!(".{}", domain)))
    }
}
