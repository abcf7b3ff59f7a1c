//! The cookie jar: an indexed, process-local cookie table.
//!
//! Cookies are bucketed in a three-level map, domain (lower-cased) → path →
//! name, so there is at most one live cookie per (domain, path, name) triple
//! and inserting an existing triple replaces the previous cookie.
//!
//! The jar is a single-owner, synchronous structure: no internal locking, no
//! capacity bound, no eviction beyond expiry. Callers that need concurrent
//! access must wrap it behind their own synchronization. Expired entries are
//! purged lazily before every query and before every persist, at a cost
//! proportional to the total number of stored cookies.

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use url::Url;

use crate::cookie::Cookie;

/// The jar's internal index: domain (lower-cased) → path → name → cookie.
///
/// This is also the value the serialization codecs dump and load, so the
/// structured format is an exact image of the in-memory state.
pub type CookieIndex = HashMap<String, HashMap<String, HashMap<String, Cookie>>>;

/// Holds all cookies known to a client across requests.
///
/// Cloning a jar produces a fully independent copy: the nested maps and every
/// contained [`Cookie`] are owned values, so `clone()` is a structural deep
/// copy with no shared mutable state. The persist path relies on this to
/// strip session cookies from a snapshot without touching the live jar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CookieJar {
    pub(crate) index: CookieIndex,
}

impl CookieJar {
    /// Creates an empty jar.
    pub fn new() -> Self {
        CookieJar::default()
    }

    /// Adds `cookie` if it is acceptable from `url`.
    ///
    /// Returns `true` when the cookie was indexed (replacing any prior
    /// cookie with the same domain/path/name triple) and `false` when the
    /// cookie's own acceptability predicate rejected it, in which case the
    /// jar is unchanged.
    pub fn add(&mut self, url: &Url, cookie: Cookie) -> bool {
        if !cookie.acceptable_from_url(url) {
            return false;
        }
        self.add_unconditional(cookie);
        true
    }

    /// Adds `cookie` without consulting the acceptability predicate.
    ///
    /// Used for programmatic insertion and by the format decoders. Chainable:
    ///
    /// ```
    /// # use cookiejar::{Cookie, CookieJar};
    /// let mut jar = CookieJar::new();
    /// let mut a = Cookie::new("a", "1");
    /// a.domain = "example.com".to_string();
    /// let mut b = Cookie::new("b", "2");
    /// b.domain = "example.com".to_string();
    /// jar.add_unconditional(a).add_unconditional(b);
    /// ```
    pub fn add_unconditional(&mut self, cookie: Cookie) -> &mut Self {
        self.index
            .entry(cookie.domain.to_lowercase())
            .or_default()
            .entry(cookie.path.clone())
            .or_default()
            .insert(cookie.name.clone(), cookie);
        self
    }

    /// Returns the cookies to send with a request for `url`, in header order.
    ///
    /// Runs [`cleanup`](Self::cleanup) first, then selects every live cookie
    /// whose applicability predicate holds for `url` (an empty URL path is
    /// treated as `/`). Each selected cookie gets its `accessed_at` stamp
    /// updated. The result is ordered per RFC 6265 §5.4: longer (more
    /// specific) paths first, and among equal path lengths the cookie
    /// created first.
    pub fn cookies(&mut self, url: &Url) -> Vec<&Cookie> {
        self.cleanup(false);

        let mut url = url.clone();
        if url.path().is_empty() {
            url.set_path("/");
        }

        let now = OffsetDateTime::now_utc();
        let mut selected: Vec<&Cookie> = Vec::new();
        for cookie in self
            .index
            .values_mut()
            .flat_map(|paths| paths.values_mut())
            .flat_map(|names| names.values_mut())
        {
            if !cookie.expired_at(now) && cookie.valid_for_url(&url) {
                cookie.accessed_at = now;
                selected.push(cookie);
            }
        }

        selected.sort_by_key(|c| (Reverse(c.path.len()), c.created_at));
        selected
    }

    /// Whether no cookie would be sent with a request for `url`.
    pub fn is_empty_for(&mut self, url: &Url) -> bool {
        self.cookies(url).is_empty()
    }

    /// Iterates over every live cookie after purging expired entries.
    ///
    /// Cookies are yielded in the index's nesting order (domain, then path,
    /// then name); the order across buckets is implementation-defined but
    /// visits each entry exactly once.
    pub fn iter(&mut self) -> impl Iterator<Item = &Cookie> + '_ {
        self.cleanup(false);
        self.index
            .values()
            .flat_map(|paths| paths.values())
            .flat_map(|names| names.values())
    }

    /// Removes every cookie.
    pub fn clear(&mut self) {
        self.index.clear();
    }

    /// Removes expired cookies, and session cookies when `purge_session` is
    /// set. Buckets emptied by the purge are dropped from the index.
    pub fn cleanup(&mut self, purge_session: bool) {
        let now = OffsetDateTime::now_utc();
        for paths in self.index.values_mut() {
            for names in paths.values_mut() {
                names.retain(|_, c| !c.expired_at(now) && !(purge_session && c.is_session()));
            }
            paths.retain(|_, names| !names.is_empty());
        }
        self.index.retain(|_, paths| !paths.is_empty());
    }

    /// Total number of cookies currently indexed, expired ones included.
    pub fn len(&self) -> usize {
        self.index
            .values()
            .flat_map(|paths| paths.values())
            .map(|names| names.len())
            .sum()
    }

    /// Whether the jar holds no cookies at all.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
