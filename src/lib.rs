//! A client-side HTTP cookie store.
//!
//! [`CookieJar`] persists, selects, and expires cookies across requests:
//! cookies are indexed by (domain, path, name), selected for a request URL
//! with RFC 6265 §5.4 ordering, and purged lazily as they expire. The jar
//! can be saved and restored through pluggable [`Codec`]s; a structured JSON
//! dump and Mozilla's cookies.txt format are built in.
//!
//! The jar is single-owner and synchronous. Wrap it in your own lock if you
//! need to share it across threads.

pub mod codec;
pub mod cookie;
pub mod errors;
pub mod jar;

mod persist;

pub use codec::{Codec, CookiestxtCodec, JsonCodec};
pub use cookie::Cookie;
pub use errors::JarError;
pub use jar::{CookieIndex, CookieJar};
