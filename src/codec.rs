//! Serialization codecs: [`Codec`] and the two built-in formats.
//!
//! A codec converts a jar's internal [`CookieIndex`] to and from a textual
//! representation. Two formats are built in:
//! - [`JsonCodec`]: a structured dump of the exact nested index, selected by
//!   the name `"structured"`. Round-trips every cookie attribute.
//! - [`CookiestxtCodec`]: Mozilla's cookies.txt line format, selected by the
//!   name `"cookiestxt"`. Lossy by design (see the module docs).
//!
//! Callers with their own on-disk format implement [`Codec`] and pass the
//! object to the `*_with` persistence methods on
//! [`CookieJar`](crate::CookieJar) instead of a name.

mod cookiestxt;
mod json;

pub use cookiestxt::CookiestxtCodec;
pub use json::JsonCodec;

use crate::errors::JarError;
use crate::jar::CookieIndex;

/// A dump/load pair defining one serialized representation of the index.
pub trait Codec {
    /// Serializes the index to text.
    fn dump(&self, index: &CookieIndex) -> Result<String, JarError>;

    /// Parses text back into an index.
    ///
    /// Implementations tolerate malformed or expired persisted entries by
    /// dropping them rather than failing the whole load.
    fn load(&self, input: &str) -> Result<CookieIndex, JarError>;
}

/// Resolves a built-in codec by its symbolic name.
///
/// Recognized names are `"structured"` and `"cookiestxt"`. Anything else is
/// a configuration error, raised before any I/O happens.
pub fn by_name(name: &str) -> Result<Box<dyn Codec>, JarError> {
    match name {
        "structured" => Ok(Box::new(JsonCodec)),
        "cookiestxt" => Ok(Box::new(CookiestxtCodec)),
        other => Err(JarError::UnknownCodec(other.to_string())),
    }
}
