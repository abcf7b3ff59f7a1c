use crate::codec::Codec;
use crate::errors::JarError;
use crate::jar::CookieIndex;

/// Structured dump codec: serializes the exact in-memory nested index as
/// pretty-printed JSON.
///
/// Every cookie attribute round-trips, timestamps included, so this is the
/// format to use when fidelity matters more than interoperability.
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn dump(&self, index: &CookieIndex) -> Result<String, JarError> {
        Ok(serde_json::to_string_pretty(index)?)
    }

    /// Parses a structured dump. A payload that does not parse yields an
    /// empty index rather than an error, so a corrupt cookie file degrades
    /// to a fresh jar instead of failing the load.
    fn load(&self, input: &str) -> Result<CookieIndex, JarError> {
        Ok(serde_json::from_str(input).unwrap_or_else(|e| {
            log::warn!("discarding unparsable cookie payload: {}", e);
            CookieIndex::default()
        }))
    }
}
