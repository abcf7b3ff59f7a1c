//! Saving and loading a jar: codec plumbing plus scoped file I/O.
//!
//! Everything here is composition of [`CookieJar`], a [`Codec`], and
//! `std::fs`. File handles are scoped to these functions, so they are
//! released on every exit path, write failures included. A failed save may
//! leave a truncated file behind; callers must treat an error as "on-disk
//! state not guaranteed to have changed".

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::codec::{self, Codec};
use crate::errors::JarError;
use crate::jar::CookieJar;

impl CookieJar {
    /// Serializes the jar with `codec`.
    ///
    /// The dump is taken from a deep copy with session cookies (and anything
    /// expired) purged, so the live jar keeps its session state.
    pub fn serialize(&self, codec: &dyn Codec) -> Result<String, JarError> {
        let mut snapshot = self.clone();
        snapshot.cleanup(true);
        codec.dump(&snapshot.index)
    }

    /// Replaces the jar's contents with the result of parsing `input`, then
    /// purges anything already expired.
    pub fn deserialize(&mut self, input: &str, codec: &dyn Codec) -> Result<(), JarError> {
        self.index = codec.load(input)?;
        self.cleanup(false);
        Ok(())
    }

    /// Saves the jar to `path` using the codec named `codec_name`.
    ///
    /// An unrecognized name fails with [`JarError::UnknownCodec`] before the
    /// target file is touched.
    pub fn save_as(&self, path: impl AsRef<Path>, codec_name: &str) -> Result<(), JarError> {
        let codec = codec::by_name(codec_name)?;
        self.save_with(path, codec.as_ref())
    }

    /// Saves the jar to `path` using a caller-supplied codec.
    pub fn save_with(&self, path: impl AsRef<Path>, codec: &dyn Codec) -> Result<(), JarError> {
        let payload = self.serialize(codec)?;
        let mut file = File::create(path.as_ref())?;
        file.write_all(payload.as_bytes())?;
        log::debug!("saved cookie jar to {}", path.as_ref().display());
        Ok(())
    }

    /// Replaces the jar's contents from the file at `path` using the codec
    /// named `codec_name`.
    pub fn load_from(&mut self, path: impl AsRef<Path>, codec_name: &str) -> Result<(), JarError> {
        let codec = codec::by_name(codec_name)?;
        self.load_with(path, codec.as_ref())
    }

    /// Replaces the jar's contents from the file at `path` using a
    /// caller-supplied codec.
    pub fn load_with(&mut self, path: impl AsRef<Path>, codec: &dyn Codec) -> Result<(), JarError> {
        let mut contents = String::new();
        File::open(path.as_ref())?.read_to_string(&mut contents)?;
        log::debug!("loading cookie jar from {}", path.as_ref().display());
        self.deserialize(&contents, codec)
    }
}
