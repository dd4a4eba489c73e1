//! Avatar Value Object
//!
//! Normalised profile picture: always a PNG of a fixed edge length.
//! Produced by `platform::imaging`, never from raw client bytes.

use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct Avatar(Vec<u8>);

impl Avatar {
    pub const CONTENT_TYPE: &'static str = "image/png";

    /// Wrap bytes that are already normalised PNG
    pub fn from_png(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl fmt::Debug for Avatar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Avatar({} bytes)", self.0.len())
    }
}
