//! Printable-text encoding of the dependency container.
//!
//! The container travels inside a triple-quoted string literal of the
//! generated script. Two schemes are available:
//!
//! - [`Scheme::Dense`] - basE91, about 23% overhead
//! - [`Scheme::Portable`] - RFC 1924 base85, 25% overhead, decodable with the
//!   interpreter's `base64` module alone
//!
//! The scheme travels with the payload as a flag so the stub picks the
//! matching decoder.

pub mod base85;
pub mod base91;

use crate::bundler::{Result, builder::checksum::sha256_hex};

/// Column width of the embedded payload block.
pub const LINE_WIDTH: usize = 80;

/// Text encoding scheme for the embedded container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// basE91
    Dense,
    /// base85 (RFC 1924 alphabet)
    Portable,
}

impl Scheme {
    /// Pick the scheme for a build.
    ///
    /// Dense is used unless `portable` is requested or the crate was built
    /// without the `dense` feature, in which case a warning is logged and the
    /// portable scheme is used.
    pub fn select(portable: bool) -> Self {
        if portable {
            return Scheme::Portable;
        }
        if cfg!(feature = "dense") {
            Scheme::Dense
        } else {
            log::warn!("dense codec unavailable in this build, falling back to base85");
            Scheme::Portable
        }
    }

    /// Whether the stub should route to the basE91 decoder.
    pub fn is_dense(self) -> bool {
        self == Scheme::Dense
    }

    pub fn encode(self, data: &[u8]) -> String {
        match self {
            Scheme::Dense => base91::encode(data),
            Scheme::Portable => base85::encode(data),
        }
    }

    pub fn decode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            Scheme::Dense => base91::decode(text),
            Scheme::Portable => base85::decode(text),
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scheme::Dense => write!(f, "base91"),
            Scheme::Portable => write!(f, "base85"),
        }
    }
}

/// Encoded container ready to be embedded in the stub.
#[derive(Debug, Clone)]
pub struct EncodedPayload {
    /// Wrapped and escaped text, without leading or trailing newline
    pub text: String,
    /// Scheme that produced `text`
    pub scheme: Scheme,
    /// Hex SHA-256 of the raw container bytes
    pub sha256: String,
}

impl EncodedPayload {
    /// Encode `container` with `scheme`, wrap at [`LINE_WIDTH`] and escape it
    /// for a double-quoted triple-quote literal.
    pub fn encode(container: &[u8], scheme: Scheme) -> Self {
        let encoded = scheme.encode(container);
        Self {
            text: escape_literal(&wrap(&encoded, LINE_WIDTH)),
            scheme,
            sha256: sha256_hex(container),
        }
    }

    /// Recover the container bytes, the inverse of [`EncodedPayload::encode`].
    pub fn decode(&self) -> Result<Vec<u8>> {
        let raw = unescape_literal(&self.text.replace('\n', ""));
        self.scheme.decode(&raw)
    }
}

/// Split `text` into lines of at most `width` characters.
///
/// Input is ASCII, so byte offsets are character offsets.
pub fn wrap(text: &str, width: usize) -> String {
    text.as_bytes()
        .chunks(width)
        .map(|line| String::from_utf8_lossy(line).into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape the literal's delimiter.
///
/// Wrapping happens before escaping so an escape sequence never straddles a
/// line break.
pub fn escape_literal(text: &str) -> String {
    text.replace('"', "\\\"")
}

pub fn unescape_literal(text: &str) -> String {
    text.replace("\\\"", "\"")
}
