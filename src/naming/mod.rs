//! Identifier compression
//!
//! Turns arbitrary operation identifiers (`listAllRepositoryConfigurationsForOrganization`,
//! `GET /v2/users/{id}`, free-text summaries) into short slugs that:
//!
//! - match `[a-z0-9]+(-[a-z0-9]+)*`
//! - never exceed the requested length
//! - are a pure function of the input (same input, same slug)
//! - carry a 4-hex-character SHA-256 suffix whenever the input was too long,
//!   so names that only differ past the bound stay distinct
//!
//! # Usage
//!
//! ```
//! use openapi_mcp_bridge::naming::{compress, DEFAULT_MAX_LENGTH};
//!
//! assert_eq!(compress("getUserById", DEFAULT_MAX_LENGTH), "user-by-id");
//! assert_eq!(compress("   ", DEFAULT_MAX_LENGTH), "unnamed-tool");
//! ```

mod lexicon;
pub mod stages;

use std::sync::OnceLock;

pub use lexicon::Lexicon;

use stages::Sanitized;

/// Default bound on compressed names
pub const DEFAULT_MAX_LENGTH: usize = 64;

/// Runs the compression stages with a given lexicon
#[derive(Debug, Clone)]
pub struct Compressor {
    lexicon: Lexicon,
}

impl Compressor {
    /// Create a compressor using the given word tables
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Create a compressor using the built-in word tables
    pub fn standard() -> Self {
        Self::new(Lexicon::standard())
    }

    /// The word tables in use
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Compress `original` to a slug of at most `max_length` characters
    ///
    /// Never fails. A `max_length` of zero is treated as one.
    pub fn compress(&self, original: &str, max_length: usize) -> String {
        let max_length = max_length.max(1);

        let (text, original_was_long) = match stages::sanitize(original, max_length) {
            Sanitized::Terminal(name) => return stages::bound(&name, max_length),
            Sanitized::Text {
                text,
                original_was_long,
            } => (text, original_was_long),
        };

        let abbreviated = stages::abbreviate(&text, &self.lexicon);
        let elided = stages::elide_vowels(&abbreviated, max_length, &self.lexicon);
        let hashed = stages::truncate_with_hash(&elided, original, original_was_long, max_length);

        stages::finalize(&hashed, original, max_length)
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::standard()
    }
}

/// Compress with the built-in word tables
pub fn compress(original: &str, max_length: usize) -> String {
    static STANDARD: OnceLock<Compressor> = OnceLock::new();
    STANDARD
        .get_or_init(Compressor::standard)
        .compress(original, max_length)
}
