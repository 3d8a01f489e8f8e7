//! Individual stages of the identifier compression pipeline
//!
//! Each stage is a pure function; `Compressor::compress` chains them in order:
//! sanitize, abbreviate, elide vowels, truncate-and-hash, finalize.

use sha2::{Digest, Sha256};

use super::lexicon::Lexicon;

/// Name used when the input has no usable characters at all
pub const TERMINAL_FALLBACK: &str = "unnamed-tool";

/// Hex characters in the disambiguating suffix
pub const HASH_SUFFIX_LEN: usize = 4;

/// Parts at or below this length are never vowel-elided
const ELISION_MIN_PART_LEN: usize = 5;

/// Outcome of the sanitize stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sanitized {
    /// The pipeline stops here with this name
    Terminal(String),
    /// Sanitized text to continue with
    Text {
        text: String,
        /// Set when the untouched input was longer than the bound
        original_was_long: bool,
    },
}

/// Lower-hex SHA-256 of the input
pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// First 8 hex characters of the SHA-256 of the input
pub fn hash8(input: &str) -> String {
    sha256_hex(input)[..8].to_string()
}

/// First 4 hex characters of the SHA-256 of the input
pub fn hash4(input: &str) -> String {
    sha256_hex(input)[..HASH_SUFFIX_LEN].to_string()
}

/// `tool-<hash8>` name for inputs that sanitize to nothing
pub fn hashed_fallback(original: &str) -> String {
    format!("tool-{}", hash8(original))
}

/// Collapse runs of hyphens and trim them from both ends
pub fn collapse_hyphens(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('-').to_string()
}

/// Keep at most `max_length` characters, dropping a trailing hyphen
pub fn bound(text: &str, max_length: usize) -> String {
    let truncated: String = text.chars().take(max_length).collect();
    truncated.trim_end_matches('-').to_string()
}

/// Stage 1: replace everything outside `[A-Za-z0-9_]` with hyphens
pub fn sanitize(original: &str, max_length: usize) -> Sanitized {
    if original.trim().is_empty() {
        return Sanitized::Terminal(TERMINAL_FALLBACK.to_string());
    }

    let replaced: String = original
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '-' })
        .collect();
    let text = collapse_hyphens(&replaced);

    if text.is_empty() {
        return Sanitized::Terminal(hashed_fallback(original));
    }

    Sanitized::Text {
        text,
        original_was_long: original.chars().count() > max_length,
    }
}

/// Split a chunk into words at camelCase and letter/digit boundaries
///
/// `getHTTPResponse2` becomes `get`, `HTTP`, `Response`, `2`.
pub fn split_words(chunk: &str) -> Vec<&str> {
    let bytes = chunk.as_bytes();
    let mut words = Vec::new();
    let mut start = 0;

    for i in 1..bytes.len() {
        let prev = bytes[i - 1];
        let cur = bytes[i];
        let next = bytes.get(i + 1).copied();

        let boundary = (prev.is_ascii_lowercase() && cur.is_ascii_uppercase())
            || (prev.is_ascii_uppercase()
                && cur.is_ascii_uppercase()
                && next.is_some_and(|n| n.is_ascii_lowercase()))
            || (prev.is_ascii_alphabetic() && cur.is_ascii_digit())
            || (prev.is_ascii_digit() && cur.is_ascii_alphabetic());

        if boundary {
            words.push(&chunk[start..i]);
            start = i;
        }
    }

    if start < chunk.len() {
        words.push(&chunk[start..]);
    }

    words
}

/// Shape an abbreviation like the token it replaces
pub fn match_case(token: &str, short: &str) -> String {
    let has_letters = token.chars().any(|c| c.is_ascii_alphabetic());
    let all_upper = has_letters && !token.chars().any(|c| c.is_ascii_lowercase());

    if all_upper && short.len() > 1 {
        return short.to_uppercase();
    }

    if token.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        let mut chars = short.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
    }

    short.to_lowercase()
}

/// Stage 2: tokenize, drop stopwords, apply abbreviations, join with hyphens
///
/// An input made only of stopwords yields an empty string; `finalize` turns
/// that into the hashed fallback.
pub fn abbreviate(text: &str, lexicon: &Lexicon) -> String {
    text.split(['_', '-'])
        .filter(|chunk| !chunk.is_empty())
        .flat_map(split_words)
        .filter(|token| !lexicon.is_stopword(token))
        .map(|token| match lexicon.abbreviation(token) {
            Some(short) => match_case(token, short),
            None => token.to_string(),
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

fn elide_part(part: &str, lexicon: &Lexicon) -> String {
    if part.len() <= ELISION_MIN_PART_LEN || lexicon.is_abbreviated_form(part) {
        return part.to_string();
    }

    let mut chars = part.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let shortened: String = std::iter::once(first)
        .chain(chars.filter(|c| !is_vowel(*c)))
        .collect();

    if shortened.len() < part.len() && shortened.len() >= 2 {
        shortened
    } else {
        part.to_string()
    }
}

/// Stage 3: drop vowels (after the first character) from long parts
///
/// Only runs when the text is still over the bound.
pub fn elide_vowels(text: &str, max_length: usize, lexicon: &Lexicon) -> String {
    if text.len() <= max_length {
        return text.to_string();
    }

    text.split('-')
        .map(|part| elide_part(part, lexicon))
        .collect::<Vec<_>>()
        .join("-")
}

/// Stage 4: truncate and append a hash of the original input when needed
pub fn truncate_with_hash(
    text: &str,
    original: &str,
    original_was_long: bool,
    max_length: usize,
) -> String {
    let text = collapse_hyphens(text);
    if !original_was_long && text.len() <= max_length {
        return text;
    }

    let base_len = max_length.saturating_sub(HASH_SUFFIX_LEN + 1);
    let base = bound(&text, base_len);
    format!("{}-{}", base, hash4(original))
}

/// Stage 5: lower-case, restrict to `[a-z0-9-]`, enforce the hard bound
pub fn finalize(text: &str, original: &str, max_length: usize) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();

    let bounded = bound(&collapse_hyphens(&lowered), max_length);
    if bounded.is_empty() {
        bound(&hashed_fallback(original), max_length)
    } else {
        bounded
    }
}
