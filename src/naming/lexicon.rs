//! Word tables used by the semantic abbreviation stage
//!
//! The tables are plain immutable values handed to a `Compressor`, so tests
//! (or embedders with different naming conventions) can supply their own.

use std::collections::{HashMap, HashSet};

/// Words dropped from operation identifiers because they carry no meaning in a tool name
const STANDARD_STOPWORDS: &[&str] = &[
    "a", "an", "the", "of", "for", "to", "and", "or", "api", "get", "endpoint", "operation",
    "request", "method",
];

/// Long words replaced by a conventional short form (keys are lower-case)
const STANDARD_ABBREVIATIONS: &[(&str, &str)] = &[
    ("identifier", "id"),
    ("configuration", "config"),
    ("configurations", "configs"),
    ("information", "info"),
    ("application", "app"),
    ("applications", "apps"),
    ("authentication", "auth"),
    ("authorization", "authz"),
    ("organization", "org"),
    ("organizations", "orgs"),
    ("repository", "repo"),
    ("repositories", "repos"),
    ("management", "mgmt"),
    ("administrator", "admin"),
    ("environment", "env"),
    ("environments", "envs"),
    ("parameter", "param"),
    ("parameters", "params"),
    ("message", "msg"),
    ("messages", "msgs"),
    ("number", "num"),
    ("description", "desc"),
    ("document", "doc"),
    ("documents", "docs"),
    ("specification", "spec"),
    ("statistics", "stats"),
    ("temporary", "temp"),
    ("reference", "ref"),
    ("references", "refs"),
    ("response", "resp"),
    ("service", "svc"),
    ("services", "svcs"),
    ("database", "db"),
    ("directory", "dir"),
    ("attribute", "attr"),
    ("attributes", "attrs"),
    ("version", "ver"),
    ("maximum", "max"),
    ("minimum", "min"),
];

/// Stoplist and abbreviation dictionary for identifier compression
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    stopwords: HashSet<String>,
    abbreviations: HashMap<String, String>,
    /// Every abbreviation value, used to leave already-short forms alone
    abbreviated_forms: HashSet<String>,
}

impl Lexicon {
    /// Create an empty lexicon (no stopwords, no abbreviations)
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in tables
    pub fn standard() -> Self {
        let mut lexicon = Self::new();
        for word in STANDARD_STOPWORDS {
            lexicon = lexicon.with_stopword(*word);
        }
        for (word, short) in STANDARD_ABBREVIATIONS {
            lexicon = lexicon.with_abbreviation(*word, *short);
        }
        lexicon
    }

    /// Add a stopword (matched case-insensitively)
    pub fn with_stopword(mut self, word: impl Into<String>) -> Self {
        self.stopwords.insert(word.into().to_lowercase());
        self
    }

    /// Add an abbreviation (the word is matched case-insensitively)
    pub fn with_abbreviation(mut self, word: impl Into<String>, short: impl Into<String>) -> Self {
        let short = short.into().to_lowercase();
        self.abbreviated_forms.insert(short.clone());
        self.abbreviations.insert(word.into().to_lowercase(), short);
        self
    }

    /// Whether the token should be dropped
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(&token.to_lowercase())
    }

    /// Lower-case abbreviation for a token, if one is known
    pub fn abbreviation(&self, token: &str) -> Option<&str> {
        self.abbreviations
            .get(&token.to_lowercase())
            .map(String::as_str)
    }

    /// Whether the token already is a dictionary abbreviation
    pub fn is_abbreviated_form(&self, token: &str) -> bool {
        self.abbreviated_forms.contains(&token.to_lowercase())
    }
}
