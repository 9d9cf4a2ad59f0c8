//! Unique-key tokens for "multiple" group items
//!
//! A unique key addresses one item of a repeatable group independent of its
//! current array position. The wire format `__[a-z0-9]{13}__` is a
//! compatibility contract with the legacy consumer; keys only need to be
//! unique within their enclosing array scope.

use std::sync::LazyLock;

use rand::Rng;

/// Length of the random body between the `__` markers.
pub const UNIQUE_KEY_BODY_LEN: usize = 13;

static UNIQUE_KEY_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^__[a-z0-9]{13}__$").expect("unique key regex"));

/// Returns true if `token` has the unique-key wire format.
#[must_use]
pub fn is_unique_key(token: &str) -> bool {
    UNIQUE_KEY_RE.is_match(token)
}

// ============================================================================
// KEY SOURCE
// ============================================================================

/// Source of randomness for key generation.
///
/// The default [`RandomKeySource`] draws from the thread RNG; tests install
/// a deterministic source instead.
pub trait KeySource {
    /// Produces `len` characters drawn from `[a-z0-9]`.
    fn next_body(&mut self, len: usize) -> String;
}

/// Thread-RNG backed key source. Collisions are negligible within one
/// process lifetime (36^13 tokens); cryptographic strength is not a goal.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomKeySource;

impl KeySource for RandomKeySource {
    fn next_body(&mut self, len: usize) -> String {
        const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
        let mut rng = rand::rng();
        (0..len)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

/// Generates a fresh unique-key token from the given source.
#[must_use]
pub fn generate_unique_key_with(source: &mut dyn KeySource) -> String {
    format!("__{}__", source.next_body(UNIQUE_KEY_BODY_LEN))
}

/// Generates a fresh unique-key token from the thread RNG.
#[must_use]
pub fn generate_unique_key() -> String {
    generate_unique_key_with(&mut RandomKeySource)
}
