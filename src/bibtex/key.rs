use std::fmt;

use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const KEY_LEN: usize = 6;

/// The citation key of a record.
///
/// Keys are only meant to be convenient to type. They are not checked for
/// uniqueness against the bibliography file, so two records may end up with
/// the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey(String);

impl RecordKey {
    pub fn new(key: impl Into<String>) -> Self {
        RecordKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of record keys, one call per record.
pub trait KeyGenerator: Send + Sync {
    fn next_key(&self) -> RecordKey;
}

/// Six uppercase letters or digits, drawn uniformly per character.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomKeys;

impl KeyGenerator for RandomKeys {
    fn next_key(&self) -> RecordKey {
        let mut rng = rand::rng();
        let key: String = (0..KEY_LEN)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        RecordKey(key)
    }
}

impl<F> KeyGenerator for F
where
    F: Fn() -> RecordKey + Send + Sync,
{
    fn next_key(&self) -> RecordKey {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_keys_use_the_alphabet() {
        for _ in 0..256 {
            let key = RandomKeys.next_key();
            assert_eq!(key.as_str().len(), KEY_LEN);
            assert!(
                key.as_str()
                    .bytes()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()),
                "unexpected key {key}"
            );
        }
    }

    #[test]
    fn closures_are_generators() {
        let fixed = || RecordKey::new("FIXED1");
        assert_eq!(fixed.next_key().as_str(), "FIXED1");
    }
}
