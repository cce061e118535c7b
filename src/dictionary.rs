use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use tracing::{debug, warn};

/// System word lists tried in order when no base dictionary is configured.
const SYSTEM_DICTIONARIES: &[&str] = &[
    "/usr/share/hunspell/en_US.dic",
    "/usr/share/myspell/en_US.dic",
    "/usr/share/dict/american-english",
    "/usr/share/dict/words",
];

/// A spelling dictionary: a base word list extended with personal word lists.
///
/// Lookups follow hunspell's case rules, so a stored `newton` accepts `Newton`
/// and `NEWTON`, while a stored `Newton` rejects `newton`. Built once at startup
/// and shared read-only afterwards.
#[derive(Debug, Default, Clone)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Dictionary {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Load the base dictionaries followed by the personal word lists.
    ///
    /// With no base dictionary given, the first system word list that exists is
    /// used. Finding none is not an error: the dictionary stays empty and
    /// [`Dictionary::is_proper_noun`] never fires.
    pub fn load(base: &[PathBuf], personal: &[PathBuf]) -> anyhow::Result<Self> {
        let mut dict = Dictionary::default();

        if base.is_empty() {
            match SYSTEM_DICTIONARIES.iter().map(Path::new).find(|p| p.is_file()) {
                Some(path) => dict.extend_from_file(path)?,
                None => debug!("no system dictionary found"),
            }
        } else {
            for path in base {
                dict.extend_from_file(path)?;
            }
        }

        for path in personal {
            dict.extend_from_file(path)?;
        }

        if dict.is_empty() {
            warn!("dictionary is empty; proper nouns will not be protected");
        }
        Ok(dict)
    }

    fn extend_from_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read word list {}", path.display()))?;
        let before = self.words.len();
        self.extend_from_str(&text);
        debug!(
            path = %path.display(),
            added = self.words.len() - before,
            "loaded word list"
        );
        Ok(())
    }

    /// Add words from a plain word list or a hunspell `.dic` file.
    fn extend_from_str(&mut self, text: &str) {
        let mut lines = text.lines().peekable();
        // hunspell .dic files open with an approximate word count
        if let Some(first) = lines.peek()
            && !first.trim().is_empty()
            && first.trim().chars().all(|c| c.is_ascii_digit())
        {
            lines.next();
        }
        for line in lines {
            let word = line.split('/').next().unwrap_or_default().trim();
            if !word.is_empty() {
                self.words.insert(word.to_string());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether `word` is a known spelling in its given case.
    pub fn check(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        if self.words.contains(word) {
            return true;
        }
        let lower = word.to_lowercase();
        if word == capitalize(&lower) && self.words.contains(&lower) {
            return true;
        }
        if is_all_upper(word) {
            return self.words.contains(&lower) || self.words.contains(&capitalize(&lower));
        }
        false
    }

    /// Known in its given case, but not as an ordinary lowercase word.
    pub fn is_proper_noun(&self, word: &str) -> bool {
        self.check(word) && !self.check(&word.to_lowercase())
    }
}

/// Uppercase the first character and lowercase the rest.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn is_all_upper(s: &str) -> bool {
    s.chars().any(char::is_alphabetic) && !s.chars().any(char::is_lowercase)
}
