//! BibTeX side of the pipeline: entry model, field formatting and record output.

use std::fmt;

pub mod key;
pub mod month;
pub mod serializer;
pub mod title;
pub mod titlecase;
pub mod writer;

/// Brace nesting depth after reading `text`, starting from `depth`.
///
/// Stray closing braces never take the depth below zero.
pub(crate) fn brace_depth(text: &str, depth: usize) -> usize {
    text.chars().fold(depth, |depth, c| match c {
        '{' => depth + 1,
        '}' => depth.saturating_sub(1),
        _ => depth,
    })
}

/// Target BibTeX entry types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryType {
    Article,
    PhdThesis,
    #[default]
    Misc,
}

impl EntryType {
    /// Classify a connector item type. Anything unrecognised is `misc`.
    pub fn classify(item_type: &str) -> Self {
        match item_type {
            "journalArticle" => EntryType::Article,
            "thesis" => EntryType::PhdThesis,
            _ => EntryType::Misc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Article => "article",
            EntryType::PhdThesis => "phdthesis",
            EntryType::Misc => "misc",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One item after field mapping, ready to be serialized.
///
/// Fields keep the order in which they were inserted; a `None` value is kept
/// in place but never emitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedEntry {
    pub item_type: EntryType,
    fields: Vec<(String, Option<String>)>,
}

impl MappedEntry {
    pub fn new(item_type: EntryType) -> Self {
        MappedEntry {
            item_type,
            fields: Vec::new(),
        }
    }

    /// Set a field, replacing the value in place if the key already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Set a field only if the key is not already present.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        if !self.contains_key(&key) {
            self.fields.push((key, value));
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

/// Field value delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Braces,
    Quotes,
}

impl Delimiter {
    pub fn pair(&self) -> (char, char) {
        match self {
            Delimiter::Braces => ('{', '}'),
            Delimiter::Quotes => ('"', '"'),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indent {
    #[default]
    Space,
    Tab,
}

impl Indent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Indent::Space => " ",
            Indent::Tab => "\t",
        }
    }
}

/// Order in which fields of a record are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldOrder {
    /// Alphabetical by lowercased field name.
    #[default]
    Sorted,
    /// As inserted by the field mapper.
    Insertion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatOptions {
    pub delimiter: Delimiter,
    pub indent: Indent,
    pub order: FieldOrder,
}
