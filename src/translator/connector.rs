use serde_json::Value;
use tracing::debug;

use super::{CaptureItem, FieldError, Translator};
use crate::bibtex::{EntryType, MappedEntry};

/// Connector field names that have a different BibTeX name.
pub const FIELD_TRANSLATION: &[(&str, &str)] = &[
    ("abstractNote", "abstract"),
    ("publicationTitle", "journal"),
    ("DOI", "doi"),
    ("ISSN", "issn"),
    ("callNumber", "lccn"),
    ("issue", "number"),
    ("thesisType", "type"),
];

/// Maps connector items (creators, tags, item type, date, renamed fields) onto
/// BibTeX fields. Fields it does not know pass through unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConnectorTranslator;

impl Translator for ConnectorTranslator {
    fn translate(&self, mut item: CaptureItem) -> MappedEntry {
        let item_type = match item.shift_remove("itemType") {
            Some(Value::String(t)) => EntryType::classify(&t),
            _ => EntryType::Misc,
        };
        let mut entry = MappedEntry::new(item_type);

        for (from, to) in FIELD_TRANSLATION {
            if item.get(*from).is_some_and(is_present)
                && let Some(value) = item.shift_remove(*from)
            {
                entry.insert(*to, render(value));
            }
        }

        if let Some(Value::Array(tags)) = item.get("tags") {
            match keywords(tags) {
                Ok(keywords) => entry.insert("keywords", Some(keywords)),
                Err(e) => debug!(error = %e, "omitting keywords"),
            }
            item.shift_remove("tags");
        }

        if let Some(Value::Array(creators)) = item.get("creators") {
            match authors(creators) {
                Ok(author) => entry.insert("author", Some(author)),
                Err(e) => debug!(error = %e, "omitting author"),
            }
            item.shift_remove("creators");
        }

        if let Some(Value::String(date)) = item.get("date")
            && !date.is_empty()
        {
            entry.insert("year", Some(year_of(date)));
            item.shift_remove("date");
        }

        for (key, value) in item {
            entry.insert_if_absent(key, render(value));
        }
        entry
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// JSON value as field text; `null` has no text.
fn render(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

fn keywords(tags: &[Value]) -> Result<String, FieldError> {
    tags.iter()
        .enumerate()
        .map(|(index, tag)| {
            tag.get("tag")
                .and_then(Value::as_str)
                .ok_or(FieldError::MalformedTagList { index })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(|labels| labels.join(", "))
}

fn authors(creators: &[Value]) -> Result<String, FieldError> {
    creators
        .iter()
        .enumerate()
        .map(|(index, creator)| {
            let last = creator.get("lastName").and_then(Value::as_str);
            let first = creator.get("firstName").and_then(Value::as_str);
            match (last, first) {
                (Some(last), Some(first)) => Ok(format!("{last}, {first}")),
                _ => Err(FieldError::MalformedCreatorList { index }),
            }
        })
        .collect::<Result<Vec<_>, _>>()
        .map(|names| names.join(" and "))
}

/// The year is whatever follows the last comma, e.g. `"July, 1687"`.
fn year_of(date: &str) -> String {
    match date.rsplit_once(',') {
        Some((_, year)) => year.trim().to_string(),
        None => date.trim().to_string(),
    }
}
