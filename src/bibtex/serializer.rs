use crate::dictionary::Dictionary;

use super::{
    FieldOrder, FormatOptions, MappedEntry, key::RecordKey, month::normalize_month,
    title::protect_title, titlecase::TitleCase,
};

/// Bookkeeping fields of a captured item that are not bibliographic content.
const EXCLUDED_FIELDS: &[&str] = &[
    "id",
    "notes",
    "itemtype",
    "accessdate",
    "seealso",
    "attachments",
    "url",
    "journalabbreviation",
];

/// Serializes mapped entries into BibTeX records.
pub struct Serializer<'a> {
    pub dictionary: &'a Dictionary,
    pub casing: &'a dyn TitleCase,
    pub options: FormatOptions,
}

impl Serializer<'_> {
    pub fn serialize(&self, entry: &MappedEntry, key: &RecordKey) -> String {
        let indent = self.options.indent.as_str();
        let (left, right) = self.options.delimiter.pair();

        let mut fields: Vec<(String, &str)> = entry
            .fields()
            .filter_map(|(k, v)| Some((k.to_lowercase(), v?)))
            .filter(|(k, _)| !EXCLUDED_FIELDS.contains(&k.as_str()))
            .collect();
        if self.options.order == FieldOrder::Sorted {
            fields.sort_by(|a, b| a.0.cmp(&b.0));
        }

        let mut lines = Vec::with_capacity(fields.len());
        for (key, value) in fields {
            // U+2010 HYPHEN trips up LaTeX encoders
            let value = value.replace('\u{2010}', "-");
            match key.as_str() {
                "month" => {
                    if let Some(month) = normalize_month(&value) {
                        lines.push(format!("{key} = {month}"));
                    }
                }
                "title" => {
                    let title = protect_title(&value, self.dictionary, self.casing);
                    lines.push(format!("{key} = {left}{title}{right}"));
                }
                _ => lines.push(format!("{key} = {left}{value}{right}")),
            }
        }

        let mut out = format!("@{}{{{},\n", entry.item_type, key);
        if !lines.is_empty() {
            out.push_str(indent);
            let separator = format!(",\n{indent}");
            out.push_str(&lines.join(separator.as_str()));
            out.push('\n');
        }
        out.push('}');
        out
    }
}
