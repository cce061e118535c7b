use std::sync::Arc;

use crate::{
    bibtex::{
        FormatOptions,
        key::{KeyGenerator, RandomKeys},
        serializer::Serializer,
        titlecase::{StandardTitleCase, TitleCase},
    },
    dictionary::Dictionary,
    translator::{CaptureItem, Translator, connector::ConnectorTranslator},
};

/// Everything needed to turn captured items into BibTeX records.
///
/// Built once at startup and shared read-only between requests.
#[derive(Clone)]
pub struct Pipeline {
    dictionary: Arc<Dictionary>,
    translator: Arc<dyn Translator + Send + Sync>,
    casing: Arc<dyn TitleCase>,
    keys: Arc<dyn KeyGenerator>,
    options: FormatOptions,
}

impl Pipeline {
    pub fn new(dictionary: Dictionary, options: FormatOptions) -> Self {
        Pipeline {
            dictionary: Arc::new(dictionary),
            translator: Arc::new(ConnectorTranslator),
            casing: Arc::new(StandardTitleCase),
            keys: Arc::new(RandomKeys),
            options,
        }
    }

    pub fn with_keys(mut self, keys: impl KeyGenerator + 'static) -> Self {
        self.keys = Arc::new(keys);
        self
    }

    pub fn with_title_case(mut self, casing: impl TitleCase + 'static) -> Self {
        self.casing = Arc::new(casing);
        self
    }

    /// One record per item, in input order.
    pub fn convert(&self, items: Vec<CaptureItem>) -> Vec<String> {
        let serializer = Serializer {
            dictionary: &self.dictionary,
            casing: self.casing.as_ref(),
            options: self.options,
        };
        items
            .into_iter()
            .map(|item| {
                let entry = self.translator.translate(item);
                serializer.serialize(&entry, &self.keys.next_key())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bibtex::key::RecordKey;
    use crate::bibtex::titlecase::TitleCase;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn items_become_keyed_records_in_order() {
        let counter = AtomicUsize::new(0);
        let pipeline = Pipeline::new(Dictionary::from_words(["Newton"]), FormatOptions::default())
            .with_keys(move || RecordKey::new(format!("KEY{:03}", counter.fetch_add(1, Ordering::SeqCst))));

        let items = vec![
            json!({
                "itemType": "journalArticle",
                "title": "the laws of Newton",
                "creators": [{"firstName": "Isaac", "lastName": "Newton"}],
                "date": "1687",
                "url": "https://example.org"
            }),
            json!({"itemType": "thesis", "title": "A GMRES method"}),
        ]
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect();

        let records = pipeline.convert(items);
        assert_eq!(
            records,
            [
                "@article{KEY000,\n author = {Newton, Isaac},\n title = {The Laws of {Newton}},\n year = {1687}\n}",
                "@phdthesis{KEY001,\n title = {A {GMRES} Method}\n}",
            ]
        );
    }

    struct Lowercase;

    impl TitleCase for Lowercase {
        fn apply(&self, title: &str) -> String {
            title.to_lowercase()
        }
    }

    #[test]
    fn title_casing_policy_is_pluggable() {
        let pipeline = Pipeline::new(Dictionary::default(), FormatOptions::default())
            .with_keys(|| RecordKey::new("K"))
            .with_title_case(Lowercase);
        let item = json!({"title": "The GMRES Method"}).as_object().cloned().unwrap();
        assert_eq!(
            pipeline.convert(vec![item]),
            ["@misc{K,\n title = {the {gmres} method}\n}"]
        );
    }
}
