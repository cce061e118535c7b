use serde::Deserialize;
use thiserror::Error;

use crate::bibtex::MappedEntry;

pub mod connector;

/// An item as posted by the browser connector: field name to JSON value.
pub type CaptureItem = serde_json::Map<String, serde_json::Value>;

/// Body of a connector save request.
#[derive(Debug, Deserialize)]
pub struct SaveItems {
    pub items: Vec<CaptureItem>,
}

/// Turns one captured item into BibTeX-oriented fields.
pub trait Translator {
    fn translate(&self, item: CaptureItem) -> MappedEntry;
}

/// A list-shaped field whose entries do not have the expected shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("creator {index} lacks a string lastName/firstName")]
    MalformedCreatorList { index: usize },
    #[error("tag {index} lacks a string tag label")]
    MalformedTagList { index: usize },
}
