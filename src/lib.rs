//! Local endpoint for the browser connector capture protocol that files captured
//! pages as BibTeX records.

pub mod bibtex;
pub mod cli;
pub mod config;
pub mod dictionary;
pub mod pipeline;
pub mod server;
pub mod translator;
