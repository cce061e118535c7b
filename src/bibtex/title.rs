//! Brace protection for titles.
//!
//! Bibliography styles recase titles, which mangles names (Newton) and
//! abbreviations (GMRES) unless they are wrapped in curly braces. This module
//! decides which parts of a raw title need that wrapping and then applies a
//! title-casing policy to the rest.

use crate::dictionary::{Dictionary, capitalize};

use super::{brace_depth, titlecase::TitleCase};

/// Protect a raw title and title-case the remainder.
pub fn protect_title(raw: &str, dictionary: &Dictionary, casing: &dyn TitleCase) -> String {
    // A completely capitalised title is most likely a mistake.
    let title = if is_shouting(raw) {
        naive_title(raw)
    } else {
        raw.to_string()
    };

    let mut protected = Vec::new();
    let mut depth = 0;
    let mut after_colon = false;
    for word in title.split_whitespace() {
        let inside = depth > 0;
        protected.push(if inside {
            word.to_string()
        } else if after_colon && !word.starts_with('{') {
            // Subtitles, as in "Algorithm 694: {A} collection ..."
            format!("{{{}}}", capitalize(word))
        } else {
            protect_word(word, dictionary)
        });
        depth = brace_depth(word, depth);
        after_colon = !inside && depth == 0 && word.ends_with(':');
    }

    casing.apply(&protected.join(" "))
}

/// Protect the hyphen segments of a word that starts outside any braces.
fn protect_word(word: &str, dictionary: &Dictionary) -> String {
    let mut depth = 0;
    word.split('-')
        .map(|seg| {
            let out = if depth > 0 {
                seg.to_string()
            } else if needs_protection(seg, dictionary) {
                format!("{{{seg}}}")
            } else {
                seg.to_string()
            };
            depth = brace_depth(seg, depth);
            out
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn needs_protection(seg: &str, dictionary: &Dictionary) -> bool {
    if seg.is_empty() {
        return false;
    }
    // Unbalanced braces: leave malformed input alone.
    if seg.matches('{').count() != seg.matches('}').count() {
        return false;
    }
    if seg.starts_with('{') && seg.ends_with('}') {
        return false;
    }
    // Acronyms and camel case
    if seg.chars().skip(1).any(char::is_uppercase) {
        return true;
    }
    let core = seg.trim_matches(|c: char| !c.is_alphanumeric());
    seg.chars().any(char::is_uppercase) && dictionary.is_proper_noun(core)
}

/// True if the title has letters outside braces and all of them are uppercase.
fn is_shouting(title: &str) -> bool {
    let mut depth = 0usize;
    let mut letters = false;
    for c in title.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            c if depth == 0 && c.is_alphabetic() => {
                if c.is_lowercase() {
                    return false;
                }
                letters = true;
            }
            _ => {}
        }
    }
    letters
}

/// Capitalise the first letter of every letter run and lowercase the rest,
/// leaving braced text as it is.
fn naive_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut depth = 0usize;
    let mut prev_letter = false;
    for c in title.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if depth > 0 || c == '}' {
            out.push(c);
            prev_letter = false;
        } else if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}
