use once_cell::sync::Lazy;
use regex::Regex;

use super::brace_depth;

/// A title-casing policy applied after brace protection.
///
/// Implementations must leave brace-delimited text untouched.
pub trait TitleCase: Send + Sync {
    fn apply(&self, title: &str) -> String;
}

/// English title case: minor words lowercased except at the edges and after
/// sentence punctuation, every other word capitalized.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardTitleCase;

static SMALL_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(a|an|and|as|at|but|by|en|for|if|in|nor|of|on|or|per|the|to|v\.?|via|vs\.?)$")
        .unwrap()
});
static INLINE_PERIOD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w\.\w").unwrap());

impl TitleCase for StandardTitleCase {
    fn apply(&self, title: &str) -> String {
        let words: Vec<&str> = title.split(' ').collect();
        let last = words.len().saturating_sub(1);
        let mut out = Vec::with_capacity(words.len());
        let mut after_break = true;
        let mut depth = 0;

        for (i, word) in words.iter().enumerate() {
            let edge = after_break || i == last;
            let inside = depth > 0;
            let mut segments = Vec::new();
            for (j, seg) in word.split('-').enumerate() {
                if depth > 0 {
                    segments.push(seg.to_string());
                } else {
                    segments.push(case_segment(seg, edge && j == 0));
                }
                depth = brace_depth(seg, depth);
            }
            out.push(segments.join("-"));
            // words in an open braced span neither open nor close a sentence
            if !inside && depth == 0 {
                after_break = word.ends_with([':', '.', '?', '!', ';']);
            }
        }
        out.join(" ")
    }
}

fn case_segment(seg: &str, edge: bool) -> String {
    if seg.is_empty()
        || seg.contains(['{', '}'])
        || INLINE_PERIOD.is_match(seg)
        || seg.chars().skip(1).any(char::is_uppercase)
    {
        return seg.to_string();
    }

    let core = seg.trim_matches(|c: char| !c.is_alphanumeric() && c != '.');
    if !edge && SMALL_WORD.is_match(core) {
        return seg.to_lowercase();
    }
    capitalize_first_letter(seg)
}

fn capitalize_first_letter(seg: &str) -> String {
    let mut out = String::with_capacity(seg.len());
    let mut done = false;
    for c in seg.chars() {
        if !done && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            done = true;
        } else {
            out.push(c);
        }
    }
    out
}
