//! URL-path routing for the dictionary site.
//!
//! Word pages live at `/browse/<prefix>/<word>/`, prefix listings at
//! `/browse/<prefix>/`, where a prefix is the first character of the words it
//! lists. None of these helpers check that a word actually exists.

use std::fmt;

/// Kind of page addressed by a URL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageType {
    Root,
    About,
    Prefix,
    Word,
    NoSuchPage,
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PageType::Root => "root",
            PageType::About => "about",
            PageType::Prefix => "prefix",
            PageType::Word => "word",
            PageType::NoSuchPage => "no-such-page",
        };
        f.write_str(s)
    }
}

const BROWSE: &str = "browse";

/// Determines the page type of `path`. Paths must carry their trailing slash.
pub fn determine_page_type(path: &str) -> PageType {
    match path {
        "/" => PageType::Root,
        "/about/" => PageType::About,
        _ if is_valid_prefix_url_path(path) => PageType::Prefix,
        _ if is_valid_word_url_path(path) => PageType::Word,
        _ => PageType::NoSuchPage,
    }
}

/// `["", "browse", x, ""]` shaped path segments, returning the middle segments.
fn browse_segments(path: &str, n: usize) -> Option<Vec<&str>> {
    let ss: Vec<&str> = path.split('/').collect();
    if ss.len() != n + 3 || !ss[0].is_empty() || ss[1] != BROWSE || !ss[n + 2].is_empty() {
        return None;
    }
    Some(ss[2..n + 2].to_vec())
}

/// True for `/browse/<c>/` where `<c>` is a single character.
pub fn is_valid_prefix_url_path(path: &str) -> bool {
    match browse_segments(path, 1) {
        Some(ss) => !ss[0].is_empty() && ss[0] == first_character_of_word(ss[0]),
        None => false,
    }
}

/// True for `/browse/<prefix>/<word>/` where `<word>` starts with `<prefix>`.
pub fn is_valid_word_url_path(path: &str) -> bool {
    match browse_segments(path, 2) {
        Some(ss) => ss[1].starts_with(ss[0]),
        None => false,
    }
}

/// Prefix embedded in a valid prefix path, e.g. `/browse/s/` → `s`.
pub fn prefix_from_url_path(path: &str) -> Option<&str> {
    if !is_valid_prefix_url_path(path) {
        return None;
    }
    path.split('/').nth(2)
}

/// Word embedded in a valid word path, e.g. `/browse/s/sacca/` → `sacca`.
pub fn word_from_url_path(path: &str) -> Option<&str> {
    if !is_valid_word_url_path(path) {
        return None;
    }
    path.split('/').nth(3)
}

/// First Unicode scalar of `word` (`āpadā` → `ā`); empty for an empty word.
pub fn first_character_of_word(word: &str) -> &str {
    match word.chars().next() {
        Some(c) => &word[..c.len_utf8()],
        None => "",
    }
}

/// `/browse/ā/āpadā/` for `āpadā`.
pub fn word_url_path(word: &str) -> String {
    format!("/{}/{}/{}/", BROWSE, first_character_of_word(word), word)
}

/// `/browse/ā/` for `ā`.
pub fn prefix_url_path(prefix: &str) -> String {
    format!("/{}/{}/", BROWSE, prefix)
}
