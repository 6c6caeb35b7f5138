//! `tpk route` – classify a dictionary site URL path.

use tpk_core::site_path::{self, PageType};

pub fn run_route(path: &str) {
    let page = site_path::determine_page_type(path);
    match page {
        PageType::Prefix => {
            let prefix = site_path::prefix_from_url_path(path).unwrap_or_default();
            println!("{}\tprefix={}", page, prefix);
        }
        PageType::Word => {
            let word = site_path::word_from_url_path(path).unwrap_or_default();
            println!("{}\tword={}\tprefix={}", page, word, site_path::first_character_of_word(word));
        }
        _ => println!("{}", page),
    }
}
