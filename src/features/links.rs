use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref URL_PATTERN: Regex = Regex::new(r"https?://[^\s\x1c-\x1f]+").unwrap();
}

/// Extract every `http://` or `https://` run up to the next whitespace.
///
/// The ASCII file/group/record/unit separators (0x1C-0x1F) also end a URL.
/// No further validation: trailing punctuation stays part of the URL.
pub fn extract_urls(text: &str) -> Vec<&str> {
    URL_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}
