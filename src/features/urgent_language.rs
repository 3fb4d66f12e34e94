use super::matching_phrases;

/// Pressure phrases typical of phishing lures, in reporting order.
pub const URGENT_KEYWORDS: [&str; 5] = [
    "urgent",
    "immediate",
    "asap",
    "action required",
    "account suspended",
];

/// Case-insensitive scan for urgent keywords.
///
/// Matches are substrings, so "immediately" also reports "immediate".
pub fn check_urgent_language(text: &str) -> Vec<&'static str> {
    let found = matching_phrases(&text.to_lowercase(), &URGENT_KEYWORDS);
    if !found.is_empty() {
        log::debug!("Urgent keywords matched: {:?}", found);
    }
    found
}
