use super::matching_phrases;

/// Phrases a legitimate sender usually leaves in the signature block.
pub const FOOTER_INDICATORS: [&str; 5] = [
    "contact us at",
    "company address",
    "@",
    "phone:",
    "email:",
];

/// Share of the text, counted from the end, treated as the footer.
const FOOTER_FRACTION: f64 = 0.2;

/// Lower-cased trailing 20% of `text`, measured in characters and truncated.
///
/// The window is never widened for short input: texts shorter than five
/// characters have an empty footer, so they never show contact info even
/// when the whole text is an address like `a@b`.
pub fn footer_window(text: &str) -> String {
    let total = text.chars().count();
    let take = (total as f64 * FOOTER_FRACTION) as usize;
    text.chars()
        .skip(total - take)
        .collect::<String>()
        .to_lowercase()
}

/// Footer phrases present in the footer window, in list order.
pub fn check_sender_info(text: &str) -> Vec<&'static str> {
    matching_phrases(&footer_window(text), &FOOTER_INDICATORS)
}
