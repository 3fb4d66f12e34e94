use crate::features::{check_sender_info, check_urgent_language, extract_urls};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MISSING_FOOTER_INDICATOR: &str = "Missing sender contact information in footer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreatLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "High Risk")]
    High,
}

impl ThreatLevel {
    /// Every indicator weighs the same; only the count matters.
    pub fn from_indicator_count(count: usize) -> Self {
        match count {
            0 => ThreatLevel::Low,
            1 => ThreatLevel::Medium,
            _ => ThreatLevel::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Low => "Low Risk",
            ThreatLevel::Medium => "Medium Risk",
            ThreatLevel::High => "High Risk",
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub threat_level: ThreatLevel,
    pub indicators: Vec<String>,
}

/// Run the three scans over raw email text and grade the result.
///
/// Indicators are emitted in a fixed order: urgent language, links, then
/// the missing-footer warning. The footer warning fires when the footer
/// window contains none of the contact phrases; empty input is not graded.
pub fn analyze(text: &str) -> AnalysisResult {
    let mut indicators = Vec::new();

    let urgent_found = check_urgent_language(text);
    if !urgent_found.is_empty() {
        indicators.push(format!(
            "Urgent language detected: {}",
            urgent_found.join(", ")
        ));
    }

    let urls = extract_urls(text);
    if !urls.is_empty() {
        indicators.push(format!("Links found: {}", urls.join(", ")));
    }

    if !text.is_empty() && check_sender_info(text).is_empty() {
        indicators.push(MISSING_FOOTER_INDICATOR.to_string());
    }

    let threat_level = ThreatLevel::from_indicator_count(indicators.len());
    log::debug!(
        "Analyzed {} chars: {} ({} indicators)",
        text.chars().count(),
        threat_level,
        indicators.len()
    );

    AnalysisResult {
        threat_level,
        indicators,
    }
}
