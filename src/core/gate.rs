//! Keyword gate deciding whether a question is worth an inference call.

/// Fixed domain vocabulary. Matching is substring-based, so "cropped" matches
/// "crop"; that looseness is accepted to keep the gate permissive.
const KEYWORDS: &[&str] = &[
    "crop",
    "soil",
    "fertilizer",
    "weather",
    "market",
    "pest",
    "disease",
    "harvest",
    "irrigation",
    "farmer",
    "agriculture",
    "seed",
    "climate",
    "farming",
    "tractor",
    "rainfall",
    "spray",
    "yield",
];

/// Canned reply for questions the gate turns away.
pub const OFF_TOPIC_REPLY: &str = "I'm here to help only with farming and agricultural questions. Could you please ask something related to farming?";

/// Returns true when at least one domain keyword occurs anywhere in the
/// lower-cased input.
pub fn is_on_topic(text: &str) -> bool {
    let lowered = text.to_lowercase();
    KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}
