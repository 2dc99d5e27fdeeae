//! Built-in bias, affirmation and mitigation tables.

/// Stereotyped phrasings: a gendered subject followed by a prescriptive or
/// restrictive verb. Matched against lower-cased text.
pub const BIAS_PATTERNS: &[&str] = &[
    r"(women|female|girls?)\s+(should|must|need to|ought to)",
    r"(men|male|boys?)\s+(should|must|need to|ought to)",
    r"(women|female|girls?)\s+(can't|cannot|shouldn't|should not)",
    r"(men|male|boys?)\s+(can't|cannot|shouldn't|should not)",
    r"(women|female|girls?)\s+(belong|belongs)",
    r"(men|male|boys?)\s+(belong|belongs)",
    r"(women|female|girls?)\s+(are|is)\s+(too|very)\s+(emotional|sensitive)",
    r"(men|male|boys?)\s+(are|is)\s+(too|very)\s+(aggressive|dominant)",
];

/// Ability-oriented phrasings. Matched against lower-cased text.
pub const POSITIVE_PATTERNS: &[&str] = &[
    r"(women|female|girls?)\s+(can|are able to|have the ability to)",
    r"(men|male|boys?)\s+(can|are able to|have the ability to)",
    r"(women|female|girls?)\s+(excel|succeed|achieve)",
    r"(men|male|boys?)\s+(excel|succeed|achieve)",
];

/// Trigger phrase and its softer replacement, applied in this order.
pub const MITIGATIONS: &[(&str, &str)] = &[
    ("should", "can consider"),
    ("must", "may choose to"),
    ("need to", "have the option to"),
    ("ought to", "might want to"),
    ("can't", "can explore alternative approaches to"),
    ("cannot", "can explore alternative approaches to"),
    ("shouldn't", "might consider alternative approaches to"),
    ("should not", "might consider alternative approaches to"),
    ("belong", "can contribute to"),
    ("are too", "may experience"),
    ("is too", "may experience"),
];

/// The policy a [`BiasDetector`](super::BiasDetector) is compiled from.
///
/// Kept as plain data so a deployment can extend the tables without touching
/// the detection code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiasPolicy {
    pub bias_patterns: Vec<String>,
    pub positive_patterns: Vec<String>,
    pub mitigations: Vec<(String, String)>,
}

impl Default for BiasPolicy {
    fn default() -> Self {
        Self {
            bias_patterns: BIAS_PATTERNS.iter().map(|p| (*p).to_string()).collect(),
            positive_patterns: POSITIVE_PATTERNS.iter().map(|p| (*p).to_string()).collect(),
            mitigations: MITIGATIONS
                .iter()
                .map(|(trigger, replacement)| ((*trigger).to_string(), (*replacement).to_string()))
                .collect(),
        }
    }
}
