//! Compiled bias policy and the checks run on every message and reply.

use lazy_static::lazy_static;
use log::debug;
use regex::{NoExpand, Regex};
use serde::Serialize;

use crate::error::Result;

use super::policy::BiasPolicy;

lazy_static! {
    static ref BUILTIN: BiasDetector = BiasDetector::with_policy(&BiasPolicy::default())
        .expect("built-in bias policy patterns are valid");
}

/// One biased phrase found in a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BiasFinding {
    /// The full matched substring, lower-cased
    pub matched: String,
    /// Source pattern that produced the match
    pub pattern: String,
}

/// Outcome of [`BiasDetector::detect_bias`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BiasReport {
    pub has_bias: bool,
    /// In pattern order, then left-to-right within the text
    pub findings: Vec<BiasFinding>,
}

impl BiasReport {
    /// Just the matched phrases, in finding order.
    #[must_use]
    pub fn matched_phrases(&self) -> Vec<String> {
        self.findings.iter().map(|f| f.matched.clone()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct BiasDetector {
    bias_patterns: Vec<Regex>,
    positive_patterns: Vec<Regex>,
    mitigations: Vec<(Regex, String)>,
}

impl Default for BiasDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl BiasDetector {
    /// Detector for the built-in policy.
    #[must_use]
    pub fn new() -> Self {
        BUILTIN.clone()
    }

    /// Compile a custom policy.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AshaError::Pattern`] if any pattern is not a
    /// valid regular expression.
    pub fn with_policy(policy: &BiasPolicy) -> Result<Self> {
        let bias_patterns = policy
            .bias_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let positive_patterns = policy
            .positive_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let mitigations = policy
            .mitigations
            .iter()
            .map(|(trigger, replacement)| {
                Regex::new(&format!(r"(?i)\b{}\b", regex::escape(trigger)))
                    .map(|re| (re, replacement.clone()))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            bias_patterns,
            positive_patterns,
            mitigations,
        })
    }

    /// Find every biased phrasing in `text`.
    ///
    /// Every pattern is evaluated independently; a text can produce several
    /// findings per pattern.
    #[must_use]
    pub fn detect_bias(&self, text: &str) -> BiasReport {
        let lowered = text.to_lowercase();
        let findings: Vec<BiasFinding> = self
            .bias_patterns
            .iter()
            .flat_map(|re| {
                re.find_iter(&lowered).map(move |m| BiasFinding {
                    matched: m.as_str().to_string(),
                    pattern: re.as_str().to_string(),
                })
            })
            .collect();

        if !findings.is_empty() {
            debug!("Bias check found {} phrases", findings.len());
        }

        BiasReport {
            has_bias: !findings.is_empty(),
            findings,
        }
    }

    /// Whether `text` contains any affirming phrasing.
    #[must_use]
    pub fn check_positive_reinforcement(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.positive_patterns.iter().any(|re| re.is_match(&lowered))
    }

    /// Rewrite trigger phrases into softer alternatives.
    ///
    /// Substitutions are whole-word, case-insensitive and run in table order
    /// over the original text, so an earlier rewrite can consume text a later
    /// trigger would have matched. The output is not grammatically repaired.
    #[must_use]
    pub fn suggest_mitigation(&self, text: &str) -> String {
        let mut mitigated = text.to_string();
        for (trigger, replacement) in &self.mitigations {
            let rewritten = trigger.replace_all(&mitigated, NoExpand(replacement.as_str()));
            mitigated = rewritten.into_owned();
        }
        mitigated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bias::policy::{BIAS_PATTERNS, MITIGATIONS};

    #[test]
    fn neutral_text_has_no_bias() {
        let detector = BiasDetector::new();
        for text in [
            "",
            "it is raining",
            "Everyone should update their resume",
            "The team must ship on Friday",
        ] {
            assert_eq!(detector.detect_bias(text), BiasReport::default(), "{text}");
        }
    }

    #[test]
    fn detects_prescriptive_phrase() {
        let detector = BiasDetector::new();
        let report = detector.detect_bias("I think Women Should apply elsewhere");
        assert!(report.has_bias);
        assert_eq!(report.matched_phrases(), vec!["women should", "men should"]);
    }

    #[test]
    fn subject_matches_inside_longer_words() {
        let detector = BiasDetector::new();
        let report = detector.detect_bias("women must rest, girls belong at home");
        assert_eq!(
            report.matched_phrases(),
            vec!["women must", "men must", "girls belong"]
        );

        let report = detector.detect_bias("Salesmen must close deals");
        assert_eq!(report.matched_phrases(), vec!["men must"]);

        let report = detector.detect_bias("the chairmen should decide");
        assert_eq!(report.matched_phrases(), vec!["men should"]);
    }

    #[test]
    fn findings_follow_pattern_then_text_order() {
        let detector = BiasDetector::new();
        let report = detector
            .detect_bias("Boys can't cry. Girls should smile. Men should lead. Women are too emotional.");
        assert_eq!(
            report.matched_phrases(),
            vec![
                "girls should",
                "men should",
                "boys can't",
                "women are too emotional",
            ]
        );
        assert_eq!(report.findings[0].pattern, BIAS_PATTERNS[0]);
    }

    #[test]
    fn repeated_phrase_is_reported_each_time() {
        let detector = BiasDetector::new();
        let report = detector.detect_bias("men must work; men must provide");
        assert_eq!(report.matched_phrases(), vec!["men must", "men must"]);
    }

    #[test]
    fn positive_reinforcement() {
        let detector = BiasDetector::new();
        assert!(detector.check_positive_reinforcement("women can achieve anything"));
        assert!(detector.check_positive_reinforcement("Girls EXCEL at chess"));
        assert!(!detector.check_positive_reinforcement("it is raining"));
        assert!(!detector.check_positive_reinforcement(""));
    }

    #[test]
    fn mitigation_rewrites_original_case_text() {
        let detector = BiasDetector::new();
        assert_eq!(
            detector.suggest_mitigation("Women SHOULD stay. Men Must lead."),
            "Women can consider stay. Men may choose to lead."
        );
        assert_eq!(
            detector.suggest_mitigation("Women belong in leadership."),
            "Women can contribute to in leadership."
        );
    }

    #[test]
    fn mitigation_is_whole_word() {
        let detector = BiasDetector::new();
        let text = "The mustard is a must for the shoulder season";
        assert_eq!(
            detector.suggest_mitigation(text),
            "The mustard is a may choose to for the shoulder season"
        );
    }

    #[test]
    fn earlier_rewrite_shadows_later_trigger() {
        let detector = BiasDetector::new();
        // "should" fires before "should not" in the table
        assert_eq!(
            detector.suggest_mitigation("girls should not code"),
            "girls can consider not code"
        );
    }

    #[test]
    fn mitigated_text_no_longer_reads_as_biased() {
        let detector = BiasDetector::new();
        for text in [
            "Women should stay home",
            "men must be strong",
            "Girls can't lead teams",
            "Women cannot negotiate",
            "boys shouldn't cry",
            "women should not apply",
            "Women belong in the kitchen",
            "women are too emotional",
            "A man is too aggressive, men are too aggressive",
            "girls need to smile and boys ought to fight",
        ] {
            let mitigated = detector.suggest_mitigation(text);
            assert!(!detector.detect_bias(&mitigated).has_bias, "{text} -> {mitigated}");
        }
    }

    #[test]
    fn replacements_never_trigger_bias() {
        let detector = BiasDetector::new();
        for (_, replacement) in MITIGATIONS {
            for subject in ["women", "men", "girls", "boys", "female", "male"] {
                let text = format!("{subject} {replacement} lead");
                assert!(!detector.detect_bias(&text).has_bias, "{text}");
            }
        }
    }

    #[test]
    fn mitigation_is_idempotent_on_clean_output() {
        let detector = BiasDetector::new();
        let once = detector.suggest_mitigation("Women must negotiate and men cannot cry");
        assert_eq!(detector.suggest_mitigation(&once), once);
    }

    #[test]
    fn custom_policy_extends_tables() {
        let mut policy = BiasPolicy::default();
        policy.bias_patterns.push(r"\bnot a job for (women|men)".to_string());
        policy.mitigations.push(("not a job for".to_string(), "a job open to".to_string()));

        let detector = BiasDetector::with_policy(&policy).map_err(|e| e.to_string());
        let Ok(detector) = detector else {
            panic!("custom policy should compile");
        };
        let report = detector.detect_bias("Nursing is not a job for men");
        assert_eq!(report.matched_phrases(), vec!["not a job for men"]);
        assert_eq!(
            detector.suggest_mitigation("Nursing is not a job for men"),
            "Nursing is a job open to men"
        );
    }

    #[test]
    fn invalid_custom_pattern_is_rejected() {
        let policy = BiasPolicy {
            bias_patterns: vec!["(unclosed".to_string()],
            ..BiasPolicy::default()
        };
        assert!(BiasDetector::with_policy(&policy).is_err());
    }
}
