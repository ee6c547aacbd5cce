//! Academic classification rules

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Label reported when no rule matches a GPA
pub const UNCLASSIFIED: &str = "—";

/// A single threshold rule: GPAs at or above `minimum_gpa` earn `label`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRule {
    /// Lowest GPA that qualifies for this class
    #[serde(rename = "min", alias = "minimumGpa")]
    pub minimum_gpa: f64,

    /// Class label (e.g., "First Class")
    pub label: String,
}

impl ClassificationRule {
    /// Create a new rule
    #[must_use]
    pub const fn new(minimum_gpa: f64, label: String) -> Self {
        Self { minimum_gpa, label }
    }
}

/// Ordered classification rules, evaluated first to last
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ClassificationRules(Vec<ClassificationRule>);

impl ClassificationRules {
    /// Wrap rules in evaluation order
    #[must_use]
    pub const fn new(rules: Vec<ClassificationRule>) -> Self {
        Self(rules)
    }

    /// Label of the first rule whose minimum is at or below `gpa`, or [`UNCLASSIFIED`]
    #[must_use]
    pub fn classify(&self, gpa: f64) -> &str {
        self.0
            .iter()
            .find(|rule| rule.minimum_gpa <= gpa)
            .map_or(UNCLASSIFIED, |rule| rule.label.as_str())
    }

    /// Whether some rule matches every non-negative GPA
    #[must_use]
    pub fn has_catch_all(&self) -> bool {
        self.0.iter().any(|rule| rule.minimum_gpa <= 0.0)
    }

    /// Rules in evaluation order
    pub fn iter(&self) -> std::slice::Iter<'_, ClassificationRule> {
        self.0.iter()
    }

    /// Number of rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no rules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Accepts either a keyed table (`{"first": {...}, ...}`), kept in document
/// order, or a plain array of rules.
impl<'de> Deserialize<'de> for ClassificationRules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RulesVisitor;

        impl<'de> Visitor<'de> for RulesVisitor {
            type Value = ClassificationRules;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table or array of classification rules")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut rules = Vec::new();
                while let Some((_key, rule)) = map.next_entry::<String, ClassificationRule>()? {
                    rules.push(rule);
                }
                Ok(ClassificationRules(rules))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut rules = Vec::new();
                while let Some(rule) = seq.next_element::<ClassificationRule>()? {
                    rules.push(rule);
                }
                Ok(ClassificationRules(rules))
            }
        }

        deserializer.deserialize_any(RulesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eusl_rules() -> ClassificationRules {
        ClassificationRules::new(vec![
            ClassificationRule::new(3.7, "First Class".to_string()),
            ClassificationRule::new(3.3, "Second Class (Upper Division)".to_string()),
            ClassificationRule::new(3.0, "Second Class (Lower Division)".to_string()),
            ClassificationRule::new(2.0, "Pass".to_string()),
        ])
    }

    #[test]
    fn test_classify_thresholds() {
        let rules = eusl_rules();
        assert_eq!(rules.classify(4.0), "First Class");
        assert_eq!(rules.classify(3.7), "First Class");
        assert_eq!(rules.classify(3.69), "Second Class (Upper Division)");
        assert_eq!(rules.classify(3.0), "Second Class (Lower Division)");
        assert_eq!(rules.classify(2.0), "Pass");
    }

    #[test]
    fn test_no_match_is_unclassified() {
        let rules = eusl_rules();
        assert!(!rules.has_catch_all());
        assert_eq!(rules.classify(1.99), UNCLASSIFIED);
        assert_eq!(ClassificationRules::default().classify(4.0), UNCLASSIFIED);
    }

    #[test]
    fn test_first_match_wins_in_given_order() {
        // Insertion order is evaluation order, even when thresholds are not sorted
        let rules = ClassificationRules::new(vec![
            ClassificationRule::new(0.0, "Anything".to_string()),
            ClassificationRule::new(3.7, "First Class".to_string()),
        ]);
        assert!(rules.has_catch_all());
        assert_eq!(rules.classify(4.0), "Anything");
    }

    #[test]
    fn test_deserialize_table_keeps_document_order() {
        let json = r#"{
            "first": {"min": 3.7, "label": "First Class"},
            "pass": {"min": 2.0, "label": "Pass"},
            "fail": {"min": 0.0, "label": "Fail"}
        }"#;
        let rules: ClassificationRules = serde_json::from_str(json).expect("rules should parse");
        let labels: Vec<&str> = rules.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["First Class", "Pass", "Fail"]);
    }

    #[test]
    fn test_deserialize_array() {
        let json = r#"[{"minimumGpa": 2.0, "label": "Pass"}]"#;
        let rules: ClassificationRules = serde_json::from_str(json).expect("rules should parse");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.classify(2.5), "Pass");
    }
}
