//! Commit message lint rules, applied as prompt validators (error level)
//! and as post-composition warnings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::commit::fields::CommitField;
use crate::inquiry::prompts::Validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Disabled,
    Warning,
    Error,
}

/// Whether the rule's condition must hold (`Always`) or must not (`Never`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleWhen {
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextCase {
    LowerCase,
    UpperCase,
    SentenceCase,
}

impl TextCase {
    fn matches(&self, value: &str) -> bool {
        match self {
            TextCase::LowerCase => value.to_lowercase() == value,
            TextCase::UpperCase => value.to_uppercase() == value,
            TextCase::SentenceCase => value.chars().next().is_some_and(char::is_uppercase),
        }
    }
}

impl fmt::Display for TextCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TextCase::LowerCase => "lower-case",
            TextCase::UpperCase => "upper-case",
            TextCase::SentenceCase => "sentence-case",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum RuleKind {
    Empty,
    MaxLength(usize),
    MinLength(usize),
    FullStop(String),
    Case(TextCase),
}

impl RuleKind {
    fn holds(&self, value: &str) -> bool {
        match self {
            RuleKind::Empty => value.trim().is_empty(),
            RuleKind::MaxLength(max) => value.chars().count() <= *max,
            RuleKind::MinLength(min) => value.chars().count() >= *min,
            RuleKind::FullStop(stop) => value.trim_end().ends_with(stop.as_str()),
            RuleKind::Case(case) => case.matches(value),
        }
    }

    fn describe(&self) -> String {
        match self {
            RuleKind::Empty => "be empty".to_string(),
            RuleKind::MaxLength(max) => format!("be longer than {max} characters"),
            RuleKind::MinLength(min) => format!("be shorter than {min} characters"),
            RuleKind::FullStop(stop) => format!("end with full stop `{stop}`"),
            RuleKind::Case(case) => format!("be {case}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub field: CommitField,
    pub level: RuleLevel,
    pub when: RuleWhen,
    pub rule: RuleKind,
}

impl FieldRule {
    pub fn new(field: CommitField, level: RuleLevel, when: RuleWhen, rule: RuleKind) -> Self {
        Self {
            field,
            level,
            when,
            rule,
        }
    }

    /// The violation message, or `None` when `value` satisfies the rule.
    /// Rules other than `Empty` ignore empty values.
    pub fn check(&self, value: &str) -> Option<String> {
        if self.level == RuleLevel::Disabled {
            return None;
        }
        if value.trim().is_empty() && self.rule != RuleKind::Empty {
            return None;
        }
        // Length rules read naturally as limits; the others as conditions.
        let (expected, verb) = match (&self.rule, self.when) {
            (RuleKind::MaxLength(_) | RuleKind::MinLength(_), RuleWhen::Always) => (true, "may not"),
            (RuleKind::MaxLength(_) | RuleKind::MinLength(_), RuleWhen::Never) => (false, "must"),
            (_, RuleWhen::Always) => (true, "must"),
            (_, RuleWhen::Never) => (false, "may not"),
        };
        if self.rule.holds(value) == expected {
            None
        } else {
            Some(format!("{} {verb} {}", self.field, self.rule.describe()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintRules {
    pub rules: Vec<FieldRule>,
    /// Scopes offered by the scope picker in addition to configured ones.
    pub scope_enum: Vec<String>,
}

impl Default for LintRules {
    fn default() -> Self {
        use CommitField::{Header, Subject, Type};
        use RuleKind::{Empty, FullStop, MaxLength};
        use RuleLevel::{Error, Warning};
        use RuleWhen::{Always, Never};
        Self {
            rules: vec![
                FieldRule::new(Header, Error, Always, MaxLength(100)),
                FieldRule::new(Type, Error, Never, Empty),
                FieldRule::new(Type, Error, Always, RuleKind::Case(TextCase::LowerCase)),
                FieldRule::new(Subject, Error, Never, Empty),
                FieldRule::new(Subject, Error, Never, FullStop(".".to_string())),
                FieldRule::new(CommitField::Body, Warning, Always, MaxLength(100)),
            ],
            scope_enum: Vec::new(),
        }
    }
}

impl LintRules {
    /// Messages of the rules at `level` that `value` violates for `field`.
    pub fn violations(&self, field: CommitField, level: RuleLevel, value: &str) -> Vec<String> {
        self.rules
            .iter()
            .filter(|rule| rule.field == field && rule.level == level)
            .filter_map(|rule| rule.check(value))
            .collect()
    }

    /// Prompt validator enforcing the error-level rules of `field`.
    pub fn validator_for(&self, field: CommitField) -> Validator {
        let rules: Vec<FieldRule> = self
            .rules
            .iter()
            .filter(|rule| rule.field == field && rule.level == RuleLevel::Error)
            .cloned()
            .collect();
        if rules.is_empty() {
            return Validator::None;
        }
        Validator::custom(move |value| {
            let messages: Vec<String> = rules.iter().filter_map(|rule| rule.check(value)).collect();
            if messages.is_empty() {
                Ok(())
            } else {
                Err(messages.join(", "))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_block_empty_and_full_stop_subjects() {
        let validator = LintRules::default().validator_for(CommitField::Subject);
        assert_eq!(
            validator.validate("").unwrap_err().message,
            "subject may not be empty"
        );
        assert_eq!(
            validator.validate("add parser.").unwrap_err().message,
            "subject may not end with full stop `.`"
        );
        assert!(validator.validate("add parser").is_ok());
    }

    #[test]
    fn length_rules_report_limits() {
        let rule = FieldRule::new(
            CommitField::Header,
            RuleLevel::Error,
            RuleWhen::Always,
            RuleKind::MaxLength(5),
        );
        assert_eq!(
            rule.check("abcdef").as_deref(),
            Some("header may not be longer than 5 characters")
        );
        assert!(rule.check("abcde").is_none());
        assert!(rule.check("").is_none());
    }

    #[test]
    fn warnings_are_not_enforced_by_validators() {
        let rules = LintRules::default();
        let long_body = "x".repeat(120);
        assert!(rules.validator_for(CommitField::Body).validate(&long_body).is_ok());
        assert_eq!(
            rules.violations(CommitField::Body, RuleLevel::Warning, &long_body),
            vec!["body may not be longer than 100 characters".to_string()]
        );
    }

    #[test]
    fn disabled_rules_never_fire() {
        let rule = FieldRule::new(
            CommitField::Subject,
            RuleLevel::Disabled,
            RuleWhen::Never,
            RuleKind::Empty,
        );
        assert!(rule.check("").is_none());
    }

    #[test]
    fn case_rule_round_trips_through_json() {
        let rule = FieldRule::new(
            CommitField::Type,
            RuleLevel::Error,
            RuleWhen::Always,
            RuleKind::Case(TextCase::LowerCase),
        );
        let json = serde_json::to_string(&rule).unwrap();
        assert!(json.contains(r#""rule":{"kind":"case","value":"lower-case"}"#));
        assert_eq!(serde_json::from_str::<FieldRule>(&json).unwrap(), rule);
        assert_eq!(
            rule.check("Feat").as_deref(),
            Some("type must be lower-case")
        );
    }
}
