//! Declarative option rules.
//!
//! Platform- and option-conditional option handling is expressed as an
//! ordered table of rules instead of inline conditionals, so the set of
//! adjustments a recipe makes can be listed and tested exhaustively.

use std::fmt;

use crate::core::options::{OptionMap, OptionValue, FPIC, SHARED};
use crate::core::platform::{HostProfile, Os};

/// When a rule fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleCondition {
    /// Host OS equals the given OS
    Os(Os),
    /// Another option currently has the given value
    OptionEquals {
        option: &'static str,
        value: OptionValue,
    },
}

impl RuleCondition {
    fn matches(&self, options: &OptionMap, host: &HostProfile) -> bool {
        match self {
            RuleCondition::Os(os) => host.os == *os,
            RuleCondition::OptionEquals { option, value } => options.get(option) == Some(value),
        }
    }
}

impl fmt::Display for RuleCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCondition::Os(os) => write!(f, "os == {}", os),
            RuleCondition::OptionEquals { option, value } => write!(f, "{} == {}", option, value),
        }
    }
}

/// What a rule does to its option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleAction {
    /// Drop the option entirely
    Remove,
    /// Pin the option to a value
    Force(OptionValue),
}

/// A single `condition → option → action` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRule {
    pub condition: RuleCondition,
    pub option: &'static str,
    pub action: RuleAction,
}

impl OptionRule {
    /// Remove `option` on the given OS.
    pub fn remove_on(os: Os, option: &'static str) -> Self {
        OptionRule {
            condition: RuleCondition::Os(os),
            option,
            action: RuleAction::Remove,
        }
    }

    /// Remove `option` when `when` has value `value`.
    pub fn remove_when(
        option: &'static str,
        when: &'static str,
        value: impl Into<OptionValue>,
    ) -> Self {
        OptionRule {
            condition: RuleCondition::OptionEquals {
                option: when,
                value: value.into(),
            },
            option,
            action: RuleAction::Remove,
        }
    }

    /// Force `option` to `forced` when `when` has value `value`.
    pub fn force_when(
        option: &'static str,
        forced: impl Into<OptionValue>,
        when: &'static str,
        value: impl Into<OptionValue>,
    ) -> Self {
        OptionRule {
            condition: RuleCondition::OptionEquals {
                option: when,
                value: value.into(),
            },
            option,
            action: RuleAction::Force(forced.into()),
        }
    }
}

impl fmt::Display for OptionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            RuleAction::Remove => write!(f, "{} => remove {}", self.condition, self.option),
            RuleAction::Force(value) => {
                write!(f, "{} => {}={}", self.condition, self.option, value)
            }
        }
    }
}

/// The position-independent-code rules shared by every recipe with `fPIC`.
///
/// `fPIC` means nothing on Windows, and shared linking always produces
/// position-independent code.
pub fn fpic_rules() -> Vec<OptionRule> {
    vec![
        OptionRule::remove_on(Os::Windows, FPIC),
        OptionRule::remove_when(FPIC, SHARED, true),
    ]
}

/// Apply rules in order, returning the ones that changed something.
///
/// Each rule sees the options as left by the rules before it.
pub fn apply_rules<'r>(
    rules: &'r [OptionRule],
    options: &mut OptionMap,
    host: &HostProfile,
) -> Vec<&'r OptionRule> {
    let mut applied = Vec::new();

    for rule in rules {
        if !rule.condition.matches(options, host) {
            continue;
        }

        let changed = match &rule.action {
            RuleAction::Remove => options.remove(rule.option).is_some(),
            RuleAction::Force(value) => {
                let changed = options.get(rule.option) != Some(value);
                options.set(rule.option, value.clone());
                changed
            }
        };

        if changed {
            tracing::debug!("option rule applied: {}", rule);
            applied.push(rule);
        }
    }

    applied
}
