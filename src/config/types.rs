use crate::types::Severity;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub rules: RuleConfig,
    pub include_patterns: Vec<Regex>,
    pub exclude_patterns: Vec<Regex>,
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default)]
    pub large_tuple: LargeTupleConfig,
}

/// A member-count limit paired with the severity reported when it is exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeverityThreshold {
    pub severity: Severity,
    pub limit: usize,
}

impl SeverityThreshold {
    #[must_use]
    pub fn new(severity: Severity, limit: usize) -> Self {
        Self { severity, limit }
    }
}

/// How far the "all members labelled" exemption reaches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelExemption {
    /// A fully labelled tuple never triggers any tier.
    #[default]
    AllTiers,
    /// A fully labelled tuple is exempt from a tier only when its member
    /// count equals that tier's limit.
    ExactLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LargeTupleConfig {
    #[serde(default = "default_warning")]
    pub warning: usize,
    #[serde(default = "default_error")]
    pub error: Option<usize>,
    /// Explicit tiers, evaluated in order. Overrides `warning`/`error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiers: Option<Vec<SeverityThreshold>>,
    #[serde(default)]
    pub label_exemption: LabelExemption,
}

impl Default for LargeTupleConfig {
    fn default() -> Self {
        Self {
            warning: default_warning(),
            error: default_error(),
            tiers: None,
            label_exemption: LabelExemption::default(),
        }
    }
}

impl LargeTupleConfig {
    /// Tiers in evaluation order. The shorthand form checks `error` first so
    /// the most severe tier a tuple exceeds is the one reported.
    #[must_use]
    pub fn thresholds(&self) -> Vec<SeverityThreshold> {
        if let Some(tiers) = &self.tiers {
            return tiers.clone();
        }
        let mut out = Vec::with_capacity(2);
        if let Some(error) = self.error {
            out.push(SeverityThreshold::new(Severity::Error, error));
        }
        out.push(SeverityThreshold::new(Severity::Warning, self.warning));
        out
    }
}

const fn default_warning() -> usize {
    2
}

#[allow(clippy::unnecessary_wraps)]
const fn default_error() -> Option<usize> {
    Some(3)
}

/// On-disk shape of `tuplelint.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TupleLintToml {
    #[serde(default)]
    pub large_tuple: LargeTupleConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub verbose: bool,
}
