use crate::money::{Cents, Rate};
use serde::{Deserialize, Serialize};

/// Engine tunables.
///
/// Example YAML:
/// ```yaml
/// advisor:
///   processing_fee:
///     percent: 2.9
///     fixed: 0.30
///   split:
///     max_cards: 3
///     candidate_limit: 6
///   strict_velocity_issuers: ["Chase"]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AdvisorConfig {
    /// Surcharge for routing a payment through a card rail
    #[serde(default)]
    pub processing_fee: ProcessingFeeConfig,

    #[serde(default)]
    pub split: SplitConfig,

    /// Issuers that decline applicants with 5+ recent new accounts
    #[serde(default = "default_strict_velocity_issuers")]
    pub strict_velocity_issuers: Vec<String>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            processing_fee: ProcessingFeeConfig::default(),
            split: SplitConfig::default(),
            strict_velocity_issuers: default_strict_velocity_issuers(),
        }
    }
}

fn default_strict_velocity_issuers() -> Vec<String> {
    vec!["Chase".to_string()]
}

/// Percentage-plus-fixed processing fee, e.g. 2.9% + $0.30.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProcessingFeeConfig {
    pub percent: Rate,
    pub fixed: Cents,
}

impl Default for ProcessingFeeConfig {
    fn default() -> Self {
        Self {
            percent: Rate(290),
            fixed: Cents(30),
        }
    }
}

impl ProcessingFeeConfig {
    /// Fee for paying `amount` on this rail, rounded to the cent
    pub fn fee_for(&self, amount: Cents) -> Cents {
        self.percent.apply(amount) + self.fixed
    }
}

/// Bounds for the split optimizer search.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SplitConfig {
    /// Most cards a payment may be split across
    #[serde(default = "default_max_cards")]
    pub max_cards: usize,

    /// How many top-ranked cards the optimizer looks at
    #[serde(default = "default_candidate_limit")]
    pub candidate_limit: usize,
}

fn default_max_cards() -> usize {
    3
}

fn default_candidate_limit() -> usize {
    6
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            max_cards: default_max_cards(),
            candidate_limit: default_candidate_limit(),
        }
    }
}
