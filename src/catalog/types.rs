use crate::money::{Cents, Rate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of ongoing rewards a card earns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardsType {
    CashBack,
    TravelPoints,
    StatementCredit,
    Flexible,
}

impl fmt::Display for RewardsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RewardsType::CashBack => "cash back",
            RewardsType::TravelPoints => "travel points",
            RewardsType::StatementCredit => "statement credit",
            RewardsType::Flexible => "flexible",
        };
        f.write_str(label)
    }
}

/// Credit score tier. Variant order is the comparison order:
/// `Below < Fair < Good < Excellent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditTier {
    Below,
    Fair,
    Good,
    Excellent,
}

impl fmt::Display for CreditTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CreditTier::Below => "below",
            CreditTier::Fair => "fair",
            CreditTier::Good => "good",
            CreditTier::Excellent => "excellent",
        };
        f.write_str(label)
    }
}

fn default_timeframe_months() -> u32 {
    3
}

fn default_active() -> bool {
    true
}

/// One catalog entry.
///
/// Money fields are written as plain dollar amounts and rates as percents:
/// ```yaml
/// - name: Sapphire Preferred
///   issuer: Chase
///   signup_bonus_value: 750
///   signup_bonus_spend_requirement: 4000
///   signup_bonus_timeframe_months: 3
///   annual_fee: 95
///   rewards_rate: 2
///   rewards_type: travel_points
///   min_credit_tier: good
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CardRecord {
    pub name: String,
    pub issuer: String,

    #[serde(default)]
    pub signup_bonus_value: Cents,

    /// Spend needed to unlock the bonus; None means the bonus is unconditional
    #[serde(default)]
    pub signup_bonus_spend_requirement: Option<Cents>,

    #[serde(default = "default_timeframe_months")]
    pub signup_bonus_timeframe_months: u32,

    #[serde(default)]
    pub annual_fee: Cents,

    #[serde(default)]
    pub first_year_fee_waived: bool,

    /// Percent of spend returned as rewards
    #[serde(default)]
    pub rewards_rate: Option<Rate>,

    pub rewards_type: RewardsType,

    #[serde(default)]
    pub min_credit_tier: Option<CreditTier>,

    #[serde(default)]
    pub is_business_card: bool,

    #[serde(default = "default_active")]
    pub active: bool,
}

impl CardRecord {
    /// Check the record's numeric invariants. Returns the first violation found.
    ///
    /// Rates can't be negative by construction (`Rate` is unsigned), so only the
    /// signed money fields need checking here.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        let amounts = [
            ("annual_fee", Some(self.annual_fee)),
            ("signup_bonus_value", Some(self.signup_bonus_value)),
            ("signup_bonus_spend_requirement", self.signup_bonus_spend_requirement),
        ];
        for (field, amount) in amounts {
            let Some(amount) = amount else { continue };
            if amount.is_negative() {
                return Err(format!("{} must be non-negative, got {}", field, amount));
            }
            if amount > Cents::MAX_INPUT {
                return Err(format!(
                    "{} must be at most {}, got {}",
                    field,
                    Cents::MAX_INPUT,
                    amount
                ));
            }
        }
        Ok(())
    }

    /// Spend requirement that actually gates the bonus (None or zero means ungated)
    pub fn bonus_requirement(&self) -> Option<Cents> {
        self.signup_bonus_spend_requirement
            .filter(|req| *req > Cents::ZERO)
    }

    /// Rewards rate, treating a missing rate as zero
    pub fn effective_rewards_rate(&self) -> Rate {
        self.rewards_rate.unwrap_or(Rate::ZERO)
    }
}

/// On-disk catalog file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogFile {
    pub version: u32,
    #[serde(default)]
    pub cards: Vec<CardRecord>,
}

impl CatalogFile {
    pub fn new(cards: Vec<CardRecord>) -> Self {
        Self { version: 1, cards }
    }

    /// Cards flagged active; inactive entries stay in the file but are never scored
    pub fn active_cards(&self) -> Vec<CardRecord> {
        self.cards.iter().filter(|c| c.active).cloned().collect()
    }
}
