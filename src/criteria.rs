use crate::catalog::{CreditTier, RewardsType};
use crate::money::Cents;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Number of cards opened in roughly the last 24 months, bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum RecentApplications {
    #[serde(rename = "0")]
    None,
    #[serde(rename = "1-2")]
    OneToTwo,
    #[serde(rename = "3-4")]
    ThreeToFour,
    #[serde(rename = "5+")]
    FivePlus,
}

/// One assessment submitted by a parent.
///
/// ```yaml
/// credit_tier: excellent
/// current_cards: ["Chase Freedom"]
/// monthly_spend: 1500
/// preferred_rewards: cash_back
/// open_to_business_cards: false
/// tuition_amount: 10000
/// recent_applications: "1-2"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MatchingCriteria {
    pub credit_tier: CreditTier,

    /// Card names or issuers the user already holds
    #[serde(default)]
    pub current_cards: Vec<String>,

    /// Discretionary spend the user can put on a new card each month
    #[serde(default)]
    pub monthly_spend: Cents,

    pub preferred_rewards: RewardsType,

    #[serde(default)]
    pub open_to_business_cards: bool,

    pub tuition_amount: Cents,

    pub recent_applications: RecentApplications,

    #[serde(default)]
    pub travel_partners: Vec<String>,
}

/// Load matching criteria from a YAML file
pub fn load_criteria(path: &Path) -> Result<MatchingCriteria> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read criteria file at {}", path.display()))?;

    let criteria: MatchingCriteria = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse criteria: invalid YAML in {}", path.display()))?;

    Ok(criteria)
}
